//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chainring_core::{Email, UserId};

/// A registered user, as exposed outside the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// The stored user document, including the argon2 password hash.
///
/// Never serialized into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Drop the credential fields.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}
