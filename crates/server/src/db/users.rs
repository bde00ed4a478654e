//! User repository over the document store.

use chrono::Utc;

use chainring_core::{Email, UserId};

use crate::models::user::{StoredUser, User};

use super::RepositoryError;
use super::store::{Collection, DocumentStore, Filter};

/// Repository for user documents.
pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a repository over the given store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the query fails,
    /// `RepositoryError::DataCorruption` if the stored user is malformed.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<StoredUser>, RepositoryError> {
        let docs = self
            .store
            .find(
                Collection::Users,
                Filter::Eq {
                    field: "email",
                    value: email.as_str().to_owned(),
                },
            )
            .await?;

        docs.into_iter()
            .next()
            .map(|doc| {
                serde_json::from_value(doc).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid user document: {e}"))
                })
            })
            .transpose()
    }

    /// Create a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Conflict` if the email is already registered,
    /// `RepositoryError::Store` for store failures.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        if self.get_by_email(email).await?.is_some() {
            return Err(RepositoryError::Conflict("email already in use".to_owned()));
        }

        let stored = StoredUser {
            id: UserId::generate(),
            name: name.to_owned(),
            email: email.clone(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };
        let doc = serde_json::to_value(&stored).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize user: {e}"))
        })?;
        self.store.insert_many(Collection::Users, vec![doc]).await?;

        Ok(stored.into_user())
    }
}
