//! Dealer message and contact form documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::ItemId;

/// Wire payload for `POST /api/messages`.
///
/// Every field is required by the endpoint; the email arrives as a raw
/// string and is validated server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDealerMessage {
    #[serde(rename = "dealerId")]
    pub dealer_id: ItemId,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A message addressed to a dealer, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerMessage {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    #[serde(rename = "dealerId")]
    pub dealer_id: ItemId,
    pub name: String,
    pub email: Email,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl DealerMessage {
    /// Build a stored message from a validated submission.
    #[must_use]
    pub fn new(dealer_id: ItemId, name: String, email: Email, message: String) -> Self {
        Self {
            id: ItemId::generate(),
            dealer_id,
            name,
            email,
            message,
            created_at: Utc::now(),
        }
    }
}

/// Wire payload for `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact form submission, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Build a stored contact submission.
    #[must_use]
    pub fn new(name: String, email: Email, subject: String, message: String) -> Self {
        Self {
            id: ItemId::generate(),
            name,
            email,
            subject,
            message,
            created_at: Utc::now(),
        }
    }
}
