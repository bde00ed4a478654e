//! Dealer message and contact form handlers.
//!
//! Both endpoints validate field presence by hand over the raw JSON body so
//! that a missing field and a blank field are the same user error (400),
//! rather than a deserialization rejection.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use chainring_core::{ContactMessage, DealerMessage, Email, ItemId};

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for message submissions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/messages
///
/// Store a question addressed to a dealer. Every field is required.
#[instrument(skip(state, payload))]
pub async fn create_message(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let dealer_id = required_field(&payload, "dealerId")?;
    let name = required_field(&payload, "name")?;
    let email = required_field(&payload, "email")?;
    let body = required_field(&payload, "message")?;

    let email = Email::parse(&email)
        .map_err(|_| AppError::BadRequest("Please enter a valid email address".to_owned()))?;

    let message = DealerMessage::new(ItemId::new(dealer_id), name, email, body);
    CatalogRepository::new(state.store())
        .create_message(&message)
        .await?;

    tracing::info!(message_id = %message.id, dealer = %message.dealer_id, "dealer message stored");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Message sent successfully".to_owned(),
        }),
    ))
}

/// POST /api/contact
///
/// Store a contact form submission. Every field is required.
#[instrument(skip(state, payload))]
pub async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let name = required_field(&payload, "name")?;
    let email = required_field(&payload, "email")?;
    let subject = required_field(&payload, "subject")?;
    let body = required_field(&payload, "message")?;

    let email = Email::parse(&email)
        .map_err(|_| AppError::BadRequest("Please enter a valid email address".to_owned()))?;

    let message = ContactMessage::new(name, email, subject, body);
    CatalogRepository::new(state.store())
        .create_contact(&message)
        .await?;

    tracing::info!(message_id = %message.id, "contact message stored");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Message stored".to_owned(),
        }),
    ))
}

/// A present, non-blank string field, trimmed.
fn required_field(payload: &Value, key: &str) -> Result<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| AppError::BadRequest("All fields are required".to_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_required_field_trims_and_rejects_blank() {
        let payload = json!({"name": "  Sam  ", "empty": "   "});

        assert_eq!(required_field(&payload, "name").ok(), Some("Sam".to_owned()));
        assert!(required_field(&payload, "empty").is_err());
        assert!(required_field(&payload, "missing").is_err());
    }

    #[test]
    fn test_required_field_rejects_non_strings() {
        let payload = json!({"dealerId": 42});
        assert!(required_field(&payload, "dealerId").is_err());
    }
}
