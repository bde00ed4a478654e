//! Authentication wire payloads shared by the server and the client.

use serde::{Deserialize, Serialize};

/// `POST /register` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /login` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// `GET /me` response: the client-visible session flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCheck {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
