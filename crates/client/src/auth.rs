//! Session authentication client.
//!
//! Talks to the auth collaborator (`/register`, `/login`, `/me`,
//! `/logout`), holding the session cookie in an in-process cookie store.
//! A successful login or session check yields an [`AuthToken`], the typed
//! capability [`crate::cart::CartStore::add`] requires.

use url::Url;

use chainring_core::{Email, LoginPayload, RegisterPayload, SessionCheck};

use crate::http::rejection_message;

/// Proof of an authenticated session.
///
/// Only minted from a successful login or session check, so holding one is
/// holding the "logged in" gate the cart checks before `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    email: Email,
}

impl AuthToken {
    pub(crate) const fn new(email: Email) -> Self {
        Self { email }
    }

    /// The authenticated user's email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

/// Errors from the auth endpoints.
#[derive(Debug, thiserror::Error)]
pub enum AuthClientError {
    /// The request never completed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// The server rejected the request (bad credentials, duplicate email,
    /// validation failure).
    #[error("{message}")]
    Rejected {
        /// Server-provided reason.
        message: String,
    },

    /// The server reported a session for an email it cannot have accepted.
    #[error("invalid session email: {0}")]
    Email(#[from] chainring_core::EmailError),
}

/// Cookie-session client for the auth collaborator.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthClientError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, AuthClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// [`AuthClientError::Rejected`] when the email is taken or the payload
    /// fails validation; [`AuthClientError::Network`] on transport failure.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthClientError> {
        let payload = RegisterPayload {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = self
            .http
            .post(self.base_url.join("/register")?)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthClientError::Rejected {
                message: rejection_message(response).await,
            })
        }
    }

    /// Log in, storing the session cookie and returning the auth token.
    ///
    /// # Errors
    ///
    /// [`AuthClientError::Rejected`] on bad credentials;
    /// [`AuthClientError::Network`] on transport failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthClientError> {
        let parsed = Email::parse(email)?;
        let payload = LoginPayload {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = self
            .http
            .post(self.base_url.join("/login")?)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(AuthToken::new(parsed))
        } else {
            Err(AuthClientError::Rejected {
                message: rejection_message(response).await,
            })
        }
    }

    /// Check the current session, returning a token when still logged in.
    ///
    /// # Errors
    ///
    /// [`AuthClientError::Network`] on transport failure.
    pub async fn session(&self) -> Result<Option<AuthToken>, AuthClientError> {
        let response = self
            .http
            .get(self.base_url.join("/me")?)
            .send()
            .await?
            .error_for_status()?;

        let check: SessionCheck = response.json().await?;
        match (check.logged_in, check.email) {
            (true, Some(email)) => Ok(Some(AuthToken::new(Email::parse(&email)?))),
            _ => Ok(None),
        }
    }

    /// Log out, destroying the server-side session.
    ///
    /// # Errors
    ///
    /// [`AuthClientError::Network`] on transport failure.
    pub async fn logout(&self) -> Result<(), AuthClientError> {
        self.http
            .post(self.base_url.join("/logout")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
