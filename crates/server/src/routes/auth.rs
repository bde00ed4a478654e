//! Authentication route handlers.
//!
//! Register, login, session check, and logout. Login stores a
//! [`CurrentUser`] in the cookie session; `/me` is the session flag the
//! client's cart gate consumes.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use chainring_core::{LoginPayload, RegisterPayload, SessionCheck};

use crate::error::{AppError, Result};
use crate::models::session::{CurrentUser, keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Response for auth actions.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
}

/// POST /register
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.store());
    let user = auth
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(Json(AuthResponse {
        message: "User registered".to_owned(),
    }))
}

/// POST /login
#[instrument(skip(state, session, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.store())
        .login(&payload.email, &payload.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
    };
    session
        .insert(keys::CURRENT_USER, current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_owned(),
    }))
}

/// GET /me
///
/// The client-side "is authenticated" flag: logged-in state plus the
/// session email.
#[instrument(skip(session))]
pub async fn me(session: Session) -> Result<Json<SessionCheck>> {
    let current: Option<CurrentUser> = session
        .get(keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read session: {e}")))?;

    Ok(Json(current.map_or(
        SessionCheck {
            logged_in: false,
            email: None,
        },
        |user| SessionCheck {
            logged_in: true,
            email: Some(user.email.into_inner()),
        },
    )))
}

/// POST /logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<AuthResponse>> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to destroy session: {e}")))?;

    Ok(Json(AuthResponse {
        message: "Logged out".to_owned(),
    }))
}
