//! HTTP route handlers for the backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store connectivity)
//!
//! # Catalog (JSON arrays, full collections)
//! GET  /api/bikes               - All bikes
//! GET  /api/accessories         - All accessories
//! GET  /api/logo                - All brand logos
//! GET  /api/dealers             - All dealers
//!
//! # Bulk import (reads <data_dir>/<collection>.json)
//! GET  /api/import-bikes        - Append bikes
//! GET  /api/import-logo         - Replace logos
//! GET  /api/import-accessories  - Replace accessories
//! GET  /api/import-dealers      - Replace dealers
//!
//! # Messages
//! POST /api/messages            - Store a dealer-directed message (201)
//! POST /api/contact             - Store a contact form submission (201)
//!
//! # Auth
//! POST /register                - Create an account
//! POST /login                   - Log in, set the session cookie
//! GET  /me                      - Session check: { loggedIn, email? }
//! POST /logout                  - Destroy the session
//! ```

pub mod auth;
pub mod catalog;
pub mod messages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog API router (mounted under `/api`).
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/bikes", get(catalog::list_bikes))
        .route("/import-bikes", get(catalog::import_bikes))
        .route("/accessories", get(catalog::list_accessories))
        .route("/import-accessories", get(catalog::import_accessories))
        .route("/logo", get(catalog::list_logos))
        .route("/import-logo", get(catalog::import_logos))
        .route("/dealers", get(catalog::list_dealers))
        .route("/import-dealers", get(catalog::import_dealers))
        .route("/messages", post(messages::create_message))
        .route("/contact", post(messages::create_contact))
}

/// Create the auth routes router (mounted at the root).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the backend.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", catalog_routes())
        .merge(auth_routes())
}
