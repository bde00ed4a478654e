//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions: Postgres-backed in
//! production, in-memory for tests. Cookie parameters match the original
//! deployment: lax same-site, http-only, 24-hour inactivity expiry.

use sqlx::PgPool;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "chainring_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

fn layer_over<S: SessionStore>(store: S) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Create the session layer with `PostgreSQL` store.
///
/// The sessions table is created via `chainring-cli migrate`.
#[must_use]
pub fn create_session_layer(pool: &PgPool) -> SessionManagerLayer<PostgresStore> {
    layer_over(PostgresStore::new(pool.clone()))
}

/// Create a session layer backed by process memory (tests, demos).
#[must_use]
pub fn memory_session_layer() -> SessionManagerLayer<MemoryStore> {
    layer_over(MemoryStore::default())
}
