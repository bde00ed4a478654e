//! Run database migrations.
//!
//! Applies the server's sqlx migrations (the document table) and the
//! tower-sessions table migration.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use chainring_server::db;

use super::database_url;

/// Run all migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    sqlx::migrate!("../server/migrations").run(&pool).await?;
    info!("Document store migrations applied");

    PostgresStore::new(pool.clone()).migrate().await?;
    info!("Session store migrated");

    Ok(())
}
