//! CLI command implementations.

pub mod import;
pub mod migrate;

use secrecy::SecretString;

/// Database URL from `CHAINRING_DATABASE_URL`, falling back to
/// `DATABASE_URL`.
pub fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("CHAINRING_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "CHAINRING_DATABASE_URL not set".into())
}
