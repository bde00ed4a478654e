//! Bulk-import catalog JSON files into the document store.
//!
//! Writes through the same repository as the HTTP import endpoints, with
//! the same semantics: bikes append, the other collections are replaced.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use chainring_core::{Accessory, Bike, Dealer, Logo};
use chainring_server::db::catalog::CatalogRepository;
use chainring_server::db::{self, PgDocumentStore};

use super::database_url;

type CliError = Box<dyn std::error::Error>;

/// Append bikes from `bikes.json`.
///
/// # Errors
///
/// Returns an error if the file is missing/invalid or the store rejects
/// the insert.
pub async fn bikes(data_dir: &Path) -> Result<(), CliError> {
    let store = connect().await?;
    let bikes: Vec<Bike> = load(&data_dir.join("bikes.json")).await?;
    let count = CatalogRepository::new(&store).import_bikes(bikes).await?;
    info!(count, "Bikes imported");
    Ok(())
}

/// Replace logos from `logos.json`.
///
/// # Errors
///
/// See [`bikes`].
pub async fn logos(data_dir: &Path) -> Result<(), CliError> {
    let store = connect().await?;
    let logos: Vec<Logo> = load(&data_dir.join("logos.json")).await?;
    let count = CatalogRepository::new(&store).import_logos(logos).await?;
    info!(count, "Logos imported");
    Ok(())
}

/// Replace accessories from `accessories.json`.
///
/// # Errors
///
/// See [`bikes`].
pub async fn accessories(data_dir: &Path) -> Result<(), CliError> {
    let store = connect().await?;
    let accessories: Vec<Accessory> = load(&data_dir.join("accessories.json")).await?;
    let count = CatalogRepository::new(&store)
        .import_accessories(accessories)
        .await?;
    info!(count, "Accessories imported");
    Ok(())
}

/// Replace dealers from `dealers.json`.
///
/// # Errors
///
/// See [`bikes`].
pub async fn dealers(data_dir: &Path) -> Result<(), CliError> {
    let store = connect().await?;
    let dealers: Vec<Dealer> = load(&data_dir.join("dealers.json")).await?;
    let count = CatalogRepository::new(&store).import_dealers(dealers).await?;
    info!(count, "Dealers imported");
    Ok(())
}

/// Import every collection.
///
/// # Errors
///
/// Stops at the first failing collection.
pub async fn all(data_dir: &Path) -> Result<(), CliError> {
    bikes(data_dir).await?;
    logos(data_dir).await?;
    accessories(data_dir).await?;
    dealers(data_dir).await?;
    Ok(())
}

async fn connect() -> Result<PgDocumentStore, CliError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    Ok(PgDocumentStore::new(pool))
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CliError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let items = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid data in {}: {e}", path.display()))?;
    Ok(items)
}
