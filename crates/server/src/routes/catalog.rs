//! Catalog read and bulk-import route handlers.
//!
//! Read endpoints return the full collection; filtering is the client's
//! job. The import endpoints load `<data_dir>/<collection>.json` into the
//! store: bikes append, the other collections are replaced wholesale
//! (matching how the data files are maintained).

use axum::{Json, extract::State};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use chainring_core::{Accessory, Bike, Dealer, Logo};

use crate::config::ServerConfig;
use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Summary returned by the bulk-import endpoints.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub message: String,
    pub count: u64,
}

/// GET /api/bikes
#[instrument(skip(state))]
pub async fn list_bikes(State(state): State<AppState>) -> Result<Json<Vec<Bike>>> {
    let bikes = CatalogRepository::new(state.store()).list_bikes().await?;
    Ok(Json(bikes))
}

/// GET /api/accessories
#[instrument(skip(state))]
pub async fn list_accessories(State(state): State<AppState>) -> Result<Json<Vec<Accessory>>> {
    let accessories = CatalogRepository::new(state.store())
        .list_accessories()
        .await?;
    Ok(Json(accessories))
}

/// GET /api/logo
#[instrument(skip(state))]
pub async fn list_logos(State(state): State<AppState>) -> Result<Json<Vec<Logo>>> {
    let logos = CatalogRepository::new(state.store()).list_logos().await?;
    Ok(Json(logos))
}

/// GET /api/dealers
#[instrument(skip(state))]
pub async fn list_dealers(State(state): State<AppState>) -> Result<Json<Vec<Dealer>>> {
    let dealers = CatalogRepository::new(state.store()).list_dealers().await?;
    Ok(Json(dealers))
}

/// GET /api/import-bikes
#[instrument(skip(state))]
pub async fn import_bikes(State(state): State<AppState>) -> Result<Json<ImportSummary>> {
    let bikes: Vec<Bike> = read_data_file(state.config(), "bikes.json").await?;
    let count = CatalogRepository::new(state.store())
        .import_bikes(bikes)
        .await?;
    tracing::info!(count, "bikes imported");
    Ok(Json(ImportSummary {
        message: "Bikes imported successfully".to_owned(),
        count,
    }))
}

/// GET /api/import-logo
#[instrument(skip(state))]
pub async fn import_logos(State(state): State<AppState>) -> Result<Json<ImportSummary>> {
    let logos: Vec<Logo> = read_data_file(state.config(), "logos.json").await?;
    let count = CatalogRepository::new(state.store())
        .import_logos(logos)
        .await?;
    tracing::info!(count, "logos imported");
    Ok(Json(ImportSummary {
        message: "Logos imported successfully".to_owned(),
        count,
    }))
}

/// GET /api/import-accessories
#[instrument(skip(state))]
pub async fn import_accessories(State(state): State<AppState>) -> Result<Json<ImportSummary>> {
    let accessories: Vec<Accessory> = read_data_file(state.config(), "accessories.json").await?;
    let count = CatalogRepository::new(state.store())
        .import_accessories(accessories)
        .await?;
    tracing::info!(count, "accessories imported");
    Ok(Json(ImportSummary {
        message: "Accessories imported successfully".to_owned(),
        count,
    }))
}

/// GET /api/import-dealers
#[instrument(skip(state))]
pub async fn import_dealers(State(state): State<AppState>) -> Result<Json<ImportSummary>> {
    let dealers: Vec<Dealer> = read_data_file(state.config(), "dealers.json").await?;
    let count = CatalogRepository::new(state.store())
        .import_dealers(dealers)
        .await?;
    tracing::info!(count, "dealers imported");
    Ok(Json(ImportSummary {
        message: "Dealers imported successfully".to_owned(),
        count,
    }))
}

async fn read_data_file<T: DeserializeOwned>(
    config: &ServerConfig,
    file: &str,
) -> Result<Vec<T>> {
    let path = config.data_dir.join(file);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Internal(format!("invalid data in {}: {e}", path.display())))
}
