use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use models::species::Species;
use serde::Deserialize;
use service::CatalogStore;

use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated name filter; absent means the full catalog.
    pub names: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(flatten)]
    pub species: Species,
    #[serde(default)]
    pub update_mask: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub values: Vec<String>,
}

pub async fn create(
    State(store): State<CatalogStore>,
    Json(input): Json<Species>,
) -> Result<(StatusCode, Json<Species>), ApiError> {
    let created = store.create_species(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(store): State<CatalogStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Species>>, ApiError> {
    let names: Vec<String> = query
        .names
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    let species = store.list_species(&names).await?;
    Ok(Json(species))
}

pub async fn get_one(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
) -> Result<Json<Species>, ApiError> {
    let species = store.get_species(&name).await?;
    Ok(Json(species))
}

pub async fn update(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
    Json(input): Json<UpdateRequest>,
) -> Result<Json<Species>, ApiError> {
    let updated = store
        .update_species(&name, input.species, &input.update_mask)
        .await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete_species(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn detect(
    State(store): State<CatalogStore>,
    Json(input): Json<DetectRequest>,
) -> Result<Json<Vec<Species>>, ApiError> {
    let detected = store.detect_species(&input.values).await?;
    Ok(Json(detected))
}
