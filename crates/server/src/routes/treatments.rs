use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use models::treatment::Treatment;
use serde::Deserialize;
use service::CatalogStore;

use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated species filter.
    pub species: Option<String>,
    /// Free text matched against each treatment's event vocabulary.
    pub display_name_search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(flatten)]
    pub treatment: Treatment,
    #[serde(default)]
    pub update_mask: Vec<String>,
}

pub async fn create(
    State(store): State<CatalogStore>,
    Json(input): Json<Treatment>,
) -> Result<(StatusCode, Json<Treatment>), ApiError> {
    let created = store.create_treatment(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Plain list when no query params are given, filtered query otherwise.
pub async fn list(
    State(store): State<CatalogStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Treatment>>, ApiError> {
    let species: Vec<String> = query
        .species
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let search = query.display_name_search.unwrap_or_default();

    let treatments = if species.is_empty() && search.is_empty() {
        store.list_treatments().await?
    } else {
        store.query_treatments(&species, &search).await?
    };
    Ok(Json(treatments))
}

pub async fn get_one(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
) -> Result<Json<Treatment>, ApiError> {
    let treatment = store.get_treatment(&name).await?;
    Ok(Json(treatment))
}

pub async fn update(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
    Json(input): Json<UpdateRequest>,
) -> Result<Json<Treatment>, ApiError> {
    let updated = store
        .update_treatment(&name, input.treatment, &input.update_mask)
        .await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(store): State<CatalogStore>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete_treatment(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
