use axum::{
    routing::{get, post},
    Json, Router,
};
use service::CatalogStore;
use tower_http::{
    cors::CorsLayer,
    trace::{
        DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
    },
};
use tracing::Level;

use common::types::Health;

pub mod species;
pub mod treatments;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router over a shared catalog store.
pub fn build_router(store: CatalogStore, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/species", get(species::list).post(species::create))
        .route("/api/species/detect", post(species::detect))
        .route(
            "/api/species/:name",
            get(species::get_one)
                .put(species::update)
                .delete(species::delete),
        )
        .route(
            "/api/treatments",
            get(treatments::list).post(treatments::create),
        )
        .route(
            "/api/treatments/:name",
            get(treatments::get_one)
                .put(treatments::update)
                .delete(treatments::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
