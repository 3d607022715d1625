use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::items::{ItemStore, MemoryItemStore};

use crate::{metrics, openapi::ApiDoc};

pub mod items;

/// Shared handler state. The store is the single owner of the collection.
#[derive(Clone)]
pub struct ServerState {
    pub items: Arc<dyn ItemStore>,
}

impl ServerState {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryItemStore::new()))
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: item routes plus operational endpoints.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let item_routes = Router::new()
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/:id",
            get(items::get).put(items::update).delete(items::delete),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    item_routes
        .merge(ops)
        .with_state(state)
        .layer(cors)
        // one INFO span per request with status and latency on response; 5xx at ERROR
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
