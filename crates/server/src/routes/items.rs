use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::Item;
use service::{errors::ServiceError, items::ItemStore};
use tracing::info;

use crate::{errors::ApiError, metrics, routes::ServerState};

/// Count the outcome of an item operation and convert its error for the response.
fn observe<T>(operation: &str, res: Result<T, ServiceError>) -> Result<T, ApiError> {
    match res {
        Ok(v) => {
            metrics::record(operation, "ok");
            Ok(v)
        }
        Err(e) => {
            let err = ApiError::from(e);
            metrics::record(operation, err.message());
            Err(err)
        }
    }
}

async fn refresh_gauge(store: &dyn ItemStore) {
    metrics::set_items_stored(store.len().await);
}

async fn decode_and_create(store: &dyn ItemStore, body: &[u8]) -> Result<Item, ServiceError> {
    let item = Item::from_json(body)?;
    store.create(item).await
}

async fn decode_and_update(store: &dyn ItemStore, id: &str, body: &[u8]) -> Result<Item, ServiceError> {
    // an unknown id is reported before a bad body
    if !store.contains(id).await {
        return Err(ServiceError::not_found(id));
    }
    let item = Item::from_json(body)?;
    store.update(id, item).await
}

#[utoipa::path(get, path = "/items", tag = "items", responses((status = 200, description = "All items, unordered", body = [crate::openapi::ItemDoc])))]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Item>> {
    let items = state.items.list().await;
    metrics::record("list", "ok");
    Json(items)
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Item>, ApiError> {
    let item = observe("get", state.items.get(&id).await)?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = crate::openapi::ItemDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid input, or Item already exists")
    )
)]
pub async fn create(State(state): State<ServerState>, body: Bytes) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = observe("create", decode_and_create(state.items.as_ref(), &body).await)?;
    info!(id = %item.id, "item created");
    refresh_gauge(state.items.as_ref()).await;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id; overrides any id in the body")),
    request_body = crate::openapi::ItemDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let item = observe("update", decode_and_update(state.items.as_ref(), &id, &body).await)?;
    info!(id = %item.id, "item updated");
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    observe("delete", state.items.delete(&id).await)?;
    info!(id = %id, "item deleted");
    refresh_gauge(state.items.as_ref()).await;
    Ok((StatusCode::NO_CONTENT, [(header::CONTENT_TYPE, "application/json")]))
}
