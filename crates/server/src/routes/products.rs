use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use service::errors::ServiceError;
use service::products::{NewProduct, Product, ProductPatch};
use service::storage::Stored;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

fn product_not_found() -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Product not found", None)
}

/// List every product, unfiltered
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Stored<Product>>> {
    Json(state.products.list().await)
}

pub async fn get(
    State(state): State<ServerState>,
    Path(pid): Path<String>,
) -> Result<Json<Stored<Product>>, JsonApiError> {
    state.products.get(&pid).await.map(Json).ok_or_else(product_not_found)
}

/// Create a product; the id is generated server-side
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let Json(input) = payload?;
    state
        .products
        .create(input)
        .await
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(|e| match e {
            ServiceError::Validation(detail) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "All fields are required", Some(detail))
            }
            other => other.into(),
        })
}

pub async fn update(
    State(state): State<ServerState>,
    Path(pid): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Stored<Product>>, JsonApiError> {
    let Json(patch) = payload?;
    match state.products.update(&pid, patch).await {
        Ok(p) => Ok(Json(p)),
        Err(ServiceError::NotFound(_)) => Err(product_not_found()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(pid): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    match state.products.delete(&pid).await? {
        true => Ok(Json(Message::new("Product deleted successfully"))),
        false => Err(product_not_found()),
    }
}
