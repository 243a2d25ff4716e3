use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::carts::Cart;
use service::errors::ServiceError;
use service::storage::Stored;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

pub async fn get(
    State(state): State<ServerState>,
    Path(cid): Path<String>,
) -> Result<Json<Stored<Cart>>, JsonApiError> {
    state
        .carts
        .get(&cid)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Cart not found", None))
}

pub async fn create(State(state): State<ServerState>) -> Result<(StatusCode, Json<Cart>), JsonApiError> {
    let cart = state.carts.create().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// Add one unit of `pid` to cart `cid`. `pid` is not checked against the products.
pub async fn add_product(
    State(state): State<ServerState>,
    Path((cid, pid)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Cart>), JsonApiError> {
    match state.carts.add_product(&cid, &pid).await {
        Ok(cart) => Ok((StatusCode::CREATED, Json(cart))),
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Cart or Product not found", None))
        }
        Err(e) => Err(e.into()),
    }
}
