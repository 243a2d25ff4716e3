use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::{
    carts::CartService,
    products::{ProductService, RequiredFieldPolicy},
    storage::CollectionStore,
};

pub mod carts;
pub mod products;

/// Shared handler state. Services are stateless apart from the injected store.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService>,
    pub carts: Arc<CartService>,
}

impl ServerState {
    pub fn new(store: Arc<dyn CollectionStore>, policy: RequiredFieldPolicy) -> Self {
        Self {
            products: Arc::new(ProductService::new(Arc::clone(&store), policy)),
            carts: Arc::new(CartService::new(store)),
        }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:pid",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/api/carts", post(carts::create))
        .route("/api/carts/:cid", get(carts::get))
        .route("/api/carts/:cid/product/:pid", post(carts::add_product));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
