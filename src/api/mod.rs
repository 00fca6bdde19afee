//! HTTP surface of the shop.
//!
//! Handlers stay thin: they extract and check the caller, then delegate to the
//! domain clients in [`AppState`]. Errors from those clients convert into
//! [`ApiError`] with `?`.

pub mod auth;
pub mod error;
pub mod orders;
pub mod products;
pub mod state;
pub mod users;

pub use auth::{AdminOnly, Authenticated, Identity};
pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Builds the application router with every route and the request trace layer.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(users::routes())
        .merge(products::routes())
        .merge(orders::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
