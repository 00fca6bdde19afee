//! `/orders` routes: placing, listing and cancelling orders, plus the
//! fulfilment status webhook.

use super::auth::{check_webhook_secret, Authenticated};
use super::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use super::state::AppState;
use crate::clients::{Page, PageRequest};
use crate::model::{
    CancelOutcome, Order, OrderCreate, OrderId, OrderLineRequest, OrderStatus, OrderSummary,
    PaymentMethod, ShippingAddress,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/webhook/status", post(status_webhook))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/cancel", patch(cancel_order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    items: Option<Vec<OrderLineRequest>>,
    shipping_address: Option<ShippingAddress>,
    payment_method: Option<PaymentMethod>,
}

async fn create_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let lines = body.items.unwrap_or_default();
    if lines.is_empty() {
        return Err(ApiError::InvalidInput(
            "Order must contain at least one item".into(),
        ));
    }
    let shipping_address = body
        .shipping_address
        .ok_or_else(|| ApiError::InvalidInput("Shipping address is required".into()))?;

    let params = OrderCreate {
        user_id: identity.user_id,
        lines,
        shipping_address,
        payment_method: body.payment_method,
    };
    let order = state.orders.create_order(params).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
}

async fn list_orders(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Page<OrderSummary>>, ApiError> {
    let request = PageRequest::new(query.page, query.limit);
    Ok(Json(state.orders.list_orders(identity.user_id, request).await?))
}

async fn get_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get_order(identity.user_id, id).await?))
}

async fn cancel_order(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<CancelOutcome>, ApiError> {
    Ok(Json(state.orders.cancel_order(identity.user_id, id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusNotification {
    order_id: OrderId,
    status: OrderStatus,
    tracking_number: Option<String>,
    /// Sender's event time; logged, not stored.
    timestamp: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Received {
    received: bool,
}

async fn status_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<StatusNotification>,
) -> Result<Json<Received>, ApiError> {
    check_webhook_secret(&headers, state.webhook_secret.as_ref())?;
    let order = state
        .orders
        .update_status(body.order_id, body.status, body.tracking_number)
        .await?;
    info!(id = %order.id, status = %order.status, timestamp = ?body.timestamp, "Order status updated by webhook");
    Ok(Json(Received { received: true }))
}
