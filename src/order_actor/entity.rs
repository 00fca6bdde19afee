//! ActorEntity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! The order actor runs with a [`ProductClient`] as its context. Placing an order
//! and cancelling one both talk to the product actor from inside the order
//! actor's hooks, so two requests touching the same order never interleave.
//!
//! Inventory is moved one line at a time. Each product adjustment is atomic,
//! but a multi-line order is not: when line *k* fails, lines before it stay
//! decremented. Cancelling restocks every line it can and always ends in
//! `cancelled`; a line that could not be restocked is logged at `error`.

use super::actions::{OrderAction, OrderActionResult};
use super::OrderError;
use crate::clients::ProductClient;
use crate::framework::ActorEntity;
use crate::model::{
    CancelOutcome, Order, OrderCreate, OrderId, OrderItem, OrderStatus, OrderUpdate,
};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = ProductClient;
    type Error = OrderError;

    /// Validates the request and lays out one item per requested line.
    ///
    /// Names and prices are filled in by `on_create` once stock is reserved.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError(
                "Order must contain at least one item".into(),
            ));
        }
        if let Some(line) = params.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "Quantity for {} must be at least 1",
                line.product_id
            )));
        }
        params
            .shipping_address
            .validate()
            .map_err(OrderError::ValidationError)?;

        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            items: params
                .lines
                .into_iter()
                .map(|line| OrderItem {
                    product_id: line.product_id,
                    product_name: String::new(),
                    quantity: line.quantity,
                    price: 0.0,
                })
                .collect(),
            total: 0.0,
            status: OrderStatus::Pending,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            tracking_number: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reserves stock for each line in order, snapshotting name and price.
    async fn on_create(&mut self, products: &ProductClient) -> Result<(), OrderError> {
        let mut total = 0.0;
        for item in &mut self.items {
            let product_id = item.product_id;
            let product = products
                .reserve(product_id, item.quantity)
                .await
                .map_err(|e| match e {
                    ProductError::NotFound(_) => OrderError::ProductNotFound(product_id.to_string()),
                    ProductError::InsufficientStock { product, .. } => OrderError::OutOfStock(product),
                    other => OrderError::ActorCommunicationError(other.to_string()),
                })?;
            debug!(%product_id, remaining = product.quantity, "Reserved");

            item.product_name = product.name;
            item.price = product.price;
            total += item.price * f64::from(item.quantity);
        }
        self.total = total;
        Ok(())
    }

    /// Overwrites the status. Any status may follow any other.
    ///
    /// Moving to `cancelled` this way stamps `cancelled_at` but leaves
    /// inventory alone; only [`OrderAction::Cancel`] restores stock.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &ProductClient) -> Result<(), OrderError> {
        let now = Utc::now();
        self.status = update.status;
        if self.status == OrderStatus::Cancelled && self.cancelled_at.is_none() {
            self.cancelled_at = Some(now);
        }
        if let Some(tracking_number) = update.tracking_number {
            self.tracking_number = Some(tracking_number);
        }
        self.updated_at = now;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        products: &ProductClient,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Cancel { requested_by } => {
                if self.user_id != requested_by {
                    return Err(OrderError::Forbidden(
                        "Cannot cancel other user's orders".into(),
                    ));
                }
                if !self.status.can_be_cancelled() {
                    return Err(OrderError::CannotCancel(format!(
                        "{} is already {}",
                        self.id, self.status
                    )));
                }

                // A failed restock is logged; the order is still cancelled.
                for item in &self.items {
                    match products.restock(item.product_id, item.quantity).await {
                        Ok(_) => {}
                        Err(ProductError::NotFound(_)) => {
                            warn!(product_id = %item.product_id, "Product gone, skipping restock");
                        }
                        Err(e) => {
                            error!(
                                order_id = %self.id,
                                product_id = %item.product_id,
                                quantity = item.quantity,
                                error = %e,
                                "Restock failed, inventory needs manual correction"
                            );
                        }
                    }
                }

                let now = Utc::now();
                self.status = OrderStatus::Cancelled;
                self.cancelled_at = Some(now);
                self.updated_at = now;
                Ok(OrderActionResult::Cancel(CancelOutcome {
                    id: self.id,
                    status: self.status,
                    cancelled_at: now,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::{OrderLineRequest, Product, ProductId, ShippingAddress, UserId};

    fn address() -> ShippingAddress {
        ShippingAddress {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            country: "US".into(),
        }
    }

    fn create(lines: Vec<OrderLineRequest>) -> OrderCreate {
        OrderCreate {
            user_id: UserId(1),
            lines,
            shipping_address: address(),
            payment_method: None,
        }
    }

    #[test]
    fn rejects_empty_and_zero_quantity_lines() {
        let empty = Order::from_create_params(OrderId(1), create(vec![]));
        assert!(matches!(empty, Err(OrderError::ValidationError(_))));

        let zero = Order::from_create_params(
            OrderId(1),
            create(vec![OrderLineRequest {
                product_id: ProductId(1),
                quantity: 0,
            }]),
        );
        assert!(matches!(zero, Err(OrderError::ValidationError(_))));
    }

    #[test]
    fn rejects_incomplete_address() {
        let mut params = create(vec![OrderLineRequest {
            product_id: ProductId(1),
            quantity: 1,
        }]);
        params.shipping_address.street.clear();
        let result = Order::from_create_params(OrderId(1), params);
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
    }

    #[tokio::test]
    async fn status_update_stamps_cancelled_at_once() {
        let mock = MockClient::<Product>::new();
        let products = ProductClient::new(mock.client());
        let mut order = Order::from_create_params(
            OrderId(1),
            create(vec![OrderLineRequest {
                product_id: ProductId(1),
                quantity: 1,
            }]),
        )
        .unwrap();

        let update = |status| OrderUpdate {
            status,
            tracking_number: None,
        };
        order.on_update(update(OrderStatus::Cancelled), &products).await.unwrap();
        let first = order.cancelled_at.expect("stamped");

        order.on_update(update(OrderStatus::Paid), &products).await.unwrap();
        order.on_update(update(OrderStatus::Cancelled), &products).await.unwrap();
        assert_eq!(order.cancelled_at, Some(first));
        // No product calls were made.
        mock.verify();
    }

    #[tokio::test]
    async fn cancel_by_stranger_is_forbidden() {
        let mock = MockClient::<Product>::new();
        let products = ProductClient::new(mock.client());
        let mut order = Order::from_create_params(
            OrderId(1),
            create(vec![OrderLineRequest {
                product_id: ProductId(1),
                quantity: 1,
            }]),
        )
        .unwrap();

        let result = order
            .handle_action(OrderAction::Cancel { requested_by: UserId(2) }, &products)
            .await;
        assert!(matches!(result, Err(OrderError::Forbidden(_))));
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
