//! Represents a customer order.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Update parameters ([`OrderUpdate`])
//! - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))

use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Only orders nobody has started fulfilling may be cancelled by their owner.
    pub fn can_be_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Checks every field is present and within its length limit.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("street", &self.street, 200),
            ("city", &self.city, 100),
            ("state", &self.state, 100),
            ("zipCode", &self.zip_code, 20),
            ("country", &self.country, 100),
        ];
        for (name, value, max) in fields {
            if value.trim().is_empty() {
                return Err(format!("Shipping address {name} is required"));
            }
            if value.chars().count() > max {
                return Err(format!("Shipping address {name} exceeds {max} characters"));
            }
        }
        Ok(())
    }
}

/// Snapshot of a product taken when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new order.
///
/// Items, prices and the total are not part of the payload: the order actor
/// builds them while reserving stock.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub lines: Vec<OrderLineRequest>,
    pub shipping_address: ShippingAddress,
    pub payment_method: Option<PaymentMethod>,
}

/// Status overwrite, as sent by fulfilment.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
}

/// Row of a user's order history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOutcome {
    pub id: OrderId,
    pub status: OrderStatus,
    pub cancelled_at: DateTime<Utc>,
}
