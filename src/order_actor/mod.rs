//! # Order Actor
//!
//! This module implements the Order resource actor: order placement, history,
//! status changes and cancellation.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction::Cancel`] and its result
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor's context is a [`ProductClient`](crate::clients::ProductClient). It is
//! injected at `run()` time, so the product actor must be created first:
//!
//! ```rust,ignore
//! let (product_actor, products) = product_actor::new(32);
//! let (order_actor, orders) = order_actor::new(32);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run(ProductClient::new(products.clone())));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
