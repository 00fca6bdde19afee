//! # Product Actor
//!
//! This module implements the Product resource actor: the catalog and its
//! inventory counts.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`search`] - catalog search predicate and ordering
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! Stock changes go through `AdjustQuantity`, which checks and applies the delta
//! inside one actor message:
//!
//! ```rust,ignore
//! // Take stock for an order (fails if it would go negative)
//! let after = product_client.reserve(product_id, quantity).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use actor_shop::product_actor;
//! use actor_shop::clients::ProductClient;
//! use actor_shop::model::{Category, ProductCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!
//!     // Start the actor (no dependencies)
//!     tokio::spawn(actor.run(()));
//!
//!     let widget = client
//!         .create_product(ProductCreate {
//!             name: "Widget".to_string(),
//!             description: None,
//!             price: 29.99,
//!             category: Category::Other,
//!             quantity: 100,
//!             image_url: None,
//!         })
//!         .await?;
//!
//!     let after = client.reserve(widget.id, 5).await?;
//!     assert_eq!(after.quantity, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod search;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
