//! Custom actions for the Product actor.
//!
//! This module defines the domain-specific operations (Actions) that can be performed
//! on a [`Product`](crate::model::Product) entity beyond CRUD.
//! These actions are handled by the [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action) method.

use crate::model::Product;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Adds `delta` (which may be negative) to the stock level.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the result would be negative; the stored
    /// quantity is left unchanged.
    AdjustQuantity(i64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Result from AdjustQuantity action - the product after the change
    AdjustQuantity(Product),
}
