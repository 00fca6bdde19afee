//! Error types for the Order actor.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A line referenced a product that does not exist.
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// A line asked for more than the product has. Carries the product name.
    #[error("Product {0} is out of stock")]
    OutOfStock(String),

    /// The caller does not own the order.
    #[error("{0}")]
    Forbidden(String),

    /// The order's status no longer allows cancellation.
    #[error("Order cannot be cancelled: {0}")]
    CannotCancel(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
