//! Error types for the User actor.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Another user already holds the username or email.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The password could not be hashed.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
