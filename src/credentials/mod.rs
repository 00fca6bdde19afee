//! # Credential Service
//!
//! Password hashing ([`PasswordHasherConfig`], [`verify_password`]) and signed
//! session tokens ([`TokenIssuer`]). Nothing here touches the actors; the user
//! client and the HTTP auth extractors call into it.

mod password;
mod token;

pub use password::*;
pub use token::*;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CredentialError {
    #[error("Invalid password hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    /// Bad signature, malformed payload, wrong issuer or expired.
    #[error("Invalid or expired token")]
    InvalidToken,
}
