//! HTTP error rendering.
//!
//! Every failure leaves the server as `{"error": {"code", "message"}}` with the
//! status that matches its code. Domain errors convert into [`ApiError`] with
//! `?`; server-side failures are logged and replaced by a generic message.

use crate::credentials::CredentialError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or malformed `Authorization` header.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    ProductNotFound(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Email or username already exists")]
    UserExists,

    #[error("{0}")]
    OutOfStock(String),

    #[error("{0}")]
    CannotCancel(String),

    /// Anything the client cannot fix. The detail is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::UserExists => "USER_EXISTS",
            Self::OutOfStock(_) => "OUT_OF_STOCK",
            Self::CannotCancel(_) => "CANNOT_CANCEL",
            Self::Internal(_) => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::InvalidToken | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::ProductNotFound(_) | Self::OrderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserExists | Self::OutOfStock(_) | Self::CannotCancel(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message,
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => Self::UserNotFound,
            UserError::AlreadyExists(_) => Self::UserExists,
            UserError::ValidationError(msg) => Self::InvalidInput(msg),
            UserError::InvalidCredentials => Self::InvalidCredentials,
            UserError::CredentialError(_) | UserError::ActorCommunicationError(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => Self::ProductNotFound("Product not found".into()),
            ProductError::InsufficientStock { ref product, .. } => {
                Self::OutOfStock(format!("Product {product} is out of stock"))
            }
            ProductError::ValidationError(msg) => Self::InvalidInput(msg),
            ProductError::ActorCommunicationError(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => Self::OrderNotFound,
            OrderError::ProductNotFound(_) => Self::ProductNotFound(e.to_string()),
            OrderError::OutOfStock(_) => Self::OutOfStock(e.to_string()),
            OrderError::Forbidden(msg) => Self::Forbidden(msg),
            OrderError::CannotCancel(_) => Self::CannotCancel(e.to_string()),
            OrderError::ValidationError(msg) => Self::InvalidInput(msg),
            OrderError::ActorCommunicationError(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::InvalidToken => Self::InvalidToken,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

/// `Json` extractor whose rejections render as `INVALID_INPUT`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections render as `INVALID_INPUT`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` extractor whose rejections render as `INVALID_INPUT`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn renders_code_and_message() {
        let (status, body) = body_json(ApiError::OutOfStock("Product Widget is out of stock".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "OUT_OF_STOCK");
        assert_eq!(body["error"]["message"], "Product Widget is out of stock");
    }

    #[tokio::test]
    async fn internal_detail_is_not_sent() {
        let (status, body) = body_json(ApiError::Internal("actor closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "SERVER_ERROR");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[test]
    fn domain_errors_map_to_codes() {
        let cases: Vec<(ApiError, &str, StatusCode)> = vec![
            (UserError::AlreadyExists("x".into()).into(), "USER_EXISTS", StatusCode::CONFLICT),
            (UserError::InvalidCredentials.into(), "INVALID_CREDENTIALS", StatusCode::UNAUTHORIZED),
            (UserError::NotFound("user_1".into()).into(), "USER_NOT_FOUND", StatusCode::NOT_FOUND),
            (ProductError::NotFound("product_1".into()).into(), "PRODUCT_NOT_FOUND", StatusCode::NOT_FOUND),
            (OrderError::ProductNotFound("product_2".into()).into(), "PRODUCT_NOT_FOUND", StatusCode::NOT_FOUND),
            (OrderError::OutOfStock("Widget".into()).into(), "OUT_OF_STOCK", StatusCode::CONFLICT),
            (OrderError::CannotCancel("shipped".into()).into(), "CANNOT_CANCEL", StatusCode::CONFLICT),
            (OrderError::Forbidden("no".into()).into(), "FORBIDDEN", StatusCode::FORBIDDEN),
            (OrderError::NotFound("order_1".into()).into(), "ORDER_NOT_FOUND", StatusCode::NOT_FOUND),
            (OrderError::ValidationError("empty".into()).into(), "INVALID_INPUT", StatusCode::BAD_REQUEST),
            (CredentialError::InvalidToken.into(), "INVALID_TOKEN", StatusCode::UNAUTHORIZED),
            (CredentialError::PasswordHash.into(), "SERVER_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code, "{err:?}");
            assert_eq!(err.status(), status, "{err:?}");
        }
    }
}
