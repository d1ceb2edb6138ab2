use axum::{http::StatusCode, response::Json};
use serde_json::json;

use foodcourt_client::ClientError;
use foodcourt_core::cart::CartError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => ApiError::InvalidToken,
            ClientError::Forbidden(_) => ApiError::Forbidden,
            ClientError::NotFound(message) => ApiError::NotFound(message),
            ClientError::Rejected(message) => ApiError::Rejected(message),
            ClientError::EmptyCart | ClientError::SubmissionInFlight | ClientError::MalformedPin => {
                ApiError::Validation(err.to_string())
            }
            ClientError::Cart(cart) => ApiError::from(cart),
            ClientError::Service(message) => ApiError::ServiceUnavailable(message),
            ClientError::Http(inner) => ApiError::ServiceUnavailable(inner.to_string()),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::CrossRestaurantConflict { .. } => ApiError::Conflict(err.to_string()),
            CartError::InvalidQuantity => ApiError::Validation(err.to_string()),
            CartError::NoSuchItem(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::AuthenticationFailed | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
