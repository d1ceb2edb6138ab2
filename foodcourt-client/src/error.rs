use thiserror::Error;

use foodcourt_core::cart::CartError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failures; these never reach the network.
    #[error("Cart is empty")]
    EmptyCart,
    #[error("An order submission is already in flight")]
    SubmissionInFlight,
    #[error("Delivery PIN must be 4-6 alphanumeric characters")]
    MalformedPin,
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Authentication required")]
    Unauthorized,
    #[error("Permission denied: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Business-rule rejection from a service (invalid transition, wrong
    /// PIN, cross-restaurant order contents); state was not advanced.
    #[error("{0}")]
    Rejected(String),
    #[error("Service error: {0}")]
    Service(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Transient failures are retried only by explicit user action for
    /// mutating calls; polling reads just wait for the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Service(_) | ClientError::Http(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
