use std::env;
use std::time::Duration;

use dotenvy::dotenv;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default polling cadence for order tracking views. Overridable through
/// `POLL_INTERVAL_SECS`; never hardcode a tick somewhere else.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 7;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub auth_endpoint: String,
    pub restaurant_endpoint: String,
    pub order_endpoint: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let auth_endpoint =
            env::var("AUTH_SERVICE_ENDPOINT").expect("AUTH_SERVICE_ENDPOINT required");
        let restaurant_endpoint =
            env::var("RESTAURANT_SERVICE_ENDPOINT").expect("RESTAURANT_SERVICE_ENDPOINT required");
        let order_endpoint =
            env::var("ORDER_SERVICE_ENDPOINT").expect("ORDER_SERVICE_ENDPOINT required");

        Self {
            auth_endpoint,
            restaurant_endpoint,
            order_endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(
                env::var("POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            ),
        }
    }

    /// All three services behind one base URL, as served by
    /// `foodcourt-mock-services`.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            auth_endpoint: endpoint.clone(),
            restaurant_endpoint: endpoint.clone(),
            order_endpoint: endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}
