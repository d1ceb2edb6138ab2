use std::time::Duration;

use dotenvy::dotenv;
use tracing::info;

use foodcourt_api_gateway::{AppState, app};
use foodcourt_client::ClientConfig;
use foodcourt_client::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let auth_endpoint =
        std::env::var("AUTH_SERVICE_ENDPOINT").expect("AUTH_SERVICE_ENDPOINT required");
    let restaurant_endpoint =
        std::env::var("RESTAURANT_SERVICE_ENDPOINT").expect("RESTAURANT_SERVICE_ENDPOINT required");
    let order_endpoint =
        std::env::var("ORDER_SERVICE_ENDPOINT").expect("ORDER_SERVICE_ENDPOINT required");

    let config = ClientConfig {
        auth_endpoint,
        restaurant_endpoint,
        order_endpoint,
        timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
    };
    let state = AppState::new(&config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8100").await?;
    info!("API Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
