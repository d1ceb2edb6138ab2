//! In-memory rendition of the external microservice contracts the food-court
//! app consumes: token-issuing auth, restaurant/menu store, and an order
//! store that enforces the status state machine server-side. Backs local
//! development and the integration suites.

use axum::Router;
use tracing::error;

pub mod auth;
pub mod error;
pub mod orders;
pub mod restaurants;
pub mod state;

pub use state::MockState;

pub fn router(state: MockState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(orders::router())
        .with_state(state)
}

/// Serves the mock on an ephemeral local port and returns its address.
pub async fn spawn(state: MockState) -> std::io::Result<std::net::SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(state)).await {
            error!("mock services stopped: {err}");
        }
    });
    Ok(addr)
}
