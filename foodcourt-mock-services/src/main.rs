use dotenvy::dotenv;
use tracing::info;

use foodcourt_core::models::Role;
use foodcourt_mock_services::MockState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let state = MockState::new();
    state.seed_user("admin", "admin", Role::Administrador, None);
    info!("seeded administrator user admin/admin");

    let addr = std::env::var("MOCK_SERVICES_ADDR").unwrap_or_else(|_| "0.0.0.0:8101".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock services listening on {}", listener.local_addr()?);

    axum::serve(listener, foodcourt_mock_services::router(state)).await?;

    Ok(())
}
