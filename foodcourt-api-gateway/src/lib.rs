use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod handlers;
pub mod models;

pub use handlers::AppState;

use handlers::{
    ApiDoc, auth_router, cart_router, kitchen_router, order_router, restaurant_router,
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(auth_router())
        .merge(restaurant_router())
        .merge(cart_router())
        .merge(order_router())
        .merge(kitchen_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
