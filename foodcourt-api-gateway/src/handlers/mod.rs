pub mod auth;
pub mod cart;
pub mod kitchen;
pub mod order;
pub mod restaurant;

// Re-export routers for easier importing
pub use auth::router as auth_router;
pub use cart::router as cart_router;
pub use kitchen::router as kitchen_router;
pub use order::router as order_router;
pub use restaurant::router as restaurant_router;

use std::sync::Arc;

use axum::http::HeaderMap;
use dashmap::DashMap;
use utoipa::OpenApi;
use uuid::Uuid;

use foodcourt_client::auth::AuthClient;
use foodcourt_client::orders::OrderClient;
use foodcourt_client::restaurants::RestaurantClient;
use foodcourt_client::{ClientConfig, ClientError};
use foodcourt_core::cart::Cart;
use foodcourt_core::models::Role;

use crate::error::ApiError;

/// One session cart per signed-in customer. The entry lock makes the
/// invariant check and the mutation atomic; the submission flag guards
/// against double submission.
#[derive(Debug, Default)]
pub struct CartSession {
    pub cart: Cart,
    pub submitting: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_client: AuthClient,
    pub restaurant_client: RestaurantClient,
    pub order_client: OrderClient,
    pub carts: Arc<DashMap<Uuid, CartSession>>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            auth_client: AuthClient::new(config),
            restaurant_client: RestaurantClient::new(config),
            order_client: OrderClient::new(config),
            carts: Arc::new(DashMap::new()),
        }
    }
}

/// Role and scope resolved once per request from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
    pub restaurant_id: Option<Uuid>,
    pub token: String,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(ApiError::AuthenticationFailed)?
        .to_str()
        .map_err(|_| ApiError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::InvalidToken)
}

pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<CurrentUser, ApiError> {
    let token = bearer_token(headers)?;

    let info = state.auth_client.token_info(token).await.map_err(|e| match e {
        ClientError::Unauthorized => ApiError::InvalidToken,
        other => ApiError::ServiceUnavailable(format!("Auth service error: {other}")),
    })?;

    Ok(CurrentUser {
        id: info.user_id,
        role: info.role,
        restaurant_id: info.restaurant_id,
        token: token.to_string(),
    })
}

pub fn require_role(user: &CurrentUser, role: Role) -> Result<(), ApiError> {
    if user.role == role {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Menus are mutated only through the owning restaurant's management flow;
/// administrators may act on any restaurant.
pub fn require_menu_access(user: &CurrentUser, restaurant_id: Uuid) -> Result<(), ApiError> {
    match user.role {
        Role::Administrador => Ok(()),
        Role::Dueno if user.restaurant_id == Some(restaurant_id) => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

/// Kitchen queues and status transitions belong to the restaurant's
/// employees; administrators may act on any restaurant.
pub fn require_kitchen_access(user: &CurrentUser, restaurant_id: Uuid) -> Result<(), ApiError> {
    match user.role {
        Role::Administrador => Ok(()),
        Role::Empleado if user.restaurant_id == Some(restaurant_id) => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::create_user,
        auth::issue_token,
        auth::get_profile,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::create_restaurant,
        restaurant::create_dish,
        restaurant::update_dish,
        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        order::submit_order,
        order::list_my_orders,
        order::cancel_order,
        kitchen::get_board,
        kitchen::take_order,
        kitchen::ready_order,
        kitchen::deliver_order,
        kitchen::cancel_order,
    ),
    components(
        schemas(
            crate::models::CreateUserRequest,
            crate::models::CreateUserResponse,
            crate::models::IssueTokenRequest,
            crate::models::IssueTokenResponse,
            crate::models::ProfileResponse,
            crate::models::CreateRestaurantRequest,
            crate::models::CreateRestaurantResponse,
            crate::models::DishResponse,
            crate::models::RestaurantResponse,
            crate::models::ListRestaurantsResponse,
            crate::models::CreateDishRequest,
            crate::models::UpdateDishRequest,
            crate::models::AddCartItemRequest,
            crate::models::UpdateCartItemRequest,
            crate::models::CartItemResponse,
            crate::models::CartResponse,
            crate::models::OrderLineItemResponse,
            crate::models::OrderResponse,
            crate::models::ListOrdersResponse,
            crate::models::BoardResponse,
            crate::models::DeliverOrderRequest,
            crate::models::ApiErrorResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "restaurants", description = "Restaurant and menu endpoints"),
        (name = "cart", description = "Customer session cart endpoints"),
        (name = "orders", description = "Order submission and tracking endpoints"),
        (name = "kitchen", description = "Employee kitchen board endpoints")
    ),
    info(
        title = "Food Court API Gateway",
        description = "API Gateway for the food-court ordering services",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::*;
            let password_flow = Password::new("/auth/token", Scopes::default());
            components.add_security_scheme(
                "bearer",
                SecurityScheme::OAuth2(OAuth2::new([Flow::Password(password_flow)])),
            );
        }
    }
}
