use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use foodcourt_core::models::{DishCategory, OrderStatus, Role};

pub fn role_str(role: Role) -> &'static str {
    match role {
        Role::Administrador => "ADMINISTRADOR",
        Role::Dueno => "DUENO",
        Role::Empleado => "EMPLEADO",
        Role::Cliente => "CLIENTE",
    }
}

pub fn parse_role(value: &str) -> Option<Role> {
    match value {
        "ADMINISTRADOR" => Some(Role::Administrador),
        "DUENO" => Some(Role::Dueno),
        "EMPLEADO" => Some(Role::Empleado),
        "CLIENTE" => Some(Role::Cliente),
        _ => None,
    }
}

pub fn category_str(category: DishCategory) -> &'static str {
    match category {
        DishCategory::Entrada => "ENTRADA",
        DishCategory::PlatoFuerte => "PLATO_FUERTE",
        DishCategory::Postre => "POSTRE",
        DishCategory::Bebida => "BEBIDA",
    }
}

pub fn parse_category(value: &str) -> Option<DishCategory> {
    match value {
        "ENTRADA" => Some(DishCategory::Entrada),
        "PLATO_FUERTE" => Some(DishCategory::PlatoFuerte),
        "POSTRE" => Some(DishCategory::Postre),
        "BEBIDA" => Some(DishCategory::Bebida),
        _ => None,
    }
}

pub fn status_str(status: OrderStatus) -> &'static str {
    status.as_str()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Username for the new user
    pub username: String,
    /// Password for the new user
    pub password: String,
    /// Role: ADMINISTRADOR, DUENO, EMPLEADO or CLIENTE
    pub role: String,
    /// Restaurant the owner/employee belongs to
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    /// Unique identifier for the user
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueTokenRequest {
    /// Grant type (must be "password")
    pub grant_type: String,
    /// Username for authentication
    pub username: String,
    /// Password for authentication
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueTokenResponse {
    /// Token type (e.g., "Bearer")
    pub token_type: String,
    /// Access token
    pub access_token: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Unique identifier for the user
    pub user_id: Uuid,
    /// Role resolved from the token
    pub role: String,
    /// Restaurant bound to the owner/employee account
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    /// Name of the restaurant
    pub name: String,
    /// Address of the stall inside the food court
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantResponse {
    /// Unique identifier for the restaurant
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DishResponse {
    /// Menu identifier, unique within the restaurant
    pub id: String,
    /// Name of the dish
    pub name: String,
    /// Description shown to customers
    pub description: String,
    /// Image reference
    pub image: Option<String>,
    /// Category: ENTRADA, PLATO_FUERTE, POSTRE or BEBIDA
    pub category: String,
    /// Price in minor currency units
    pub price: i64,
    /// Whether the dish can currently be ordered
    pub available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    /// Unique identifier for the restaurant
    pub id: Uuid,
    /// Name of the restaurant
    pub name: String,
    /// Address of the stall inside the food court
    pub address: String,
    /// Menu of the restaurant
    pub dishes: Vec<DishResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<RestaurantResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDishRequest {
    /// Menu identifier, unique within the restaurant
    pub id: String,
    /// Name of the dish
    pub name: String,
    /// Description shown to customers
    pub description: String,
    /// Image reference
    pub image: Option<String>,
    /// Category: ENTRADA, PLATO_FUERTE, POSTRE or BEBIDA
    pub category: String,
    /// Price in minor currency units
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDishRequest {
    /// New price in minor currency units
    pub price: Option<i64>,
    /// New description
    pub description: Option<String>,
    /// New availability flag
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    /// Restaurant the dish belongs to
    pub restaurant_id: Uuid,
    /// Menu identifier of the dish
    pub dish_id: String,
    /// Units to add (summed with an existing line)
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// Replacement quantity; zero or negative removes the line
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    /// Menu identifier of the dish
    pub dish_id: String,
    /// Name of the dish
    pub name: String,
    /// Unit price in minor currency units
    pub unit_price: i64,
    /// Units in the cart
    pub quantity: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    /// Restaurant the cart is bound to, absent while empty
    pub restaurant_id: Option<Uuid>,
    /// Cached display name of the bound restaurant
    pub restaurant_name: Option<String>,
    /// Sum of unit price times quantity, minor currency units
    pub total_amount: i64,
    /// Sum of quantities
    pub item_count: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineItemResponse {
    /// Menu identifier of the dish
    pub dish_id: String,
    /// Name captured when the order was created
    pub name: String,
    /// Units ordered
    pub quantity: u32,
    /// Unit price captured when the order was created
    pub unit_price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    /// Unique identifier for the order
    pub id: Uuid,
    /// Customer who placed the order
    pub customer_id: Uuid,
    /// Restaurant preparing the order
    pub restaurant_id: Uuid,
    /// Status: PENDIENTE, EN_PREPARACION, LISTO, ENTREGADO or CANCELADO
    pub status: String,
    pub line_items: Vec<OrderLineItemResponse>,
    /// Sum of unit price times quantity, minor currency units
    pub total_amount: i64,
    /// ISO 8601 creation timestamp
    pub created_at: DateTime<Utc>,
    /// Employee preparing the order, absent while PENDIENTE
    pub employee_id: Option<Uuid>,
    /// Delivery PIN, present in the customer view only while LISTO
    pub pin: Option<String>,
    /// Actions the caller may attempt in the current status
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoardResponse {
    /// Orders awaiting acceptance
    pub pendiente: Vec<OrderResponse>,
    /// Orders being cooked
    pub en_preparacion: Vec<OrderResponse>,
    /// Orders awaiting hand-off
    pub listo: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliverOrderRequest {
    /// PIN read back by the customer at the counter
    pub pin: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
