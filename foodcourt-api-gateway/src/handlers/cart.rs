use axum::{
    Router,
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::{get, patch, post},
};
use tracing::instrument;

use foodcourt_core::cart::Cart;
use foodcourt_core::models::Role;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, authenticate, require_role};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_cart_item))
        .route(
            "/cart/items/{dish_id}",
            patch(update_cart_item).delete(remove_cart_item),
        )
}

fn cart_to_response(cart: &Cart) -> CartResponse {
    CartResponse {
        items: cart
            .items()
            .iter()
            .map(|item| CartItemResponse {
                dish_id: item.dish_id.clone(),
                name: item.name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect(),
        restaurant_id: cart.restaurant().map(|binding| binding.id),
        restaurant_name: cart.restaurant().map(|binding| binding.name.clone()),
        total_amount: cart.total_amount(),
        item_count: cart.item_count(),
    }
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Current session cart", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "cart"
)]
#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let session = state.carts.entry(user.id).or_default();
    Ok(Json(cart_to_response(&session.cart)))
}

#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added to the cart", body = CartResponse),
        (status = 400, description = "Invalid quantity or unavailable dish", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Unknown restaurant or dish", body = ApiErrorResponse),
        (status = 409, description = "Cart is bound to another restaurant", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "cart"
)]
#[instrument(skip(state, payload))]
pub async fn add_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    // Resolve the dish before touching the cart; the snapshot (name, price)
    // is what the cart displays until submission re-prices authoritatively.
    let restaurant = state
        .restaurant_client
        .clone()
        .with_token(user.token)
        .get(payload.restaurant_id)
        .await?;
    let dish = restaurant
        .dishes
        .iter()
        .find(|dish| dish.id == payload.dish_id)
        .ok_or_else(|| ApiError::NotFound(format!("Dish {}", payload.dish_id)))?;
    if !dish.available {
        return Err(ApiError::Validation(format!(
            "Dish {} is not available",
            dish.id
        )));
    }

    let mut session = state.carts.entry(user.id).or_default();
    session
        .cart
        .add_item(dish, payload.quantity, &restaurant.name)?;
    Ok(Json(cart_to_response(&session.cart)))
}

#[utoipa::path(
    patch,
    path = "/cart/items/{dish_id}",
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Dish is not in the cart", body = ApiErrorResponse),
    ),
    params(
        ("dish_id" = String, Path, description = "Dish ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "cart"
)]
#[instrument(skip(state, payload))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(dish_id): Path<String>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let mut session = state.carts.entry(user.id).or_default();
    session.cart.update_quantity(&dish_id, payload.quantity)?;
    Ok(Json(cart_to_response(&session.cart)))
}

#[utoipa::path(
    delete,
    path = "/cart/items/{dish_id}",
    responses(
        (status = 200, description = "Item removed", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Dish is not in the cart", body = ApiErrorResponse),
    ),
    params(
        ("dish_id" = String, Path, description = "Dish ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "cart"
)]
#[instrument(skip(state))]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(dish_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let mut session = state.carts.entry(user.id).or_default();
    session.cart.remove_item(&dish_id)?;
    Ok(Json(cart_to_response(&session.cart)))
}

#[utoipa::path(
    delete,
    path = "/cart",
    responses(
        (status = 200, description = "Cart emptied", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "cart"
)]
#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let mut session = state.carts.entry(user.id).or_default();
    session.cart.clear();
    Ok(Json(cart_to_response(&session.cart)))
}
