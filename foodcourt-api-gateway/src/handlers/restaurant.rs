use axum::{
    Router,
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::{get, patch, post},
};
use tracing::instrument;
use uuid::Uuid;

use foodcourt_client::restaurants as restaurant_api;
use foodcourt_core::models::{Dish, Role};

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, authenticate, require_menu_access, require_role};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route("/restaurants/{restaurant_id}", get(get_restaurant))
        .route("/restaurants/{restaurant_id}/dishes", post(create_dish))
        .route("/restaurants/{restaurant_id}/dishes/{dish_id}", patch(update_dish))
}

fn dish_to_response(dish: Dish) -> DishResponse {
    DishResponse {
        id: dish.id,
        name: dish.name,
        description: dish.description,
        image: dish.image,
        category: category_str(dish.category).to_string(),
        price: dish.price,
        available: dish.available,
    }
}

fn restaurant_to_response(restaurant: restaurant_api::Restaurant) -> RestaurantResponse {
    RestaurantResponse {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        dishes: restaurant.dishes.into_iter().map(dish_to_response).collect(),
    }
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants with menus", body = ListRestaurantsResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let listed = state
        .restaurant_client
        .list()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Restaurant service error: {e}")))?;

    Ok(Json(ListRestaurantsResponse {
        restaurants: listed
            .restaurants
            .into_iter()
            .map(restaurant_to_response)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurant_id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant = state.restaurant_client.get(restaurant_id).await?;
    Ok(Json(restaurant_to_response(restaurant)))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant created successfully", body = CreateRestaurantResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "restaurants"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<Json<CreateRestaurantResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Administrador)?;

    let created = state
        .restaurant_client
        .clone()
        .with_token(user.token)
        .create(&restaurant_api::CreateRestaurantRequest {
            name: payload.name,
            address: payload.address,
        })
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Restaurant service error: {e}")))?;

    Ok(Json(CreateRestaurantResponse { id: created.id }))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurant_id}/dishes",
    request_body = CreateDishRequest,
    responses(
        (status = 200, description = "Dish created successfully", body = DishResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "restaurants"
)]
#[instrument(skip(state, payload))]
pub async fn create_dish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<CreateDishRequest>,
) -> Result<Json<DishResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_menu_access(&user, restaurant_id)?;

    let category = parse_category(&payload.category)
        .ok_or_else(|| ApiError::Validation(format!("Unknown category {}", payload.category)))?;
    if payload.price <= 0 {
        return Err(ApiError::Validation("Price must be positive".to_string()));
    }

    let dish = state
        .restaurant_client
        .clone()
        .with_token(user.token)
        .create_dish(
            restaurant_id,
            &restaurant_api::CreateDishRequest {
                id: payload.id,
                name: payload.name,
                description: payload.description,
                image: payload.image,
                category,
                price: payload.price,
            },
        )
        .await?;

    Ok(Json(dish_to_response(dish)))
}

#[utoipa::path(
    patch,
    path = "/restaurants/{restaurant_id}/dishes/{dish_id}",
    request_body = UpdateDishRequest,
    responses(
        (status = 200, description = "Dish updated successfully", body = DishResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Dish not found", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
        ("dish_id" = String, Path, description = "Dish ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "restaurants"
)]
#[instrument(skip(state, payload))]
pub async fn update_dish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((restaurant_id, dish_id)): Path<(Uuid, String)>,
    Json(payload): Json<UpdateDishRequest>,
) -> Result<Json<DishResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_menu_access(&user, restaurant_id)?;

    if matches!(payload.price, Some(price) if price <= 0) {
        return Err(ApiError::Validation("Price must be positive".to_string()));
    }

    let dish = state
        .restaurant_client
        .clone()
        .with_token(user.token)
        .update_dish(
            restaurant_id,
            &dish_id,
            &restaurant_api::UpdateDishRequest {
                price: payload.price,
                description: payload.description,
                available: payload.available,
            },
        )
        .await?;

    Ok(Json(dish_to_response(dish)))
}
