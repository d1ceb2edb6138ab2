use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::{Dish, DishCategory};

use crate::error::ServiceError;
use crate::state::{MockState, StoredRestaurant};

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/restaurants", post(create_restaurant).get(list_restaurants))
        .route("/restaurants/{id}", get(get_restaurant))
        .route("/restaurants/{id}/dishes", post(create_dish))
        .route("/restaurants/{id}/dishes/{dish_id}", patch(update_dish))
}

#[derive(Debug, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct CreateRestaurantResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Serialize)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<RestaurantResponse>,
}

fn to_response(stored: StoredRestaurant) -> RestaurantResponse {
    RestaurantResponse {
        id: stored.id,
        name: stored.name,
        address: stored.address,
        dishes: stored.dishes,
    }
}

async fn create_restaurant(
    State(state): State<MockState>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<Json<CreateRestaurantResponse>, ServiceError> {
    let id = Uuid::new_v4();
    state.restaurants.insert(
        id,
        StoredRestaurant {
            id,
            name: payload.name,
            address: payload.address,
            dishes: vec![],
        },
    );
    Ok(Json(CreateRestaurantResponse { id }))
}

async fn list_restaurants(
    State(state): State<MockState>,
) -> Json<ListRestaurantsResponse> {
    let mut restaurants: Vec<_> = state
        .restaurants
        .iter()
        .map(|entry| to_response(entry.value().clone()))
        .collect();
    restaurants.sort_by(|a, b| a.name.cmp(&b.name));
    Json(ListRestaurantsResponse { restaurants })
}

async fn get_restaurant(
    State(state): State<MockState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<RestaurantResponse>, ServiceError> {
    let stored = state
        .restaurants
        .get(&restaurant_id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {restaurant_id}")))?;
    Ok(Json(to_response(stored)))
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub category: DishCategory,
    pub price: i64,
}

async fn create_dish(
    State(state): State<MockState>,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<CreateDishRequest>,
) -> Result<Json<Dish>, ServiceError> {
    if payload.price <= 0 {
        return Err(ServiceError::Invalid("Price must be positive".to_string()));
    }

    let mut restaurant = state
        .restaurants
        .get_mut(&restaurant_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {restaurant_id}")))?;
    if restaurant.dishes.iter().any(|d| d.id == payload.id) {
        return Err(ServiceError::Conflict(format!(
            "Dish {} already exists",
            payload.id
        )));
    }

    let dish = Dish {
        id: payload.id,
        restaurant_id,
        name: payload.name,
        description: payload.description,
        image: payload.image,
        category: payload.category,
        price: payload.price,
        available: true,
    };
    restaurant.dishes.push(dish.clone());
    Ok(Json(dish))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDishRequest {
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

async fn update_dish(
    State(state): State<MockState>,
    Path((restaurant_id, dish_id)): Path<(Uuid, String)>,
    Json(payload): Json<UpdateDishRequest>,
) -> Result<Json<Dish>, ServiceError> {
    if matches!(payload.price, Some(price) if price <= 0) {
        return Err(ServiceError::Invalid("Price must be positive".to_string()));
    }

    let mut restaurant = state
        .restaurants
        .get_mut(&restaurant_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {restaurant_id}")))?;
    let dish = restaurant
        .dishes
        .iter_mut()
        .find(|d| d.id == dish_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Dish {dish_id}")))?;

    if let Some(price) = payload.price {
        dish.price = price;
    }
    if let Some(description) = payload.description {
        dish.description = description;
    }
    if let Some(available) = payload.available {
        dish.available = available;
    }
    Ok(Json(dish.clone()))
}
