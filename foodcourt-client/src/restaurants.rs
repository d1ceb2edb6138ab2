use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::{Dish, DishCategory};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRestaurantResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Deserialize)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Serialize)]
pub struct CreateDishRequest {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: DishCategory,
    pub price: i64,
}

/// Owner-side dish edit; only price, description and availability are
/// mutable after creation.
#[derive(Debug, Default, Serialize)]
pub struct UpdateDishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct RestaurantClient {
    http: HttpClient,
}

impl RestaurantClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(&config.restaurant_endpoint, config.timeout),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.with_token(token),
        }
    }

    pub async fn list(&self) -> ClientResult<ListRestaurantsResponse> {
        self.http.get("/restaurants").await
    }

    pub async fn get(&self, restaurant_id: Uuid) -> ClientResult<Restaurant> {
        self.http.get(&format!("/restaurants/{restaurant_id}")).await
    }

    pub async fn create(
        &self,
        request: &CreateRestaurantRequest,
    ) -> ClientResult<CreateRestaurantResponse> {
        self.http.post("/restaurants", request).await
    }

    pub async fn create_dish(
        &self,
        restaurant_id: Uuid,
        request: &CreateDishRequest,
    ) -> ClientResult<Dish> {
        self.http
            .post(&format!("/restaurants/{restaurant_id}/dishes"), request)
            .await
    }

    pub async fn update_dish(
        &self,
        restaurant_id: Uuid,
        dish_id: &str,
        request: &UpdateDishRequest,
    ) -> ClientResult<Dish> {
        self.http
            .patch(
                &format!("/restaurants/{restaurant_id}/dishes/{dish_id}"),
                request,
            )
            .await
    }
}
