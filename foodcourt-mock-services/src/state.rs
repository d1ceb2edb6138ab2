use std::sync::Arc;

use axum::http::HeaderMap;
use dashmap::DashMap;
use uuid::Uuid;

use foodcourt_core::models::{Dish, Order, Role};

use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct StoredRestaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub dishes: Vec<Dish>,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub users: Arc<DashMap<Uuid, MockUser>>,
    pub tokens: Arc<DashMap<String, Uuid>>,
    pub restaurants: Arc<DashMap<Uuid, StoredRestaurant>>,
    pub orders: Arc<DashMap<Uuid, Order>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        restaurant_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(
            id,
            MockUser {
                id,
                username: username.to_string(),
                password: password.to_string(),
                role,
                restaurant_id,
            },
        );
        id
    }

    /// Mints a bearer token directly, letting tests skip the login round.
    pub fn issue_token_for(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    pub fn order(&self, order_id: Uuid) -> Option<Order> {
        self.orders.get(&order_id).map(|entry| entry.value().clone())
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<MockUser, ServiceError> {
        let auth_header = headers
            .get("authorization")
            .ok_or(ServiceError::Unauthorized)?
            .to_str()
            .map_err(|_| ServiceError::Unauthorized)?;
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ServiceError::Unauthorized)?;
        let user_id = *self.tokens.get(token).ok_or(ServiceError::Unauthorized)?;
        self.users
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::Unauthorized)
    }
}
