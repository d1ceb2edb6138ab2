use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::Order;
use foodcourt_core::pin;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
pub struct OrderItemRequest {
    pub dish_id: String,
    pub quantity: u32,
}

/// Unit prices are deliberately absent; the order service re-prices from its
/// menu when the order is created.
#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    pub restaurant_id: Uuid,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize)]
struct DeliverRequest<'a> {
    pin: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone)]
pub struct OrderClient {
    http: HttpClient,
}

impl OrderClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(&config.order_endpoint, config.timeout),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.with_token(token),
        }
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        self.http.post("/orders", request).await
    }

    pub async fn get(&self, order_id: Uuid) -> ClientResult<Order> {
        self.http.get(&format!("/orders/{order_id}")).await
    }

    pub async fn list_for_customer(&self, customer_id: Uuid) -> ClientResult<Vec<Order>> {
        let response: ListOrdersResponse = self
            .http
            .get(&format!("/orders?customer_id={customer_id}"))
            .await?;
        Ok(response.orders)
    }

    pub async fn list_for_restaurant(&self, restaurant_id: Uuid) -> ClientResult<Vec<Order>> {
        let response: ListOrdersResponse = self
            .http
            .get(&format!("/orders?restaurant_id={restaurant_id}"))
            .await?;
        Ok(response.orders)
    }

    pub async fn take(&self, order_id: Uuid) -> ClientResult<Order> {
        self.http.post_empty(&format!("/orders/{order_id}/take")).await
    }

    pub async fn mark_ready(&self, order_id: Uuid) -> ClientResult<Order> {
        self.http.post_empty(&format!("/orders/{order_id}/ready")).await
    }

    /// The PIN shape is checked locally; a malformed code never reaches the
    /// service. A mismatch comes back as a business-rule rejection without
    /// revealing the correct value.
    pub async fn deliver(&self, order_id: Uuid, pin: &str) -> ClientResult<Order> {
        if !pin::is_well_formed(pin) {
            return Err(ClientError::MalformedPin);
        }
        self.http
            .post(&format!("/orders/{order_id}/deliver"), &DeliverRequest { pin })
            .await
    }

    pub async fn cancel(&self, order_id: Uuid) -> ClientResult<Order> {
        self.http.post_empty(&format!("/orders/{order_id}/cancel")).await
    }
}
