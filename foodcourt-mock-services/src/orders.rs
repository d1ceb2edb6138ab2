use axum::{
    Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::models::{Order, OrderLineItem, OrderStatus};

use crate::error::ServiceError;
use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/take", post(take_order))
        .route("/orders/{id}/ready", post(ready_order))
        .route("/orders/{id}/deliver", post(deliver_order))
        .route("/orders/{id}/cancel", post(cancel_order))
}

#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    pub dish_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderPayload {
    pub restaurant_id: Uuid,
    pub items: Vec<OrderItemPayload>,
}

/// The PIN leaves the service only while the order is LISTO.
fn public_view(order: &Order) -> Order {
    let mut view = order.clone();
    if view.status != OrderStatus::Listo {
        view.pin = None;
    }
    view
}

fn generate_pin() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

async fn create_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<Json<Order>, ServiceError> {
    let customer = state.authenticate(&headers)?;

    if payload.items.is_empty() {
        return Err(ServiceError::Invalid("Order has no items".to_string()));
    }

    let restaurant = state
        .restaurants
        .get(&payload.restaurant_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {}", payload.restaurant_id)))?;

    // Authoritative pricing: unit prices come from the menu at creation time,
    // whatever the caller believed.
    let mut line_items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        if item.quantity == 0 {
            return Err(ServiceError::Invalid("Quantity must be positive".to_string()));
        }
        let dish = restaurant
            .dishes
            .iter()
            .find(|d| d.id == item.dish_id)
            .ok_or_else(|| {
                ServiceError::Invalid(format!("Dish {} is not on the menu", item.dish_id))
            })?;
        if !dish.available {
            return Err(ServiceError::Invalid(format!(
                "Dish {} is not available",
                dish.id
            )));
        }
        line_items.push(OrderLineItem {
            dish_id: dish.id.clone(),
            name: dish.name.clone(),
            quantity: item.quantity,
            unit_price: dish.price,
        });
    }
    drop(restaurant);

    let order = Order {
        id: Uuid::new_v4(),
        customer_id: customer.id,
        restaurant_id: payload.restaurant_id,
        line_items,
        status: OrderStatus::Pendiente,
        created_at: Utc::now(),
        employee_id: None,
        pin: None,
    };
    state.orders.insert(order.id, order.clone());
    Ok(Json(public_view(&order)))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub customer_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
}

async fn list_orders(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, ServiceError> {
    state.authenticate(&headers)?;

    let mut orders: Vec<_> = state
        .orders
        .iter()
        .filter(|entry| {
            query
                .customer_id
                .map_or(true, |id| entry.customer_id == id)
                && query
                    .restaurant_id
                    .map_or(true, |id| entry.restaurant_id == id)
        })
        .map(|entry| public_view(&entry))
        .collect();
    orders.sort_by_key(|order| (order.created_at, order.id));
    Ok(Json(ListOrdersResponse { orders }))
}

async fn get_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ServiceError> {
    state.authenticate(&headers)?;
    let order = state
        .orders
        .get(&order_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id}")))?;
    Ok(Json(public_view(&order)))
}

async fn take_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ServiceError> {
    let employee = state.authenticate(&headers)?;
    let mut order = state
        .orders
        .get_mut(&order_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id}")))?;
    order.take(employee.id)?;
    Ok(Json(public_view(&order)))
}

async fn ready_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ServiceError> {
    state.authenticate(&headers)?;
    let mut order = state
        .orders
        .get_mut(&order_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id}")))?;
    order.mark_ready(generate_pin())?;
    Ok(Json(public_view(&order)))
}

#[derive(Debug, Deserialize)]
pub struct DeliverPayload {
    pub pin: String,
}

async fn deliver_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<DeliverPayload>,
) -> Result<Json<Order>, ServiceError> {
    state.authenticate(&headers)?;
    let mut order = state
        .orders
        .get_mut(&order_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id}")))?;
    order.deliver(&payload.pin)?;
    Ok(Json(public_view(&order)))
}

async fn cancel_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ServiceError> {
    state.authenticate(&headers)?;
    let mut order = state
        .orders
        .get_mut(&order_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id}")))?;
    order.cancel()?;
    Ok(Json(public_view(&order)))
}
