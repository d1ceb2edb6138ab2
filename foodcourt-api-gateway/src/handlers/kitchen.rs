use axum::{
    Router,
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::{get, post},
};
use tracing::instrument;
use uuid::Uuid;

use foodcourt_client::orders::OrderClient;
use foodcourt_core::board::KitchenBoard;
use foodcourt_core::models::Order;

use crate::error::ApiError;
use crate::models::*;

use super::order::order_to_response;
use super::{AppState, authenticate, require_kitchen_access};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants/{restaurant_id}/board", get(get_board))
        .route(
            "/restaurants/{restaurant_id}/orders/{order_id}/take",
            post(take_order),
        )
        .route(
            "/restaurants/{restaurant_id}/orders/{order_id}/ready",
            post(ready_order),
        )
        .route(
            "/restaurants/{restaurant_id}/orders/{order_id}/deliver",
            post(deliver_order),
        )
        .route(
            "/restaurants/{restaurant_id}/orders/{order_id}/cancel",
            post(cancel_order),
        )
}

/// Loads the order and checks it belongs to the restaurant in the path.
async fn scoped_order(
    client: &OrderClient,
    restaurant_id: Uuid,
    order_id: Uuid,
) -> Result<Order, ApiError> {
    let order = client.get(order_id).await?;
    if order.restaurant_id != restaurant_id {
        return Err(ApiError::NotFound(format!("Order {order_id}")));
    }
    Ok(order)
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurant_id}/board",
    responses(
        (status = 200, description = "Working queues for the kitchen", body = BoardResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "kitchen"
)]
#[instrument(skip(state))]
pub async fn get_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<BoardResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_kitchen_access(&user, restaurant_id)?;

    let orders = state
        .order_client
        .clone()
        .with_token(user.token)
        .list_for_restaurant(restaurant_id)
        .await?;

    let board = KitchenBoard::partition(orders);
    let to_responses = |orders: Vec<Order>| {
        orders
            .into_iter()
            .map(|order| order_to_response(order, false))
            .collect()
    };

    Ok(Json(BoardResponse {
        pendiente: to_responses(board.pendiente),
        en_preparacion: to_responses(board.en_preparacion),
        listo: to_responses(board.listo),
    }))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurant_id}/orders/{order_id}/take",
    responses(
        (status = 200, description = "Order taken for preparation", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 422, description = "Order is not PENDIENTE", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "kitchen"
)]
#[instrument(skip(state))]
pub async fn take_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((restaurant_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_kitchen_access(&user, restaurant_id)?;

    let client = state.order_client.clone().with_token(user.token.clone());
    scoped_order(&client, restaurant_id, order_id).await?;

    let order = client.take(order_id).await?;
    Ok(Json(order_to_response(order, false)))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurant_id}/orders/{order_id}/ready",
    responses(
        (status = 200, description = "Order marked ready; the customer now sees the PIN", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 422, description = "Order is not EN_PREPARACION", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "kitchen"
)]
#[instrument(skip(state))]
pub async fn ready_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((restaurant_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_kitchen_access(&user, restaurant_id)?;

    let client = state.order_client.clone().with_token(user.token.clone());
    scoped_order(&client, restaurant_id, order_id).await?;

    let order = client.mark_ready(order_id).await?;
    Ok(Json(order_to_response(order, false)))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurant_id}/orders/{order_id}/deliver",
    request_body = DeliverOrderRequest,
    responses(
        (status = 200, description = "Order delivered", body = OrderResponse),
        (status = 400, description = "Malformed PIN", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 422, description = "PIN mismatch or order not LISTO", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "kitchen"
)]
#[instrument(skip(state, payload))]
pub async fn deliver_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((restaurant_id, order_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DeliverOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_kitchen_access(&user, restaurant_id)?;

    let client = state.order_client.clone().with_token(user.token.clone());
    scoped_order(&client, restaurant_id, order_id).await?;

    // Wrong PIN comes back as a business-rule rejection; the order stays
    // LISTO and the employee may retry with what the customer reads back.
    let order = client.deliver(order_id, &payload.pin).await?;
    Ok(Json(order_to_response(order, false)))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurant_id}/orders/{order_id}/cancel",
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Forbidden", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 422, description = "Order is no longer PENDIENTE", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "kitchen"
)]
#[instrument(skip(state))]
pub async fn cancel_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((restaurant_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_kitchen_access(&user, restaurant_id)?;

    let client = state.order_client.clone().with_token(user.token.clone());
    scoped_order(&client, restaurant_id, order_id).await?;

    let order = client.cancel(order_id).await?;
    Ok(Json(order_to_response(order, false)))
}
