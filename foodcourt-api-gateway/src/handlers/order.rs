use axum::{
    Router,
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::post,
};
use tracing::instrument;
use uuid::Uuid;

use foodcourt_client::orders::{CreateOrderRequest, OrderItemRequest};
use foodcourt_core::board;
use foodcourt_core::models::{Order, Role};

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, authenticate, require_role};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(submit_order).get(list_my_orders))
        .route("/orders/{id}/cancel", post(cancel_order))
}

/// The PIN is included only for the customer view, and only while the order
/// is LISTO; the kitchen board never carries it.
pub(super) fn order_to_response(order: Order, include_pin: bool) -> OrderResponse {
    let pin = if include_pin {
        board::visible_pin(&order).map(str::to_string)
    } else {
        None
    };
    let total_amount = order.total_amount();
    let actions = order
        .status
        .permitted_actions()
        .iter()
        .map(|action| action.as_str().to_string())
        .collect();

    OrderResponse {
        id: order.id,
        customer_id: order.customer_id,
        restaurant_id: order.restaurant_id,
        status: status_str(order.status).to_string(),
        line_items: order
            .line_items
            .into_iter()
            .map(|item| OrderLineItemResponse {
                dish_id: item.dish_id,
                name: item.name,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
        total_amount,
        created_at: order.created_at,
        employee_id: order.employee_id,
        pin,
        actions,
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    responses(
        (status = 200, description = "Order created from the session cart", body = OrderResponse),
        (status = 400, description = "Cart is empty", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 409, description = "A submission is already in flight", body = ApiErrorResponse),
        (status = 422, description = "Rejected by the order service", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    // Reserve the submission under the entry lock, then release it before the
    // network call.
    let request = {
        let mut session = state.carts.entry(user.id).or_default();
        if session.submitting {
            return Err(ApiError::Conflict(
                "An order submission is already in flight".to_string(),
            ));
        }
        let restaurant_id = match session.cart.restaurant() {
            Some(binding) => binding.id,
            None => return Err(ApiError::Validation("Cart is empty".to_string())),
        };
        session.submitting = true;
        CreateOrderRequest {
            restaurant_id,
            items: session
                .cart
                .items()
                .iter()
                .map(|item| OrderItemRequest {
                    dish_id: item.dish_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    };

    let result = state
        .order_client
        .clone()
        .with_token(user.token.clone())
        .create(&request)
        .await;

    let mut session = state.carts.entry(user.id).or_default();
    session.submitting = false;
    let order = match result {
        Ok(order) => order,
        // A failed submission leaves the cart exactly as it was.
        Err(err) => return Err(err.into()),
    };
    session.cart.clear();
    drop(session);

    Ok(Json(order_to_response(order, true)))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders of the signed-in customer", body = ListOrdersResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 503, description = "Service unavailable", body = ApiErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn list_my_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let orders = state
        .order_client
        .clone()
        .with_token(user.token)
        .list_for_customer(user.id)
        .await?;

    Ok(Json(ListOrdersResponse {
        orders: orders
            .into_iter()
            .map(|order| order_to_response(order, true))
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 403, description = "Not the owner of the order", body = ApiErrorResponse),
        (status = 404, description = "Order not found", body = ApiErrorResponse),
        (status = 422, description = "Order is no longer PENDIENTE", body = ApiErrorResponse),
    ),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "orders"
)]
#[instrument(skip(state))]
pub async fn cancel_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user = authenticate(&headers, &state).await?;
    require_role(&user, Role::Cliente)?;

    let client = state.order_client.clone().with_token(user.token.clone());
    let order = client.get(order_id).await?;
    if order.customer_id != user.id {
        return Err(ApiError::Forbidden);
    }

    let cancelled = client.cancel(order_id).await?;
    Ok(Json(order_to_response(cancelled, true)))
}
