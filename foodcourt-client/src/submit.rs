use foodcourt_core::cart::Cart;
use foodcourt_core::models::Order;

use crate::error::{ClientError, ClientResult};
use crate::orders::{CreateOrderRequest, OrderClient, OrderItemRequest};

/// Cart plus submission bookkeeping for one customer. The in-flight flag
/// guards against double submission (rapid double click); it is set before
/// the request goes out and cleared when it settles either way.
#[derive(Debug, Default)]
pub struct OrderSession {
    cart: Cart,
    in_flight: bool,
}

impl OrderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn submitting(&self) -> bool {
        self.in_flight
    }

    /// Turns the cart into an order. An empty cart is rejected locally,
    /// before any network call. On success the cart is cleared; on failure
    /// it is left exactly as it was.
    pub async fn submit(&mut self, orders: &OrderClient) -> ClientResult<Order> {
        if self.in_flight {
            return Err(ClientError::SubmissionInFlight);
        }
        let restaurant_id = match self.cart.restaurant() {
            Some(binding) => binding.id,
            None => return Err(ClientError::EmptyCart),
        };
        let request = CreateOrderRequest {
            restaurant_id,
            items: self
                .cart
                .items()
                .iter()
                .map(|item| OrderItemRequest {
                    dish_id: item.dish_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        self.in_flight = true;
        let result = orders.create(&request).await;
        self.in_flight = false;

        let order = result?;
        self.cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_network_call() {
        // Nothing listens here; the local check must fire first.
        let orders = OrderClient::new(&ClientConfig::for_endpoint("http://127.0.0.1:9"));
        let mut session = OrderSession::new();

        let err = session.submit(&orders).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyCart));
        assert!(!session.submitting());
    }
}
