use crate::models::{Order, OrderStatus};

/// Working queues for the kitchen view. Terminal orders are dropped; the
/// input ordering is preserved within each queue.
#[derive(Debug, Default)]
pub struct KitchenBoard {
    pub pendiente: Vec<Order>,
    pub en_preparacion: Vec<Order>,
    pub listo: Vec<Order>,
}

impl KitchenBoard {
    pub fn partition(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut board = KitchenBoard::default();
        for order in orders {
            match order.status {
                OrderStatus::Pendiente => board.pendiente.push(order),
                OrderStatus::EnPreparacion => board.en_preparacion.push(order),
                OrderStatus::Listo => board.listo.push(order),
                OrderStatus::Entregado | OrderStatus::Cancelado => {}
            }
        }
        board
    }
}

/// The customer view shows the PIN exactly while the order is LISTO and a PIN
/// is attached; it disappears as soon as the status moves on.
pub fn visible_pin(order: &Order) -> Option<&str> {
    match order.status {
        OrderStatus::Listo => order.pin.as_deref(),
        _ => None,
    }
}
