use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DishCategory {
    Entrada,
    PlatoFuerte,
    Postre,
    Bebida,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrador,
    Dueno,
    Empleado,
    Cliente,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendiente,
    EnPreparacion,
    Listo,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "PENDIENTE",
            OrderStatus::EnPreparacion => "EN_PREPARACION",
            OrderStatus::Listo => "LISTO",
            OrderStatus::Entregado => "ENTREGADO",
            OrderStatus::Cancelado => "CANCELADO",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Entregado | OrderStatus::Cancelado)
    }
}

/// Menu entry owned by a restaurant. Prices are integers in minor currency
/// units; only price, description and availability change after creation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Dish {
    pub id: String,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: DishCategory,
    pub price: i64,
    pub available: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderLineItem {
    pub dish_id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price captured when the order was created; later menu edits do
    /// not change it.
    pub unit_price: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub line_items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

impl Order {
    pub fn total_amount(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| item.unit_price * item.quantity as i64)
            .sum()
    }
}
