use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Take,
    Cancel,
    MarkReady,
    Deliver,
}

impl OrderAction {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderAction::Take => "take",
            OrderAction::Cancel => "cancel",
            OrderAction::MarkReady => "ready",
            OrderAction::Deliver => "deliver",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid current state {from:?} for action {action:?}")]
    InvalidTransition {
        from: OrderStatus,
        action: OrderAction,
    },
    #[error("Delivery PIN does not match")]
    WrongPin,
}

impl OrderStatus {
    pub fn permits(self, action: OrderAction) -> bool {
        matches!(
            (self, action),
            (OrderStatus::Pendiente, OrderAction::Take)
                | (OrderStatus::Pendiente, OrderAction::Cancel)
                | (OrderStatus::EnPreparacion, OrderAction::MarkReady)
                | (OrderStatus::Listo, OrderAction::Deliver)
        )
    }

    pub fn permitted_actions(self) -> &'static [OrderAction] {
        match self {
            OrderStatus::Pendiente => &[OrderAction::Take, OrderAction::Cancel],
            OrderStatus::EnPreparacion => &[OrderAction::MarkReady],
            OrderStatus::Listo => &[OrderAction::Deliver],
            OrderStatus::Entregado | OrderStatus::Cancelado => &[],
        }
    }
}

impl Order {
    fn check(&self, action: OrderAction) -> Result<(), TransitionError> {
        if self.status.permits(action) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }

    /// PENDIENTE → EN_PREPARACION, recording the employee who took it.
    pub fn take(&mut self, employee_id: Uuid) -> Result<(), TransitionError> {
        self.check(OrderAction::Take)?;
        self.status = OrderStatus::EnPreparacion;
        self.employee_id = Some(employee_id);
        Ok(())
    }

    /// PENDIENTE → CANCELADO. No PIN is ever issued for a cancelled order.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.check(OrderAction::Cancel)?;
        self.status = OrderStatus::Cancelado;
        Ok(())
    }

    /// EN_PREPARACION → LISTO, attaching the delivery PIN.
    pub fn mark_ready(&mut self, pin: String) -> Result<(), TransitionError> {
        self.check(OrderAction::MarkReady)?;
        self.status = OrderStatus::Listo;
        self.pin = Some(pin);
        Ok(())
    }

    /// LISTO → ENTREGADO when the candidate PIN matches. A mismatch leaves
    /// the order and its PIN untouched; the caller may retry.
    pub fn deliver(&mut self, candidate: &str) -> Result<(), TransitionError> {
        self.check(OrderAction::Deliver)?;
        if self.pin.as_deref() != Some(candidate) {
            return Err(TransitionError::WrongPin);
        }
        self.status = OrderStatus::Entregado;
        Ok(())
    }
}
