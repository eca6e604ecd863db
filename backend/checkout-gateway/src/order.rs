//! Contract with the host's order store. The store owns order persistence
//! and status transitions; the orchestrator only requests them and holds the
//! order identifier plus one metadata entry.

use common_enums::Currency;
use common_utils::types::FloatMajorUnit;

/// Host-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderStoreError {
    #[error("order {0} does not exist")]
    NotFound(OrderId),
    #[error("order data could not be persisted")]
    PersistenceFailed,
}

/// Data the host needs to open a pending order for one checkout submission.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub total: FloatMajorUnit,
    pub currency: Currency,
    pub email: Option<String>,
    pub description: Option<String>,
}

/// The host's order store. A pending order is created before any gateway
/// request goes out, so a failed attempt still leaves an auditable record;
/// `Paid` is terminal and the orchestrator never asks to leave it.
pub trait OrderStore: Send + Sync {
    fn create_pending_order(&self, order: &NewOrder) -> Result<OrderId, OrderStoreError>;

    fn status(&self, order_id: OrderId) -> Result<OrderStatus, OrderStoreError>;

    fn mark_paid(&self, order_id: OrderId) -> Result<(), OrderStoreError>;

    /// Store the hosted session id on the order. Set once when the session
    /// is created and read back at confirmation to refuse mismatched
    /// sessions.
    fn set_hosted_session_id(
        &self,
        order_id: OrderId,
        session_id: &str,
    ) -> Result<(), OrderStoreError>;

    fn hosted_session_id(&self, order_id: OrderId) -> Result<Option<String>, OrderStoreError>;
}
