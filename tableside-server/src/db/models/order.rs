//! Order Model
//!
//! One line-item request tied to exactly one table and one priced portion
//! of a catalog item. `total_price` and `item_name` are denormalized at
//! placement (price lock-in): later catalog edits never touch an order.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status state machine, forward-only:
///
/// ```text
/// created → preparing → ready → served
/// ```
///
/// `served` is terminal and counts toward sales. "delivered" is accepted
/// as an input/display alias of `served`. Cancellation is a hard delete,
/// not a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Preparing,
    Ready,
    #[serde(alias = "delivered")]
    Served,
}

impl OrderStatus {
    /// Position in the pipeline, used for forward-only checks
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Created => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Served => 3,
        }
    }

    /// Whether a transition `self → to` moves forward
    pub fn can_advance_to(self, to: OrderStatus) -> bool {
        to.rank() > self.rank()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Served)
    }

    /// Wire representation ("created", "preparing", "ready", "served")
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Weak reference into the catalog
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    /// Item name captured at placement
    pub item_name: String,
    pub quantity: i64,
    pub portion: String,
    pub table_no: i64,
    pub status: OrderStatus,
    /// Locked in at placement: options[portion] × quantity
    pub total_price: f64,
    /// Unix millis
    pub created_at: i64,
}

impl Order {
    /// "order_item:xxxx" form of the record id
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}

/// Persisted form at placement (id generated by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    pub item_name: String,
    pub quantity: i64,
    pub portion: String,
    pub table_no: i64,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: i64,
}
