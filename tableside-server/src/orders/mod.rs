//! 订单域 - 下单、实时桌台视图
//!
//! - [`OrderStore`] - 下单验证、价格锁定、持久化、推送
//! - [`TableAggregator`] - 厨房实时视图与状态流转

pub mod live;
pub mod store;

pub use live::{LiveOrderLine, TableAggregator};
pub use store::{OrderStore, PlaceOrderInput};

use serde::Serialize;

use crate::db::models::{Order, OrderStatus};

/// API/push projection of an order (camelCase wire form)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub portion: String,
    pub table_no: i64,
    pub total_price: f64,
    pub created_at: i64,
    pub status: OrderStatus,
}

impl OrderView {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id_string(),
            item_id: order.item.to_string(),
            item_name: order.item_name.clone(),
            quantity: order.quantity,
            portion: order.portion.clone(),
            table_no: order.table_no,
            total_price: order.total_price,
            created_at: order.created_at,
            status: order.status,
        }
    }
}
