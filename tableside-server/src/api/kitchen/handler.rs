//! 厨房 API Handlers
//!
//! 实时视图、取消、清台、订单状态流转。
//! 视图返回的价格一律是下单时锁定的 total_price。

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::OrderStatus;
use crate::orders::{LiveOrderLine, OrderView, TableAggregator};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct AllOrdersResponse {
    pub success: bool,
    /// table number → pending orders, oldest first; every registered
    /// table appears, possibly with an empty array
    pub data: BTreeMap<i64, Vec<LiveOrderLine>>,
}

/// GET /api/kitchen/allOrders - 全店实时视图
pub async fn all_orders(State(state): State<ServerState>) -> AppResult<Json<AllOrdersResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    let data = aggregator.list_active_by_table().await?;
    Ok(Json(AllOrdersResponse {
        success: true,
        data,
    }))
}

#[derive(Debug, Serialize)]
pub struct TableOrdersResponse {
    pub success: bool,
    pub orders: Vec<LiveOrderLine>,
}

/// GET /api/kitchen/tableOrders/:tableId - 单桌实时视图
pub async fn table_orders(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<TableOrdersResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    let orders = aggregator.orders_for_table(table_id).await?;
    Ok(Json(TableOrdersResponse {
        success: true,
        orders,
    }))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/kitchen/cancelOrder/:tableId/:orderId - 取消订单 (硬删除)
pub async fn cancel_order(
    State(state): State<ServerState>,
    Path((table_id, order_id)): Path<(i64, String)>,
) -> AppResult<Json<MessageResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    aggregator.cancel_order(table_id, &order_id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Order cancelled".into(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ClearTableResponse {
    pub success: bool,
    pub message: String,
    pub affected: usize,
}

/// POST /api/kitchen/clearTable/:tableId - 清台 (全部转为 served)
pub async fn clear_table(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<ClearTableResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    let affected = aggregator.clear_table(table_id).await?;
    Ok(Json(ClearTableResponse {
        success: true,
        message: format!("All orders for table {table_id} have been marked as served"),
        affected,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdvanceOrderRequest {
    /// Target status; forward-only ("delivered" accepted as alias of
    /// "served")
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct AdvanceOrderResponse {
    pub success: bool,
    pub order: OrderView,
}

/// POST /api/kitchen/advanceOrder/:tableId/:orderId - 状态前进
pub async fn advance_order(
    State(state): State<ServerState>,
    Path((table_id, order_id)): Path<(i64, String)>,
    Json(payload): Json<AdvanceOrderRequest>,
) -> AppResult<Json<AdvanceOrderResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    let order = aggregator
        .advance_order(table_id, &order_id, payload.status)
        .await?;
    Ok(Json(AdvanceOrderResponse {
        success: true,
        order: OrderView::from_order(&order),
    }))
}
