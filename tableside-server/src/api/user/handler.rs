//! 点餐 API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{FoodItemView, TableView};
use crate::core::ServerState;
use crate::db::repository::{DiningTableRepository, FoodItemRepository};
use crate::orders::{LiveOrderLine, OrderStore, OrderView, PlaceOrderInput, TableAggregator};
use crate::utils::{AppError, AppResult};

/// Placement payload. Fields are optional so missing ones produce a 400
/// with a per-field message instead of a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub item_id: Option<String>,
    pub quantity: Option<i64>,
    pub portion: Option<String>,
    pub table_no: Option<i64>,
    /// Only "created" is accepted; the server owns every later transition
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderView,
}

/// POST /api/user/placeOrder - 下单
pub async fn place_order(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<PlaceOrderResponse>)> {
    let item_id = payload
        .item_id
        .ok_or_else(|| AppError::validation("Item ID is required"))?;
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::validation("Quantity is required"))?;
    let portion = payload
        .portion
        .ok_or_else(|| AppError::validation("Portion is required"))?;
    let table_no = payload
        .table_no
        .ok_or_else(|| AppError::validation("Table number is required"))?;

    if let Some(status) = &payload.status
        && status != "created"
    {
        return Err(AppError::validation(
            "New orders must have status 'created'",
        ));
    }

    let store = OrderStore::new(state.get_db(), state.notifier.clone());
    let order = store
        .place_order(PlaceOrderInput {
            item_id,
            quantity,
            portion,
            table_no,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            success: true,
            message: "Order placed successfully!".into(),
            order: OrderView::from_order(&order),
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct CurrentOrdersResponse {
    pub success: bool,
    pub orders: Vec<LiveOrderLine>,
}

/// GET /api/user/:tableNumber/currentOrders - 该桌当前待处理订单
pub async fn current_orders(
    State(state): State<ServerState>,
    Path(table_number): Path<i64>,
) -> AppResult<Json<CurrentOrdersResponse>> {
    let aggregator = TableAggregator::new(state.get_db());
    let orders = aggregator.orders_for_table(table_number).await?;
    Ok(Json(CurrentOrdersResponse {
        success: true,
        orders,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDataResponse {
    pub success: bool,
    pub food_items: Vec<FoodItemView>,
}

/// GET /api/user/foodData - 可点菜单 (仅 is_available)
pub async fn food_data(State(state): State<ServerState>) -> AppResult<Json<FoodDataResponse>> {
    let repo = FoodItemRepository::new(state.get_db());
    let items = repo.find_available().await?;
    Ok(Json(FoodDataResponse {
        success: true,
        food_items: items.iter().map(FoodItemView::from_item).collect(),
    }))
}

#[derive(Debug, Serialize)]
pub struct FetchTablesResponse {
    pub success: bool,
    pub tables: Vec<TableView>,
}

/// GET /api/user/fetchTables - 所有桌台
pub async fn fetch_tables(
    State(state): State<ServerState>,
) -> AppResult<Json<FetchTablesResponse>> {
    let repo = DiningTableRepository::new(state.get_db());
    let tables = repo.find_all().await?;
    Ok(Json(FetchTablesResponse {
        success: true,
        tables: tables.iter().map(TableView::from_table).collect(),
    }))
}
