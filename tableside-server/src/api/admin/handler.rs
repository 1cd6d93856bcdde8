//! 统计与菜单管理 API Handlers
//!
//! 所有统计只读取 served (终态) 订单的锁定价格，每次调用都重新计算。

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsSummary, DailySales, SalesAggregator, TopItem, WeekComparison};
use crate::api::convert::FoodItemView;
use crate::core::ServerState;
use crate::db::models::FoodItemCreate;
use crate::db::repository::FoodItemRepository;
use crate::utils::{AppError, AppResponse, AppResult, time};

/// GET /api/admin/analytics - 组合看板数据
pub async fn analytics(State(state): State<ServerState>) -> AppResult<Json<AnalyticsResponse>> {
    let aggregator = SalesAggregator::new(state.get_db());
    let summary = aggregator.summary().await?;
    Ok(Json(AnalyticsResponse {
        success: true,
        summary,
    }))
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: AnalyticsSummary,
}

/// GET /api/admin/salesToday
pub async fn sales_today(State(state): State<ServerState>) -> AppResult<Json<AppResponse<f64>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(aggregator.sales_today().await?)))
}

/// GET /api/admin/weeklySales
pub async fn weekly_sales(State(state): State<ServerState>) -> AppResult<Json<AppResponse<f64>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(aggregator.weekly_sales().await?)))
}

/// GET /api/admin/totalOrders
pub async fn total_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<usize>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(aggregator.total_orders().await?)))
}

/// GET /api/admin/avgOrderValue
///
/// 按桌平均 (非按单行)，与历史口径保持一致。
pub async fn avg_order_value(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<f64>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(
        aggregator.avg_order_value().await?,
    )))
}

/// GET /api/admin/oneWeekComparison
pub async fn one_week_comparison(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<WeekComparison>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(
        aggregator.one_week_comparison().await?,
    )))
}

#[derive(Debug, Deserialize)]
pub struct TopItemsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

/// GET /api/admin/topItems?limit=5
pub async fn top_items(
    State(state): State<ServerState>,
    Query(query): Query<TopItemsQuery>,
) -> AppResult<Json<AppResponse<Vec<TopItem>>>> {
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(
        aggregator.top_items(query.limit).await?,
    )))
}

/// GET /api/admin/dailyBreakdown/:days
pub async fn daily_breakdown(
    State(state): State<ServerState>,
    Path(days): Path<usize>,
) -> AppResult<Json<AppResponse<Vec<DailySales>>>> {
    if days == 0 || days > 366 {
        return Err(AppError::validation("days must be between 1 and 366"));
    }
    let aggregator = SalesAggregator::new(state.get_db());
    Ok(Json(AppResponse::success(
        aggregator.daily_breakdown(days).await?,
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFoodItemRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub options: Option<BTreeMap<String, f64>>,
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFoodItemResponse {
    pub success: bool,
    pub message: String,
    pub food_item: FoodItemView,
}

/// POST /api/admin/addfooditem - 新增菜品
pub async fn add_food_item(
    State(state): State<ServerState>,
    Json(payload): Json<AddFoodItemRequest>,
) -> AppResult<(StatusCode, Json<AddFoodItemResponse>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("Name is required"))?;
    let category = payload
        .category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::validation("Category is required"))?;
    let options = payload
        .options
        .filter(|o| !o.is_empty())
        .ok_or_else(|| {
            AppError::validation("Options must contain at least one price option")
        })?;
    if options.values().any(|&price| price <= 0.0 || !price.is_finite()) {
        return Err(AppError::validation("Option prices must be positive"));
    }

    let repo = FoodItemRepository::new(state.get_db());
    let item = repo
        .create(FoodItemCreate {
            name,
            description: payload.description,
            options,
            category,
            image_url: payload.image_url,
            is_available: true,
            created_at: time::now_millis(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddFoodItemResponse {
            success: true,
            message: "Food item added successfully!".into(),
            food_item: FoodItemView::from_item(&item),
        }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAvailabilityRequest {
    pub item_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAvailabilityResponse {
    pub success: bool,
    pub message: String,
    pub is_available: bool,
}

/// POST /api/admin/toggleAvl - 切换菜品可售状态
pub async fn toggle_availability(
    State(state): State<ServerState>,
    Json(payload): Json<ToggleAvailabilityRequest>,
) -> AppResult<Json<ToggleAvailabilityResponse>> {
    let item_id = payload
        .item_id
        .ok_or_else(|| AppError::validation("itemId is required"))?;
    let id = FoodItemRepository::parse_id(&item_id)?;

    let repo = FoodItemRepository::new(state.get_db());
    let is_available = repo.toggle_available(&id).await?;

    Ok(Json(ToggleAvailabilityResponse {
        success: true,
        message: format!("Food item availability set to {is_available}"),
        is_available,
    }))
}
