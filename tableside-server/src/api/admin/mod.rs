//! 统计与菜单管理 API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/analytics", get(handler::analytics))
        .route("/salesToday", get(handler::sales_today))
        .route("/weeklySales", get(handler::weekly_sales))
        .route("/totalOrders", get(handler::total_orders))
        .route("/avgOrderValue", get(handler::avg_order_value))
        .route("/oneWeekComparison", get(handler::one_week_comparison))
        .route("/topItems", get(handler::top_items))
        .route("/dailyBreakdown/{days}", get(handler::daily_breakdown))
        .route("/addfooditem", post(handler::add_food_item))
        .route("/toggleAvl", post(handler::toggle_availability))
}
