//! 厨房 API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::api::ws;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/allOrders", get(handler::all_orders))
        .route("/tableOrders/{tableId}", get(handler::table_orders))
        .route(
            "/cancelOrder/{tableId}/{orderId}",
            post(handler::cancel_order),
        )
        .route("/clearTable/{tableId}", post(handler::clear_table))
        .route(
            "/advanceOrder/{tableId}/{orderId}",
            post(handler::advance_order),
        )
        .route("/ws", get(ws::kitchen_ws))
}
