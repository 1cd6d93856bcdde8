//! 点餐 API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/placeOrder", post(handler::place_order))
        .route("/{tableNumber}/currentOrders", get(handler::current_orders))
        .route("/foodData", get(handler::food_data))
        .route("/fetchTables", get(handler::fetch_tables))
}
