//! 桌台登记 API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/controller", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/addTable", post(handler::add_table))
}
