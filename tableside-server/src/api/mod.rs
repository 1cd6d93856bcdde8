//! API 路由模块
//!
//! # 结构
//!
//! - [`user`] - 点餐接口 (下单、当前订单、菜单、桌台列表)
//! - [`kitchen`] - 厨房接口 (实时视图、取消、清台、状态流转、WebSocket)
//! - [`admin`] - 销售统计与菜单管理接口
//! - [`controller`] - 桌台登记接口
//! - [`health`] - 健康检查

pub mod convert;

pub mod admin;
pub mod controller;
pub mod health;
pub mod kitchen;
pub mod user;
pub mod ws;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full route table
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(user::router())
        .merge(kitchen::router())
        .merge(admin::router())
        .merge(controller::router())
        .merge(health::router())
}
