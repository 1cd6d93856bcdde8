//! Tableside Order Server - 桌边点餐服务
//!
//! # 架构概述
//!
//! 顾客按桌号下单，厨房看板实时查看按桌分组的待处理订单，
//! 管理端查看销售汇总。核心不变量：价格在下单时锁定、订单状态
//! 只向前流转、聚合读取与实时推送最终一致（轮询为权威）。
//!
//! # 模块结构
//!
//! ```text
//! tableside-server/src/
//! ├── core/       # 配置、状态、HTTP 服务器
//! ├── api/        # HTTP 路由和处理器 (user/kitchen/admin/controller)
//! ├── db/         # 嵌入式 SurrealDB 存储 (models + repositories)
//! ├── pricing/    # 菜品份量定价解析
//! ├── orders/     # 下单 (OrderStore) 与实时桌台视图 (TableAggregator)
//! ├── analytics/  # 销售聚合 (SalesAggregator)
//! ├── realtime/   # 厨房推送通道 (RealtimeNotifier)
//! └── utils/      # 错误、日志、时间工具
//! ```

pub mod analytics;
pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod realtime;
pub mod utils;

// Re-export 公共类型
pub use analytics::SalesAggregator;
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStore, TableAggregator};
pub use pricing::PricingResolver;
pub use realtime::RealtimeNotifier;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
