//! 服务器状态
//!
//! [`ServerState`] 持有所有共享组件的单例引用，Clone 成本极低。
//! 除持久化存储和推送通道外，handler 之间没有共享可变状态。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::realtime::RealtimeNotifier;

/// 服务器状态 - HTTP handler 的共享上下文
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | notifier | 厨房推送通道 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub notifier: RealtimeNotifier,
}

impl ServerState {
    /// 初始化服务器状态 (磁盘数据库)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create database directory");
        }

        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self {
            notifier: RealtimeNotifier::new(config.channel_capacity),
            config: config.clone(),
            db: db_service.db,
        }
    }

    /// 内存数据库状态，测试用
    pub async fn in_memory(config: Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self {
            notifier: RealtimeNotifier::new(config.channel_capacity),
            config,
            db: db_service.db,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
