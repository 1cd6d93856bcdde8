//! Database Module
//!
//! Embedded SurrealDB storage. Schema and unique indexes are DEFINEd
//! idempotently at startup; there is no separate migration step.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "tableside";
const DATABASE: &str = "main";

/// Schema definition executed at startup.
///
/// `table_no` and catalog `name` uniqueness are the only storage-enforced
/// contention points; violations surface as duplicate-index errors.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS dining_table SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS unique_table_no ON TABLE dining_table FIELDS table_no UNIQUE;

    DEFINE TABLE IF NOT EXISTS food_item SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS unique_food_name ON TABLE food_item FIELDS name UNIQUE;

    DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS order_table_status ON TABLE order_item FIELDS table_no, status;
    DEFINE INDEX IF NOT EXISTS order_created_at ON TABLE order_item FIELDS created_at;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");
        Ok(Self { db })
    }
}
