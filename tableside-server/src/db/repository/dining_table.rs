//! Dining Table Repository

use super::{BaseRepository, RepoResult, map_create_err};
use crate::db::models::{DiningTable, DiningTableCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All registered tables, ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_no")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find a table by its number
    pub async fn find_by_number(&self, table_no: i64) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_no = $table_no")
            .bind(("table_no", table_no))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Whether a table with this number exists
    pub async fn exists(&self, table_no: i64) -> RepoResult<bool> {
        Ok(self.find_by_number(table_no).await?.is_some())
    }

    /// Register a new table; duplicate numbers are rejected by the
    /// unique index
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let table_no = data.table_no;
        let created: Option<DiningTable> = self
            .base
            .db()
            .create(TABLE)
            .content(data)
            .await
            .map_err(|e| map_create_err(e, &format!("Table {table_no}")))?;
        created.ok_or_else(|| super::RepoError::Database("Failed to create table".into()))
    }
}
