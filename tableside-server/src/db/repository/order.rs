//! Order Repository
//!
//! All statements are single-record or single-statement atomic; bulk
//! transitions use one UPDATE so the affected count is exact.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, OrderStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Parse an order id, accepting both "order_item:xyz" and a bare key
    pub fn parse_id(id: &str) -> RepoResult<RecordId> {
        if id.contains(':') {
            id.parse()
                .map_err(|_| RepoError::Validation(format!("Invalid order ID: {id}")))
        } else {
            Ok(RecordId::from_table_key(TABLE, id))
        }
    }

    /// Persist a new order
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// All active (status == created) orders, oldest first
    pub async fn find_active(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE status = $status ORDER BY created_at ASC")
            .bind(("status", OrderStatus::Created.as_str()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Active orders for one table, oldest first
    pub async fn find_active_by_table(&self, table_no: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order_item WHERE table_no = $table_no AND status = $status \
                 ORDER BY created_at ASC",
            )
            .bind(("table_no", table_no))
            .bind(("status", OrderStatus::Created.as_str()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Delete an order only while it is still `created` and belongs to the
    /// given table. Returns the deleted record, or None when nothing
    /// matched. No trace is retained.
    pub async fn delete_if_created(
        &self,
        table_no: i64,
        order_id: &RecordId,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "DELETE order_item WHERE id = $id AND table_no = $table_no \
                 AND status = $status RETURN BEFORE",
            )
            .bind(("id", order_id.clone()))
            .bind(("table_no", table_no))
            .bind(("status", OrderStatus::Created.as_str()))
            .await?;
        let deleted: Vec<Order> = result.take(0)?;
        Ok(deleted.into_iter().next())
    }

    /// Bulk transition: every order at the table not yet served → served.
    /// One statement, so the returned count is exactly the rows swept.
    pub async fn mark_table_served(&self, table_no: i64) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE order_item SET status = $served \
                 WHERE table_no = $table_no AND status != $served RETURN AFTER",
            )
            .bind(("served", OrderStatus::Served.as_str()))
            .bind(("table_no", table_no))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated)
    }

    /// Compare-and-set status flip for a single order. The `from` guard
    /// keeps the per-record transition atomic without a transaction.
    pub async fn set_status_if(
        &self,
        table_no: i64,
        order_id: &RecordId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE order_item SET status = $to \
                 WHERE id = $id AND table_no = $table_no AND status = $from RETURN AFTER",
            )
            .bind(("to", to.as_str()))
            .bind(("id", order_id.clone()))
            .bind(("table_no", table_no))
            .bind(("from", from.as_str()))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// All served (terminal) orders
    pub async fn find_served(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE status = $status")
            .bind(("status", OrderStatus::Served.as_str()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Served orders with created_at in `[start, end)` (unix millis)
    pub async fn find_served_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order_item WHERE status = $status \
                 AND created_at >= $start AND created_at < $end",
            )
            .bind(("status", OrderStatus::Served.as_str()))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }
}
