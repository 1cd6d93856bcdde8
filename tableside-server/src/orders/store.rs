//! Order Store
//!
//! Placement path: validate → verify table → resolve price → lock in
//! total → persist → push. The pushed event is fire-and-forget; a
//! notification failure never fails the placement.
//!
//! There is no idempotency key: a client retry after a timeout creates a
//! second order. Accepted gap, pinned by a test below.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Order, OrderCreate, OrderStatus};
use crate::db::repository::{DiningTableRepository, FoodItemRepository, OrderRepository};
use crate::pricing::{self, PricingResolver};
use crate::realtime::RealtimeNotifier;
use crate::utils::{AppError, AppResult, time};

/// Validated placement request
#[derive(Debug, Clone)]
pub struct PlaceOrderInput {
    pub item_id: String,
    pub quantity: i64,
    pub portion: String,
    pub table_no: i64,
}

#[derive(Clone)]
pub struct OrderStore {
    tables: DiningTableRepository,
    orders: OrderRepository,
    pricing: PricingResolver,
    notifier: RealtimeNotifier,
}

impl OrderStore {
    pub fn new(db: Surreal<Db>, notifier: RealtimeNotifier) -> Self {
        Self {
            tables: DiningTableRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            pricing: PricingResolver::new(db),
            notifier,
        }
    }

    /// Place a single line-item order.
    ///
    /// The returned order's `total_price` is final; nothing in the system
    /// recomputes it afterwards.
    pub async fn place_order(&self, input: PlaceOrderInput) -> AppResult<Order> {
        if input.quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        if input.portion.trim().is_empty() {
            return Err(AppError::validation("Portion is required"));
        }
        if input.table_no < 1 {
            return Err(AppError::validation("Table number must be positive"));
        }

        if !self.tables.exists(input.table_no).await? {
            return Err(AppError::not_found(format!(
                "Table number {} does not exist",
                input.table_no
            )));
        }

        let item_id = FoodItemRepository::parse_id(&input.item_id)?;
        let (item, unit_price) = self.pricing.resolve(&item_id, &input.portion).await?;

        let total_price = pricing::line_total(unit_price, input.quantity);

        let order = self
            .orders
            .create(OrderCreate {
                item: item.id.clone().ok_or_else(|| {
                    AppError::internal("Catalog entry has no record id")
                })?,
                item_name: item.name.clone(),
                quantity: input.quantity,
                portion: input.portion.clone(),
                table_no: input.table_no,
                status: OrderStatus::Created,
                total_price,
                created_at: time::now_millis(),
            })
            .await?;

        tracing::info!(
            table_no = order.table_no,
            item = %order.item_name,
            total = order.total_price,
            "order placed"
        );

        // Latency hint only; the kitchen poll is the source of truth.
        self.notifier.broadcast_new_order(&order);

        Ok(order)
    }
}
