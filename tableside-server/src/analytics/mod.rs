//! Sales Aggregator
//!
//! Read-only rollups over orders in the terminal `served` status. Every
//! figure is computed fresh on each call; there are no materialized or
//! incremental totals. Fine at restaurant scale; this is the primary
//! scalability limit of the design.
//!
//! Calendar-day boundaries are server-local; ranges are half-open
//! `[start, end)` on `created_at`.

use std::collections::BTreeMap;

use chrono::Duration;
use rust_decimal::prelude::*;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::utils::{AppResult, time};

/// One calendar day of sales
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// YYYY-MM-DD, local calendar
    pub date: String,
    pub total_sales: f64,
    pub order_count: usize,
}

/// Top-selling item row
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

/// This trailing week vs. the one before it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekComparison {
    pub this_week: f64,
    pub previous_week: f64,
}

/// Combined dashboard payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub dates: Vec<String>,
    pub daily_sales: Vec<f64>,
    pub daily_orders: Vec<usize>,
    pub weekly_sales: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
    pub today_sales: f64,
    pub top_items: Vec<TopItem>,
}

const TREND_DAYS: usize = 7;
const TOP_ITEMS_LIMIT: usize = 5;

fn round2(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn sum_totals(orders: &[Order]) -> f64 {
    round2(
        orders
            .iter()
            .map(|o| Decimal::from_f64(o.total_price).unwrap_or_default())
            .sum(),
    )
}

#[derive(Clone)]
pub struct SalesAggregator {
    orders: OrderRepository,
}

impl SalesAggregator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db),
        }
    }

    /// Sum of locked-in totals for served orders with
    /// `created_at ∈ [start, end)`
    pub async fn sales_for_range(&self, start: i64, end: i64) -> AppResult<f64> {
        let orders = self.orders.find_served_in_range(start, end).await?;
        Ok(sum_totals(&orders))
    }

    /// Today's sales (local calendar day, partial day included)
    pub async fn sales_today(&self) -> AppResult<f64> {
        let today = time::today_local();
        self.sales_for_range(time::day_start_millis(today), time::day_end_millis(today))
            .await
    }

    /// Trailing 7 local days including today
    pub async fn weekly_sales(&self) -> AppResult<f64> {
        let today = time::today_local();
        let start = time::day_start_millis(today - Duration::days(6));
        self.sales_for_range(start, time::day_end_millis(today)).await
    }

    /// Served order count over the trailing 7 local days
    pub async fn total_orders(&self) -> AppResult<usize> {
        let today = time::today_local();
        let start = time::day_start_millis(today - Duration::days(6));
        let orders = self
            .orders
            .find_served_in_range(start, time::day_end_millis(today))
            .await?;
        Ok(orders.len())
    }

    /// Trailing week vs. the 7 days before it
    pub async fn one_week_comparison(&self) -> AppResult<WeekComparison> {
        let today = time::today_local();
        let this_start = time::day_start_millis(today - Duration::days(6));
        let prev_start = time::day_start_millis(today - Duration::days(13));
        let this_week = self
            .sales_for_range(this_start, time::day_end_millis(today))
            .await?;
        let previous_week = self.sales_for_range(prev_start, this_start).await?;
        Ok(WeekComparison {
            this_week,
            previous_week,
        })
    }

    /// The `n` most recent consecutive local calendar days ending today,
    /// oldest first
    pub async fn daily_breakdown(&self, n: usize) -> AppResult<Vec<DailySales>> {
        let today = time::today_local();
        let mut days = Vec::with_capacity(n);
        for i in (0..n).rev() {
            let date = today - Duration::days(i as i64);
            let orders = self
                .orders
                .find_served_in_range(time::day_start_millis(date), time::day_end_millis(date))
                .await?;
            days.push(DailySales {
                date: date.format("%Y-%m-%d").to_string(),
                total_sales: sum_totals(&orders),
                order_count: orders.len(),
            });
        }
        Ok(days)
    }

    /// Items ranked by total quantity sold (served orders only).
    ///
    /// Ties are broken by item name ascending, so the ranking is stable
    /// across calls regardless of insertion order.
    pub async fn top_items(&self, limit: usize) -> AppResult<Vec<TopItem>> {
        let orders = self.orders.find_served().await?;

        let mut by_name: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
        for order in &orders {
            let entry = by_name
                .entry(order.item_name.clone())
                .or_insert((0, Decimal::ZERO));
            entry.0 += order.quantity;
            entry.1 += Decimal::from_f64(order.total_price).unwrap_or_default();
        }

        // BTreeMap iteration is name-ascending; the stable sort by
        // quantity keeps that as the tie-break.
        let mut items: Vec<TopItem> = by_name
            .into_iter()
            .map(|(name, (qty, revenue))| TopItem {
                name,
                total_quantity: qty,
                total_revenue: round2(revenue),
            })
            .collect();
        items.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        items.truncate(limit);
        Ok(items)
    }

    /// Average order value, defined **per table**: total served revenue
    /// divided by the number of distinct tables with at least one served
    /// order. Not a per-line average; the historical definition is
    /// preserved as-is so dashboards keep reading the same figure.
    pub async fn avg_order_value(&self) -> AppResult<f64> {
        let orders = self.orders.find_served().await?;
        if orders.is_empty() {
            return Ok(0.0);
        }

        let mut per_table: BTreeMap<i64, Decimal> = BTreeMap::new();
        for order in &orders {
            *per_table.entry(order.table_no).or_insert(Decimal::ZERO) +=
                Decimal::from_f64(order.total_price).unwrap_or_default();
        }

        let total: Decimal = per_table.values().copied().sum();
        Ok(round2(total / Decimal::from(per_table.len())))
    }

    /// Everything the admin dashboard shows, in one call
    pub async fn summary(&self) -> AppResult<AnalyticsSummary> {
        let trend = self.daily_breakdown(TREND_DAYS).await?;
        Ok(AnalyticsSummary {
            dates: trend.iter().map(|d| d.date.clone()).collect(),
            daily_sales: trend.iter().map(|d| d.total_sales).collect(),
            daily_orders: trend.iter().map(|d| d.order_count).collect(),
            weekly_sales: self.weekly_sales().await?,
            total_orders: self.total_orders().await?,
            avg_order_value: self.avg_order_value().await?,
            today_sales: self.sales_today().await?,
            top_items: self.top_items(TOP_ITEMS_LIMIT).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{OrderCreate, OrderStatus};
    use surrealdb::RecordId;

    async fn setup() -> (SalesAggregator, Surreal<Db>) {
        let db = DbService::memory().await.unwrap().db;
        (SalesAggregator::new(db.clone()), db)
    }

    async fn seed(
        db: &Surreal<Db>,
        table_no: i64,
        name: &str,
        quantity: i64,
        total: f64,
        created_at: i64,
        status: OrderStatus,
    ) {
        OrderRepository::new(db.clone())
            .create(OrderCreate {
                item: RecordId::from_table_key("food_item", "seed"),
                item_name: name.into(),
                quantity,
                portion: "full".into(),
                table_no,
                status,
                total_price: total,
                created_at,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn range_is_half_open_and_served_only() {
        let (agg, db) = setup().await;
        seed(&db, 1, "Dal", 1, 100.0, 1_000, OrderStatus::Served).await;
        seed(&db, 1, "Naan", 1, 50.0, 2_000, OrderStatus::Served).await;
        // boundary: end is exclusive
        seed(&db, 1, "Edge", 1, 25.0, 3_000, OrderStatus::Served).await;
        // pending orders never count
        seed(&db, 1, "Pending", 1, 999.0, 1_500, OrderStatus::Created).await;

        let total = agg.sales_for_range(1_000, 3_000).await.unwrap();
        assert_eq!(total, 150.0);
    }

    #[tokio::test]
    async fn avg_order_value_is_per_table() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        // table 1 revenue 100+50, table 2 revenue 200
        seed(&db, 1, "A", 1, 100.0, now, OrderStatus::Served).await;
        seed(&db, 1, "B", 1, 50.0, now, OrderStatus::Served).await;
        seed(&db, 2, "C", 1, 200.0, now, OrderStatus::Served).await;

        let avg = agg.avg_order_value().await.unwrap();
        assert_eq!(avg, 175.0); // (150 + 200) / 2, not 350 / 3
    }

    #[tokio::test]
    async fn avg_order_value_empty_store_is_zero() {
        let (agg, _db) = setup().await;
        assert_eq!(agg.avg_order_value().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn top_items_rank_by_quantity_then_name() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        seed(&db, 1, "Naan", 3, 60.0, now, OrderStatus::Served).await;
        seed(&db, 1, "Dal", 2, 80.0, now, OrderStatus::Served).await;
        seed(&db, 2, "Dal", 3, 120.0, now, OrderStatus::Served).await;
        // same quantity as Naan: name ascending breaks the tie
        seed(&db, 2, "Biryani", 3, 300.0, now, OrderStatus::Served).await;

        let items = agg.top_items(5).await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Dal");
        assert_eq!(items[0].total_quantity, 5);
        assert_eq!(items[0].total_revenue, 200.0);
        // Biryani and Naan both at 3: Biryani first
        assert_eq!(items[1].name, "Biryani");
        assert_eq!(items[2].name, "Naan");
    }

    #[tokio::test]
    async fn top_items_honors_limit() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        seed(&db, 1, "A", 3, 30.0, now, OrderStatus::Served).await;
        seed(&db, 1, "B", 2, 20.0, now, OrderStatus::Served).await;
        seed(&db, 1, "C", 1, 10.0, now, OrderStatus::Served).await;

        let items = agg.top_items(2).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "A");
    }

    #[tokio::test]
    async fn daily_breakdown_covers_n_days_ending_today() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        seed(&db, 1, "Dal", 1, 240.0, now, OrderStatus::Served).await;

        let days = agg.daily_breakdown(7).await.unwrap();
        assert_eq!(days.len(), 7);
        let today = days.last().unwrap();
        assert_eq!(today.date, time::today_local().format("%Y-%m-%d").to_string());
        assert_eq!(today.total_sales, 240.0);
        assert_eq!(today.order_count, 1);
        // earlier days are empty
        assert!(days[..6].iter().all(|d| d.total_sales == 0.0));
    }

    #[tokio::test]
    async fn weekly_comparison_splits_trailing_windows() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        let ten_days_ago = now - 10 * 24 * 3600 * 1000;
        seed(&db, 1, "New", 1, 300.0, now, OrderStatus::Served).await;
        seed(&db, 1, "Old", 1, 120.0, ten_days_ago, OrderStatus::Served).await;

        let cmp = agg.one_week_comparison().await.unwrap();
        assert_eq!(cmp.this_week, 300.0);
        assert_eq!(cmp.previous_week, 120.0);

        assert_eq!(agg.weekly_sales().await.unwrap(), 300.0);
        assert_eq!(agg.total_orders().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn summary_is_consistent_with_parts() {
        let (agg, db) = setup().await;
        let now = time::now_millis();
        seed(&db, 5, "Paneer Tikka", 2, 240.0, now, OrderStatus::Served).await;

        let summary = agg.summary().await.unwrap();
        assert_eq!(summary.dates.len(), 7);
        assert_eq!(summary.today_sales, 240.0);
        assert_eq!(summary.weekly_sales, 240.0);
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.avg_order_value, 240.0);
        assert_eq!(summary.top_items[0].name, "Paneer Tikka");
    }
}
