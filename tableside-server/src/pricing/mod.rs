//! Pricing Resolver
//!
//! Resolves a catalog item + portion key to a unit price. Pure read; the
//! resolver never mutates the catalog and never enforces `is_available`
//! (placement callers decide that policy, analytics reads must not).
//!
//! Monetary arithmetic uses `Decimal` internally and converts to `f64`
//! for storage/serialization, rounded half-up to 2 decimal places.

use rust_decimal::prelude::*;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use crate::db::models::FoodItem;
use crate::db::repository::FoodItemRepository;
use crate::utils::{AppError, AppResult};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Line total = unit price × quantity, rounded to 2 dp
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    let unit = Decimal::from_f64(unit_price).unwrap_or_default();
    let total = unit * Decimal::from(quantity);
    total
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(unit_price * quantity as f64)
}

/// Catalog price lookup
#[derive(Clone)]
pub struct PricingResolver {
    catalog: FoodItemRepository,
}

impl PricingResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            catalog: FoodItemRepository::new(db),
        }
    }

    /// Resolve an item + portion to `(item, unit_price)`
    ///
    /// Fails with NotFound for an unknown item and Validation for a
    /// portion key missing from the item's options.
    pub async fn resolve(&self, item_id: &RecordId, portion: &str) -> AppResult<(FoodItem, f64)> {
        let item = self
            .catalog
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Food item not found"))?;

        let unit_price = *item
            .options
            .get(portion)
            .ok_or_else(|| {
                AppError::validation(format!("Invalid portion '{portion}' for {}", item.name))
            })?;

        Ok((item, unit_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::FoodItemCreate;
    use std::collections::BTreeMap;

    async fn catalog_with_item() -> (Surreal<Db>, RecordId) {
        let db = DbService::memory().await.unwrap().db;
        let repo = FoodItemRepository::new(db.clone());
        let item = repo
            .create(FoodItemCreate {
                name: "Paneer Tikka".into(),
                description: String::new(),
                options: BTreeMap::from([("half".into(), 120.0), ("full".into(), 200.0)]),
                category: "Starters".into(),
                image_url: String::new(),
                is_available: true,
                created_at: crate::utils::time::now_millis(),
            })
            .await
            .unwrap();
        let id = item.id.unwrap();
        (db, id)
    }

    #[tokio::test]
    async fn resolves_portion_price() {
        let (db, id) = catalog_with_item().await;
        let resolver = PricingResolver::new(db);

        let (item, price) = resolver.resolve(&id, "half").await.unwrap();
        assert_eq!(item.name, "Paneer Tikka");
        assert_eq!(price, 120.0);
    }

    #[tokio::test]
    async fn unknown_portion_is_a_validation_error() {
        let (db, id) = catalog_with_item().await;
        let resolver = PricingResolver::new(db);

        let err = resolver.resolve(&id, "jumbo").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let (db, _) = catalog_with_item().await;
        let resolver = PricingResolver::new(db);

        let missing = RecordId::from_table_key("food_item", "does_not_exist");
        let err = resolver.resolve(&missing, "half").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn line_total_rounds_to_two_places() {
        assert_eq!(line_total(120.0, 2), 240.0);
        assert_eq!(line_total(3.335, 3), 10.01);
        assert_eq!(line_total(0.1, 3), 0.3);
    }
}
