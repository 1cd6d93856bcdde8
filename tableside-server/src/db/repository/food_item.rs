//! Food Item Repository (catalog)

use super::{BaseRepository, RepoError, RepoResult, map_create_err};
use crate::db::models::{FoodItem, FoodItemCreate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "food_item";

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Parse an item id, accepting both "food_item:xyz" and a bare key
    pub fn parse_id(id: &str) -> RepoResult<RecordId> {
        if id.contains(':') {
            id.parse()
                .map_err(|_| RepoError::Validation(format!("Invalid item ID: {id}")))
        } else {
            Ok(RecordId::from_table_key(TABLE, id))
        }
    }

    /// All catalog entries
    pub async fn find_all(&self) -> RepoResult<Vec<FoodItem>> {
        let items: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Available entries only (customer-facing menu)
    pub async fn find_available(&self) -> RepoResult<Vec<FoodItem>> {
        let items: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item WHERE is_available = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find one entry by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<FoodItem>> {
        let item: Option<FoodItem> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    /// Add a catalog entry; duplicate names are rejected by the unique index
    pub async fn create(&self, data: FoodItemCreate) -> RepoResult<FoodItem> {
        let name = data.name.clone();
        let created: Option<FoodItem> = self
            .base
            .db()
            .create(TABLE)
            .content(data)
            .await
            .map_err(|e| map_create_err(e, &format!("Food item '{name}'")))?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".into()))
    }

    /// Flip availability; returns the new value
    pub async fn toggle_available(&self, id: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $item SET is_available = !is_available RETURN AFTER")
            .bind(("item", id.clone()))
            .await?;
        let items: Vec<FoodItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .map(|i| i.is_available)
            .ok_or_else(|| RepoError::NotFound(format!("Food item {id} not found")))
    }

    /// Overwrite the options map (price edit). Existing orders keep their
    /// locked-in totals.
    pub async fn set_options(
        &self,
        id: &RecordId,
        options: std::collections::BTreeMap<String, f64>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $item SET options = $options")
            .bind(("item", id.clone()))
            .bind(("options", options))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::FoodItemCreate;
    use std::collections::BTreeMap;

    fn entry(name: &str) -> FoodItemCreate {
        FoodItemCreate {
            name: name.into(),
            description: String::new(),
            options: BTreeMap::from([("full".into(), 100.0)]),
            category: "Mains".into(),
            image_url: String::new(),
            is_available: true,
            created_at: crate::utils::time::now_millis(),
        }
    }

    #[tokio::test]
    async fn duplicate_name_is_a_duplicate_error() {
        let db = DbService::memory().await.unwrap().db;
        let repo = FoodItemRepository::new(db);

        repo.create(entry("Dal Makhani")).await.unwrap();
        let err = repo.create(entry("Dal Makhani")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn toggle_flips_and_menu_filters() {
        let db = DbService::memory().await.unwrap().db;
        let repo = FoodItemRepository::new(db);

        let item = repo.create(entry("Naan")).await.unwrap();
        let id = item.id.unwrap();

        assert_eq!(repo.find_available().await.unwrap().len(), 1);
        assert!(!repo.toggle_available(&id).await.unwrap());
        assert!(repo.find_available().await.unwrap().is_empty());
        assert!(repo.toggle_available(&id).await.unwrap());
    }
}
