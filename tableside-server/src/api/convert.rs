//! API DTO conversion
//!
//! Wire projections of persisted models (camelCase, string record ids).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::models::{DiningTable, FoodItem};

/// Catalog entry as served to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub options: BTreeMap<String, f64>,
    pub category: String,
    pub image_url: String,
    pub is_available: bool,
}

impl FoodItemView {
    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            id: item.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name: item.name.clone(),
            description: item.description.clone(),
            options: item.options.clone(),
            category: item.category.clone(),
            image_url: item.image_url.clone(),
            is_available: item.is_available,
        }
    }
}

/// Dining table as served to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    #[serde(rename = "_id")]
    pub id: String,
    pub table_no: i64,
}

impl TableView {
    pub fn from_table(table: &DiningTable) -> Self {
        Self {
            id: table.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            table_no: table.table_no,
        }
    }
}
