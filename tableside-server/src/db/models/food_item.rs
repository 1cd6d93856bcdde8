//! Food Item Model (catalog entry)

use std::collections::BTreeMap;

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Catalog entry with per-portion pricing
///
/// `options` maps a portion label (e.g. "half", "full") to its price.
/// Orders hold a weak reference to this record; prices written into an
/// order are locked in at placement and never re-read from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Portion label → price, non-empty
    pub options: BTreeMap<String, f64>,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    /// Unix millis
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create food item payload (persisted form, id generated by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub options: BTreeMap<String, f64>,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    pub is_available: bool,
    pub created_at: i64,
}
