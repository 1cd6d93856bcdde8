//! Repository Module
//!
//! Per-table data access over the embedded SurrealDB. Each statement is
//! atomic on its own; there is deliberately no cross-order transaction
//! (see `orders::live` for the consequences).

// Location
pub mod dining_table;

// Catalog
pub mod food_item;

// Orders
pub mod order;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use food_item::FoodItemRepository;
pub use order::OrderRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a create-time SurrealDB error, surfacing unique-index violations
/// as [`RepoError::Duplicate`]
pub(crate) fn map_create_err(err: surrealdb::Error, what: &str) -> RepoError {
    let msg = err.to_string();
    if msg.contains("already contains") || msg.contains("unique") {
        RepoError::Duplicate(format!("{what} already exists"))
    } else {
        RepoError::Database(msg)
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
