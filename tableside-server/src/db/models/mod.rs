//! Database Models

// Serde helpers
pub mod serde_helpers;

// Location
pub mod dining_table;

// Catalog
pub mod food_item;

// Orders
pub mod order;

// Re-exports
pub use dining_table::{DiningTable, DiningTableCreate};
pub use food_item::{FoodItem, FoodItemCreate};
pub use order::{Order, OrderCreate, OrderStatus};
