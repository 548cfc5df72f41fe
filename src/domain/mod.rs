//! Domain model for Grocer
//!
//! Contains the grocery item type without any I/O concerns.

mod item;

pub use item::{GroceryItem, DEFAULT_CATEGORY};
