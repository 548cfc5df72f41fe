//! Grocer - a file-backed grocery list manager
//!
//! Grocer keeps a small categorized list of named, quantified items in a
//! single local file, readable and writable in two formats (JSON and CSV).
//! The JSON reader stays compatible with every layout the file has ever
//! been written in.

pub mod domain;
pub mod storage;
pub mod cli;
#[cfg(feature = "web")]
pub mod web;

pub use domain::{GroceryItem, DEFAULT_CATEGORY};
pub use storage::{FileFormat, GroceryStore, StorageError};
