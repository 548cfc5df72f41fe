//! # Storage Layer
//!
//! Persistence layer for Grocer. One grocery list lives in one local
//! file, in one of two formats:
//!
//! | Format | Store | Canonical shape |
//! |--------|-------|-----------------|
//! | JSON | [`JsonStore`] | `{"Dairy":{"Milk":2},"default":{"Salt":1}}` |
//! | CSV | [`CsvStore`] | `name,quantity,category` header plus one row per item |
//!
//! The JSON reader additionally accepts three historical layouts (flat
//! name-to-quantity map, array of item objects, array of `"name: qty"`
//! strings) through an ordered fallback chain; see [`JsonStore`].
//!
//! Before touching a non-empty file, both stores sniff its content with
//! [`format::validate`] so that a JSON list is never shredded by the CSV
//! writer or vice versa.
//!
//! Every `load()` reads the whole file, every `save()` truncates and
//! rewrites it. There is no locking and no temp-file-plus-rename step:
//! concurrent invocations against the same path race, last writer wins.
//! The expected caller is a short-lived command invocation.

pub mod format;
mod json;
mod csv;

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::domain::GroceryItem;

pub use self::csv::CsvStore;
pub use self::format::FileFormat;
pub use self::json::JsonStore;

/// Fatal storage failures
///
/// Per-row problems are not represented here: a malformed CSV row or
/// legacy string entry is skipped with a warning on stderr and the
/// operation still succeeds.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file content looks like one format but the other was requested.
    /// Raised before any parse or write so a foreign-format file is never
    /// overwritten.
    #[error(
        "File looks like {detected} but was opened as {requested}. Use --format {detected}."
    )]
    FormatMismatch {
        detected: FileFormat,
        requested: FileFormat,
    },

    /// JSON content that matches none of the known list layouts
    #[error("Failed to parse grocery list JSON: {0}")]
    Schema(String),
}

/// Load/save contract shared by both file formats
///
/// `load()` returns a fresh list on every call; `save()` rewrites the
/// whole file from the given list.
pub trait GroceryStore: Send + Sync {
    /// Reads the full grocery list from the backing file
    ///
    /// A missing file is an empty list, not an error.
    fn load(&self) -> Result<Vec<GroceryItem>>;

    /// Replaces the backing file's content with the given list
    fn save(&self, items: &[GroceryItem]) -> Result<()>;
}

/// Opens the store matching the requested file format
pub fn open(path: impl Into<PathBuf>, format: FileFormat) -> Box<dyn GroceryStore> {
    match format {
        FileFormat::Json => Box::new(JsonStore::new(path)),
        FileFormat::Csv => Box::new(CsvStore::new(path)),
    }
}
