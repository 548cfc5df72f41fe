//! JSON storage for the grocery list
//!
//! The canonical layout is a two-level object: category name to item name
//! to quantity. Three older layouts are still read through an ordered
//! fallback chain so that lists written by earlier versions keep working:
//!
//! 1. Category map: `{"Dairy":{"Milk":2}}` (canonical, written today)
//! 2. Flat map: `{"Milk":2,"Salt":1}`
//! 3. Item objects: `[{"name":"Milk","quantity":2,"category":"Dairy"}]`
//! 4. Strings: `["Milk: 2", "bananas"]` (no colon means quantity 1)
//!
//! Writing always produces the category map, so any legacy file is
//! silently upgraded on its next save.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::GroceryItem;

use super::format::{self, FileFormat};
use super::{GroceryStore, StorageError};

/// Store for grocery lists in JSON format
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GroceryStore for JsonStore {
    fn load(&self) -> Result<Vec<GroceryItem>> {
        // A missing or zero-byte file is an empty list and skips the
        // format sniff entirely.
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => return Ok(Vec::new()),
        };
        if size == 0 {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read grocery file: {}", self.path.display()))?;

        format::validate(&content, FileFormat::Json)?;

        Ok(parse_any_layout(&content)?)
    }

    fn save(&self, items: &[GroceryItem]) -> Result<()> {
        if let Ok(meta) = fs::metadata(&self.path) {
            if meta.len() > 0 {
                let content = fs::read_to_string(&self.path).with_context(|| {
                    format!("Failed to read grocery file: {}", self.path.display())
                })?;
                format::validate(&content, FileFormat::Json)?;
            }
        }

        // Two-level grouping keyed by name, so duplicate (category, name)
        // pairs collapse and the last one in input order wins.
        let mut grouped: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
        for item in items {
            grouped
                .entry(item.category())
                .or_default()
                .insert(item.name(), item.quantity());
        }

        let json = serde_json::to_string(&grouped).context("Failed to serialize grocery list")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write grocery file: {}", self.path.display()))
    }
}

type LayoutParser = fn(&Value) -> Option<Vec<GroceryItem>>;

/// Layout attempts in fallback order, newest first
///
/// The first parser that recognizes the root shape wins. The category map
/// additionally demands a non-empty result, so `{}` falls through to the
/// flat map (where it is a valid empty list).
const LAYOUTS: [LayoutParser; 4] = [category_map, flat_map, object_list, string_list];

fn parse_any_layout(content: &str) -> Result<Vec<GroceryItem>, StorageError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| StorageError::Schema(e.to_string()))?;

    LAYOUTS.iter().find_map(|parse| parse(&root)).ok_or_else(|| {
        StorageError::Schema(
            "expected a category map, an item map, a list of item objects, or a list of strings"
                .to_string(),
        )
    })
}

/// Canonical layout: `{"Dairy":{"Milk":2}}`
///
/// Top-level values that are not objects are skipped rather than rejected,
/// but a nested quantity that is not an integer fails the whole attempt.
fn category_map(root: &Value) -> Option<Vec<GroceryItem>> {
    let categories = root.as_object()?;

    let mut items = Vec::new();
    for (category, members) in categories {
        let members = match members {
            Value::Object(members) => members,
            _ => continue,
        };
        for (name, quantity) in members {
            items.push(GroceryItem::new(name, quantity.as_i64()?, category));
        }
    }

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Legacy layout: `{"Milk":2,"Salt":1}`
fn flat_map(root: &Value) -> Option<Vec<GroceryItem>> {
    let entries = root.as_object()?;

    let mut items = Vec::with_capacity(entries.len());
    for (name, quantity) in entries {
        items.push(GroceryItem::uncategorized(name, quantity.as_i64()?));
    }
    Some(items)
}

#[derive(Deserialize)]
struct LegacyRecord {
    name: String,
    quantity: i64,
    #[serde(default)]
    category: Option<String>,
}

/// Legacy layout: `[{"name":"Milk","quantity":2,"category":"Dairy"}]`
fn object_list(root: &Value) -> Option<Vec<GroceryItem>> {
    let records: Vec<LegacyRecord> = serde_json::from_value(root.clone()).ok()?;

    Some(
        records
            .into_iter()
            .map(|r| GroceryItem::new(r.name, r.quantity, r.category.unwrap_or_default()))
            .collect(),
    )
}

/// Oldest layout: `["Milk: 2", "bananas"]`
///
/// A string without a colon is an item with quantity 1. A string whose
/// part after the first colon is not an integer is dropped with a warning,
/// never fatal.
fn string_list(root: &Value) -> Option<Vec<GroceryItem>> {
    let lines: Vec<String> = serde_json::from_value(root.clone()).ok()?;

    let mut items = Vec::new();
    for line in lines {
        match line.split_once(':') {
            Some((name, quantity)) => match quantity.trim().parse::<i64>() {
                Ok(quantity) => items.push(GroceryItem::uncategorized(name.trim(), quantity)),
                Err(_) => eprintln!("Warning: ignoring malformed entry: {}", line),
            },
            None => items.push(GroceryItem::uncategorized(line.trim(), 1)),
        }
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::DEFAULT_CATEGORY;

    fn store_with(content: &str) -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, content).unwrap();
        (dir, JsonStore::new(path))
    }

    fn triples(items: &[GroceryItem]) -> BTreeSet<(String, i64, String)> {
        items
            .iter()
            .map(|i| (i.name().to_string(), i.quantity(), i.category().to_string()))
            .collect()
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_zero_byte_file_is_empty() {
        let (_dir, store) = store_with("");

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_category_map() {
        let (_dir, store) = store_with(r#"{"Dairy":{"Milk":2},"default":{"Salt":1}}"#);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([
                ("Milk".to_string(), 2, "Dairy".to_string()),
                ("Salt".to_string(), 1, "default".to_string()),
            ])
        );
    }

    #[test]
    fn load_category_map_skips_non_object_values() {
        // Mixed roots keep only the nested part, as long as it is non-empty.
        let (_dir, store) = store_with(r#"{"loose":1,"Dairy":{"Milk":2}}"#);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([("Milk".to_string(), 2, "Dairy".to_string())])
        );
    }

    #[test]
    fn load_flat_map_defaults_category() {
        let (_dir, store) = store_with(r#"{"Salt":1,"Pepper":2}"#);

        let items = store.load().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.category() == DEFAULT_CATEGORY));
    }

    #[test]
    fn load_empty_object_is_empty_list() {
        let (_dir, store) = store_with("{}");

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_object_list_coerces_missing_category() {
        let content = r#"[
            {"name":"Milk","quantity":2,"category":"Dairy"},
            {"name":"Salt","quantity":1},
            {"name":"Pepper","quantity":3,"category":""}
        ]"#;
        let (_dir, store) = store_with(content);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([
                ("Milk".to_string(), 2, "Dairy".to_string()),
                ("Salt".to_string(), 1, "default".to_string()),
                ("Pepper".to_string(), 3, "default".to_string()),
            ])
        );
    }

    #[test]
    fn load_string_list() {
        let (_dir, store) = store_with(r#"["pommes: 5", "bananes"]"#);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([
                ("pommes".to_string(), 5, "default".to_string()),
                ("bananes".to_string(), 1, "default".to_string()),
            ])
        );
    }

    #[test]
    fn load_string_list_drops_malformed_entries() {
        let (_dir, store) = store_with(r#"["Milk: two", "Salt: 1"]"#);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([("Salt".to_string(), 1, "default".to_string())])
        );
    }

    #[test]
    fn string_split_happens_at_first_colon() {
        // "1:2" is not an integer, so the whole entry is dropped.
        let (_dir, store) = store_with(r#"["a:1:2", "b: 3"]"#);

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([("b".to_string(), 3, "default".to_string())])
        );
    }

    #[test]
    fn load_unrecognized_layout_fails() {
        let (_dir, store) = store_with("[1, 2, 3]");

        let err = store.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Schema(_))
        ));
    }

    #[test]
    fn load_invalid_json_fails() {
        let (_dir, store) = store_with("{not json");

        let err = store.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Schema(_))
        ));
    }

    #[test]
    fn load_csv_content_is_a_format_mismatch() {
        let (_dir, store) = store_with("name,quantity\nSalt,1\n");

        let err = store.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::FormatMismatch {
                detected: FileFormat::Csv,
                requested: FileFormat::Json,
            })
        ));
    }

    #[test]
    fn save_groups_by_category() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        let store = JsonStore::new(&path);

        store
            .save(&[
                GroceryItem::new("Milk", 2, "Dairy"),
                GroceryItem::uncategorized("Salt", 1),
            ])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"Dairy":{"Milk":2},"default":{"Salt":1}}"#
        );
    }

    #[test]
    fn save_empty_list_writes_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        let store = JsonStore::new(&path);

        store.save(&[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_collapses_duplicates_last_wins() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("list.json"));

        store
            .save(&[
                GroceryItem::new("Milk", 2, "Dairy"),
                GroceryItem::new("Milk", 7, "Dairy"),
            ])
            .unwrap();

        let items = store.load().unwrap();
        assert_eq!(
            triples(&items),
            BTreeSet::from([("Milk".to_string(), 7, "Dairy".to_string())])
        );
    }

    #[test]
    fn save_refuses_to_overwrite_csv_content() {
        let (_dir, store) = store_with("name,quantity\nSalt,1\n");

        let err = store.save(&[GroceryItem::uncategorized("Milk", 1)]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::FormatMismatch { .. })
        ));
        // Nothing was written.
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "name,quantity\nSalt,1\n"
        );
    }

    #[test]
    fn save_upgrades_legacy_file_to_category_map() {
        let (_dir, store) = store_with(r#"{"Salt":1}"#);

        let items = store.load().unwrap();
        store.save(&items).unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            r#"{"default":{"Salt":1}}"#
        );
    }

    proptest! {
        // Round trip is exact (as a set of triples) when (name, category)
        // pairs are unique; the map keys guarantee that here.
        #[test]
        fn save_then_load_preserves_unique_items(
            entries in prop::collection::btree_map(
                ("[A-Za-z][A-Za-z0-9 ]{0,7}", "[a-z]{1,8}"),
                -1000i64..1000,
                0..8,
            )
        ) {
            let dir = TempDir::new().unwrap();
            let store = JsonStore::new(dir.path().join("list.json"));

            let items: Vec<GroceryItem> = entries
                .iter()
                .map(|((name, category), quantity)| {
                    GroceryItem::new(name.clone(), *quantity, category.clone())
                })
                .collect();

            store.save(&items).unwrap();
            let loaded = store.load().unwrap();

            prop_assert_eq!(triples(&loaded), triples(&items));
        }
    }
}
