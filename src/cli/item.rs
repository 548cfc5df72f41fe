//! Item CLI commands: add, list, remove

use anyhow::{bail, Result};

use crate::domain::GroceryItem;
use crate::storage::GroceryStore;

/// Adds an item, merging with an existing item of the same name
pub fn add(store: &dyn GroceryStore, name: &str, quantity: i64) -> Result<()> {
    if quantity <= 0 {
        bail!("Quantity must be positive");
    }

    let mut items = store.load()?;

    match items.iter_mut().find(|item| item.name() == name) {
        Some(existing) => existing.add_quantity(quantity),
        None => items.push(GroceryItem::uncategorized(name, quantity)),
    }

    store.save(&items)
}

/// Prints the whole list, sorted by name
pub fn list(store: &dyn GroceryStore) -> Result<()> {
    let mut items = store.load()?;
    items.sort_by(|a, b| a.name().cmp(b.name()));

    for item in &items {
        println!("{}", item);
    }

    Ok(())
}

/// Removes every item whose name matches exactly
pub fn remove(store: &dyn GroceryStore, name: &str) -> Result<()> {
    let mut items = store.load()?;

    let count_before = items.len();
    items.retain(|item| item.name() != name);

    if items.len() == count_before {
        println!("Item '{}' not found in grocery list", name);
    }

    store.save(&items)
}
