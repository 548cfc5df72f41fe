//! Grocery item domain model
//!
//! Items are plain (name, quantity, category) records. The storage layer
//! creates them fresh on every load and never mutates them; all editing
//! happens in memory between `load()` and `save()`.

use std::fmt;

use serde::Serialize;

/// Category assigned to items that were stored without one
pub const DEFAULT_CATEGORY: &str = "default";

/// One entry of the grocery list
///
/// The category is never empty: an empty category handed to the
/// constructor or setter is replaced with [`DEFAULT_CATEGORY`]. Name
/// uniqueness is not enforced here: duplicates can coexist in memory and
/// collapse when the list is saved in the JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroceryItem {
    name: String,
    quantity: i64,
    category: String,
}

impl GroceryItem {
    /// Creates an item, coercing an empty category to the default
    pub fn new(name: impl Into<String>, quantity: i64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            category: normalize_category(category.into()),
        }
    }

    /// Creates an item in the default category
    pub fn uncategorized(name: impl Into<String>, quantity: i64) -> Self {
        Self::new(name, quantity, DEFAULT_CATEGORY)
    }

    /// Returns the item name (case-sensitive)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the quantity
    ///
    /// No sign constraint is applied at this layer; positivity is the
    /// CLI's concern.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Returns the category (never empty)
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replaces the quantity
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Increases the quantity by the given amount
    pub fn add_quantity(&mut self, amount: i64) {
        self.quantity += amount;
    }

    /// Replaces the category, coercing an empty value to the default
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = normalize_category(category.into());
    }
}

fn normalize_category(category: String) -> String {
    if category.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        category
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_becomes_default() {
        let item = GroceryItem::new("Milk", 2, "");
        assert_eq!(item.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn explicit_category_is_kept() {
        let item = GroceryItem::new("Milk", 2, "Dairy");
        assert_eq!(item.category(), "Dairy");
    }

    #[test]
    fn set_category_coerces_empty() {
        let mut item = GroceryItem::new("Milk", 2, "Dairy");
        item.set_category("");
        assert_eq!(item.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn add_quantity_accumulates() {
        let mut item = GroceryItem::uncategorized("Eggs", 6);
        item.add_quantity(6);
        assert_eq!(item.quantity(), 12);
    }

    #[test]
    fn displays_as_name_colon_quantity() {
        let item = GroceryItem::uncategorized("Eggs", 6);
        assert_eq!(item.to_string(), "Eggs: 6");
    }

    #[test]
    fn negative_quantity_is_allowed() {
        let item = GroceryItem::uncategorized("Eggs", -3);
        assert_eq!(item.quantity(), -3);
    }
}
