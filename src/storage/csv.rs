//! CSV storage for the grocery list
//!
//! The canonical file is a `name,quantity,category` header followed by one
//! row per item. Files written before categories existed carry a
//! two-column `name,quantity` header; they still load, with every item
//! placed in the default category.
//!
//! Row-level problems are recovered locally: a row with a non-numeric
//! quantity is skipped with a warning, and a header that does not look
//! like a grocery list at all turns the whole file into an empty list
//! rather than an error. Only structurally broken records (unparsable as
//! CSV) abort the read.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

use crate::domain::GroceryItem;

use super::format::{self, FileFormat};
use super::GroceryStore;

/// Store for grocery lists in CSV format
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GroceryStore for CsvStore {
    fn load(&self) -> Result<Vec<GroceryItem>> {
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => return Ok(Vec::new()),
        };
        if size == 0 {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read grocery file: {}", self.path.display()))?;

        format::validate(&content, FileFormat::Csv)?;

        // The header shape check is semantic, so headers are read as a
        // plain record instead of through the csv crate's header handling.
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut records = reader.records();

        let header = match records.next() {
            Some(header) => header.context("Failed to read CSV header")?,
            None => return Ok(Vec::new()),
        };

        let has_category = header.len() >= 3
            && header[0].eq_ignore_ascii_case("name")
            && header[1].eq_ignore_ascii_case("quantity")
            && header[2].eq_ignore_ascii_case("category");

        if !has_category
            && (header.len() < 2
                || !header[0].eq_ignore_ascii_case("name")
                || !header[1].eq_ignore_ascii_case("quantity"))
        {
            eprintln!("Warning: CSV file has an invalid header, treating list as empty");
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for (index, record) in records.enumerate() {
            let record = record
                .with_context(|| format!("Malformed CSV record at line {}", index + 2))?;
            if record.len() < 2 {
                continue;
            }

            let name = &record[0];
            let quantity = match record[1].parse::<i64>() {
                Ok(quantity) => quantity,
                Err(_) => {
                    eprintln!("Warning: ignoring row with non-numeric quantity: {}", name);
                    continue;
                }
            };

            let category = if has_category {
                record.get(2).filter(|category| !category.is_empty())
            } else {
                None
            };

            items.push(match category {
                Some(category) => GroceryItem::new(name, quantity, category),
                None => GroceryItem::uncategorized(name, quantity),
            });
        }

        Ok(items)
    }

    fn save(&self, items: &[GroceryItem]) -> Result<()> {
        if let Ok(meta) = fs::metadata(&self.path) {
            if meta.len() > 0 {
                let content = fs::read_to_string(&self.path).with_context(|| {
                    format!("Failed to read grocery file: {}", self.path.display())
                })?;
                format::validate(&content, FileFormat::Csv)?;
            }
        }

        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("Failed to write grocery file: {}", self.path.display()))?;

        writer
            .write_record(["name", "quantity", "category"])
            .context("Failed to write CSV header")?;

        for item in items {
            let quantity = item.quantity().to_string();
            writer
                .write_record([item.name(), quantity.as_str(), item.category()])
                .context("Failed to write CSV row")?;
        }

        writer.flush().context("Failed to flush grocery file")?;
        Ok(())
    }
}
