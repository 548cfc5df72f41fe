//! File format detection
//!
//! Guards against operating on a file whose content does not match the
//! format the caller is about to use. Detection is heuristic: JSON-looking
//! content is bracket-delimited, CSV-looking content has a comma and a
//! header-ish first line. Content matching neither passes silently.

use std::fmt;

use clap::ValueEnum;

use super::StorageError;

/// On-disk format of a grocery list file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FileFormat {
    #[default]
    Json,
    Csv,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that `content` is usable as `requested`
///
/// Empty content always validates. When content manages to look like both
/// formats at once, the JSON check runs first and wins.
pub fn validate(content: &str, requested: FileFormat) -> Result<(), StorageError> {
    let content = content.trim();
    let lower = content.to_lowercase();

    let looks_json = (content.starts_with('{') && content.ends_with('}'))
        || (content.starts_with('[') && content.ends_with(']'));

    let first_line = lower.lines().next().unwrap_or("");
    let looks_csv = content.contains(',')
        && (lower.starts_with("name,quantity")
            || (content.lines().count() > 1 && first_line.contains("name")));

    if looks_json && requested != FileFormat::Json {
        return Err(StorageError::FormatMismatch {
            detected: FileFormat::Json,
            requested,
        });
    }

    if looks_csv && requested != FileFormat::Csv {
        return Err(StorageError::FormatMismatch {
            detected: FileFormat::Csv,
            requested,
        });
    }

    Ok(())
}
