//! Tabular adapters for import batches.
//!
//! The detection core operates on in-memory [`Record`]s; these adapters
//! map CSV and JSON files onto batches and back. Raw text handling
//! (delimiters, quoting, encoding) belongs to the `csv` and
//! `serde_json` crates.

pub mod csv;
pub mod json;

use std::path::Path;

use crate::models::Record;
use crate::{Error, Result};

/// Supported file formats for import batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Comma-separated values with a header row.
    Csv,
    /// Tab-separated values with a header row.
    Tsv,
    /// JSON array of objects.
    Json,
}

impl Format {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    /// Returns the cell delimiter for the delimited formats.
    #[must_use]
    pub const fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Json => None,
        }
    }

    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the extension is not
    /// recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("tsv") => Ok(Self::Tsv),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(Error::InvalidInput(format!(
                "unsupported file extension: .{ext} (expected .csv, .tsv, or .json)"
            ))),
            None => Err(Error::InvalidInput(format!(
                "cannot detect format of '{}' (no file extension)",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Reads an import batch from a file, sniffing the format from the
/// extension.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for unknown extensions or malformed
/// content, and [`Error::OperationFailed`] on I/O failures.
pub fn read_batch(path: &Path) -> Result<Vec<Record>> {
    let format = Format::from_path(path)?;
    match format.delimiter() {
        Some(delimiter) => csv::read_records_from_path(path, delimiter),
        None => json::read_records_from_path(path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/vehicles.csv")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("a/vehicles.tsv")).unwrap(), Format::Tsv);
        assert_eq!(Format::from_path(Path::new("jobs.JSON")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("routes.xlsx")).is_err());
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_format_delimiters() {
        assert_eq!(Format::Csv.delimiter(), Some(b','));
        assert_eq!(Format::Tsv.delimiter(), Some(b'\t'));
        assert_eq!(Format::Json.delimiter(), None);
    }
}
