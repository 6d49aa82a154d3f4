//! Sample table format definitions

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported sample table encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableFormat {
    /// JSON records (`[{...}]`), split (`{"columns", "data"}`) or column (`{"a": [...]}`) layout
    Json,

    /// CSV with a header row
    Csv,
}

impl TableFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            TableFormat::Json => "json",
            TableFormat::Csv => "csv",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(TableFormat::Json),
            "csv" => Some(TableFormat::Csv),
            _ => None,
        }
    }

    /// Detect format from a file name or path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extension() {
        assert_eq!(TableFormat::Json.extension(), "json");
        assert_eq!(TableFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_extension("CSV"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_extension("json"), Some(TableFormat::Json));
        assert_eq!(TableFormat::from_extension("pkl"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(TableFormat::from_path("samples.csv"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_path("dir/rows.JSON"), Some(TableFormat::Json));
        assert_eq!(TableFormat::from_path("noext"), None);
    }
}
