//! Configuration for kind inference

use serde::{Deserialize, Serialize};

/// Configuration for kind inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Maximum distinct values for a string column to be a category (default: 20)
    pub category_threshold: usize,
    /// Maximum distinct values for a numeric column to be a category.
    /// `None` keeps numeric columns as numbers regardless of cardinality.
    pub numeric_category_threshold: Option<usize>,
    /// chrono format strings tried in order when detecting dates
    pub date_formats: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            category_threshold: 20,
            numeric_category_threshold: None,
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%d/%m/%Y".to_string(),
                "%m/%d/%Y".to_string(),
            ],
        }
    }
}

impl InferenceConfig {
    /// Set the string category threshold
    pub fn with_category_threshold(mut self, threshold: usize) -> Self {
        self.category_threshold = threshold;
        self
    }

    /// Treat numeric columns with at most `threshold` distinct values as categories
    pub fn with_numeric_category_threshold(mut self, threshold: usize) -> Self {
        self.numeric_category_threshold = Some(threshold);
        self
    }

    /// Replace the date formats
    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }
}
