//! Column kinds and their descriptive metadata

use serde::{Deserialize, Serialize};

/// Semantic kind of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Free-form text
    Text,
    /// Integer or floating point values
    Number,
    /// Small closed set of string values
    Category,
    /// Two-valued flag
    Boolean,
    /// Date or timestamp
    Date,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Category => write!(f, "category"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// A kind together with the metadata a client needs to render it.
///
/// Serialized with an internal `type` tag so it can be flattened into a field
/// descriptor: `{"type": "number", "min": 0.0, "max": 10.0, "integer": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindInfo {
    Text {
        /// Longest observed value, absent when there were no samples
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Number {
        min: f64,
        max: f64,
        /// Every sample was integral
        integer: bool,
    },
    Category {
        /// Sorted distinct values
        options: Vec<String>,
    },
    Boolean {
        /// Vocabulary pair as `[false, true]`
        labels: Vec<String>,
    },
    Date {
        /// chrono format every sample parsed under
        format: String,
        /// Earliest sample, as written
        min: String,
        /// Latest sample, as written
        max: String,
    },
}

impl KindInfo {
    /// Kind without metadata
    pub fn kind(&self) -> Kind {
        match self {
            Self::Text { .. } => Kind::Text,
            Self::Number { .. } => Kind::Number,
            Self::Category { .. } => Kind::Category,
            Self::Boolean { .. } => Kind::Boolean,
            Self::Date { .. } => Kind::Date,
        }
    }

    /// Text without metadata, used for columns with no usable samples
    pub fn empty_text() -> Self {
        Self::Text { max_length: None }
    }
}
