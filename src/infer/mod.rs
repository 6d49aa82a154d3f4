//! Column kind inference from sample data
//!
//! Classifies one column of sample values into a semantic [`Kind`] so a client
//! can render a matching input widget. Rules are evaluated in precedence order
//! and the first match wins:
//!
//! 1. Boolean: exactly two values from one recognized boolean vocabulary
//! 2. Date: every value parses under one configured date/time format
//! 3. Category: low-cardinality non-numeric strings
//! 4. Number: every value is an integer or float
//! 5. Text: everything else
//!
//! Classification never fails; a column without usable samples is [`Kind::Text`].

mod config;
mod inference;
mod stats;
mod types;


pub use config::InferenceConfig;
pub use inference::{classify_column, describe, infer_kind};
pub use stats::{collect_stats_from_samples, ColumnStats};
pub use types::{Kind, KindInfo};
