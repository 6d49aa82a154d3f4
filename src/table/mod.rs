//! Sample tables
//!
//! An in-memory, column-ordered table of JSON values. Tables are only used to
//! describe the distribution of each feature when building a schema; they are
//! never persisted.

mod format;
mod load;

pub use format::TableFormat;
pub use load::{load_table, parse_table};

use serde_json::{Map, Value};
use thiserror::Error;

/// Sample table errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed table: {0}")]
    Malformed(String),
}

/// Column-ordered table of sample values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    columns: Vec<(String, Vec<Value>)>,
}

impl SampleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from named columns; all columns must have the same length and
    /// distinct names
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self, TableError> {
        if let Some((_, first)) = columns.first() {
            let rows = first.len();
            for (name, values) in &columns {
                if values.len() != rows {
                    return Err(TableError::Malformed(format!(
                        "column '{name}' has {} rows, expected {rows}",
                        values.len()
                    )));
                }
            }
        }
        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(TableError::Malformed(format!("duplicate column '{name}'")));
            }
        }
        Ok(Self { columns })
    }

    /// Build from row records. Columns appear in first-seen key order; a key
    /// missing from a record becomes null in that row.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<(String, Vec<Value>)> = Vec::new();

        for (row, record) in records.iter().enumerate() {
            for (key, value) in record {
                match columns.iter_mut().find(|(name, _)| name == key) {
                    Some((_, values)) => values.push(value.clone()),
                    None => {
                        let mut values = vec![Value::Null; row];
                        values.push(value.clone());
                        columns.push((key.clone(), values));
                    }
                }
            }
            for (_, values) in columns.iter_mut() {
                if values.len() < row + 1 {
                    values.push(Value::Null);
                }
            }
        }

        Self { columns }
    }

    /// One row holding `sentinel` in every named column
    pub fn placeholder(names: &[String], sentinel: Value) -> Self {
        Self {
            columns: names
                .iter()
                .map(|name| (name.clone(), vec![sentinel.clone()]))
                .collect(),
        }
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// A table with no rows or no columns is empty
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Whether the table has a column called `name`
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Values of one column
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }
}
