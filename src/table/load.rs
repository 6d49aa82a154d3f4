//! Sample table decoding

use super::format::TableFormat;
use super::{SampleTable, TableError};
use crate::Result;
use serde_json::{Map, Value};
use std::path::Path;

/// Load a sample table from a file
///
/// The format is detected from the file extension.
pub fn load_table(path: impl AsRef<Path>) -> Result<SampleTable> {
    let path = path.as_ref();

    let format = TableFormat::from_path(path)
        .ok_or_else(|| TableError::UnsupportedFormat(path.display().to_string()))?;

    let data = std::fs::read(path)?;
    Ok(parse_table(&data, format)?)
}

/// Decode a sample table from raw bytes
pub fn parse_table(
    data: &[u8],
    format: TableFormat,
) -> std::result::Result<SampleTable, TableError> {
    match format {
        TableFormat::Json => parse_json(data),
        TableFormat::Csv => parse_csv(data),
    }
}

fn parse_json(data: &[u8]) -> std::result::Result<SampleTable, TableError> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| TableError::Malformed(format!("JSON deserialization failed: {e}")))?;

    match value {
        Value::Array(rows) => {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| match row {
                    Value::Object(map) => Ok(map),
                    _ => Err(TableError::Malformed(format!("row {i} is not an object"))),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(SampleTable::from_records(&records))
        }
        Value::Object(map) if map.contains_key("columns") && map.contains_key("data") => {
            parse_split(map)
        }
        Value::Object(map) => {
            let columns = map
                .into_iter()
                .map(|(name, values)| match values {
                    Value::Array(values) => Ok((name, values)),
                    _ => Err(TableError::Malformed(format!("column '{name}' is not an array"))),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            SampleTable::from_columns(columns)
        }
        _ => Err(TableError::Malformed(
            "expected an array of records or an object of columns".to_string(),
        )),
    }
}

/// `{"columns": [...], "data": [[...], ...]}`
fn parse_split(mut map: Map<String, Value>) -> std::result::Result<SampleTable, TableError> {
    let names: Vec<String> = match map.remove("columns") {
        Some(Value::Array(names)) => names
            .into_iter()
            .map(|n| match n {
                Value::String(s) => Ok(s),
                other => Err(TableError::Malformed(format!("column name {other} is not a string"))),
            })
            .collect::<std::result::Result<_, _>>()?,
        _ => return Err(TableError::Malformed("'columns' must be an array".to_string())),
    };

    let rows = match map.remove("data") {
        Some(Value::Array(rows)) => rows,
        _ => return Err(TableError::Malformed("'data' must be an array".to_string())),
    };

    let mut columns: Vec<(String, Vec<Value>)> = names
        .into_iter()
        .map(|name| (name, Vec::with_capacity(rows.len())))
        .collect();

    for (i, row) in rows.into_iter().enumerate() {
        let cells = match row {
            Value::Array(cells) if cells.len() == columns.len() => cells,
            _ => {
                return Err(TableError::Malformed(format!(
                    "row {i} does not have {} cells",
                    columns.len()
                )))
            }
        };
        for ((_, values), cell) in columns.iter_mut().zip(cells) {
            values.push(cell);
        }
    }

    SampleTable::from_columns(columns)
}

fn parse_csv(data: &[u8]) -> std::result::Result<SampleTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| TableError::Malformed(format!("CSV header: {e}")))?
        .clone();

    let mut columns: Vec<(String, Vec<Value>)> = headers
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::Malformed(format!("CSV row {i}: {e}")))?;
        for ((_, values), cell) in columns.iter_mut().zip(record.iter()) {
            values.push(if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            });
        }
    }

    SampleTable::from_columns(columns)
}
