//! Record normalization

use super::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single prediction row with its column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl FeatureRow {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| self.values.get(i))
    }
}

/// Order a raw record into a single row.
///
/// With `expected_order`, every listed feature must be present and extra keys
/// are dropped. Without it, the record's keys sorted alphabetically become
/// the column order. Values pass through unchanged.
///
/// ```
/// use serde_json::json;
/// use tabserve::predict::normalize;
///
/// let record = json!({"b": 2, "a": 1});
/// let order = vec!["a".to_string(), "b".to_string()];
/// let row = normalize(record.as_object().unwrap(), Some(&order)).unwrap();
/// assert_eq!(row.values, vec![json!(1), json!(2)]);
/// ```
pub fn normalize(
    record: &Map<String, Value>,
    expected_order: Option<&[String]>,
) -> Result<FeatureRow, PredictionError> {
    if record.is_empty() {
        return Err(PredictionError::EmptyRecord);
    }

    let columns: Vec<String> = match expected_order {
        Some(order) => {
            if let Some(missing) = order.iter().find(|name| !record.contains_key(name.as_str())) {
                let mut supplied: Vec<String> = record.keys().cloned().collect();
                supplied.sort();
                return Err(PredictionError::MissingField {
                    field: missing.clone(),
                    required: order.to_vec(),
                    supplied,
                });
            }
            order.to_vec()
        }
        None => {
            let mut keys: Vec<String> = record.keys().cloned().collect();
            keys.sort();
            tracing::debug!(columns = ?keys, "no fitted feature order, using sorted record keys");
            keys
        }
    };

    let values = columns
        .iter()
        .map(|name| record.get(name).cloned().unwrap_or(Value::Null))
        .collect();

    Ok(FeatureRow { columns, values })
}

/// Decode a record submitted as a JSON string; it must be an object
pub fn parse_record(data: &str) -> Result<Map<String, Value>, PredictionError> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| PredictionError::InvalidRecord(format!("invalid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(PredictionError::InvalidRecord(format!(
            "JSON must be an object with features, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_order() {
        let row = normalize(&object(json!({"b": 2, "a": 1})), Some(&order(&["a", "b"]))).unwrap();
        assert_eq!(row.columns, order(&["a", "b"]));
        assert_eq!(row.values, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_missing_field() {
        let err = normalize(&object(json!({"b": 2})), Some(&order(&["a", "b"]))).unwrap_err();
        assert_eq!(
            err,
            PredictionError::MissingField {
                field: "a".to_string(),
                required: order(&["a", "b"]),
                supplied: order(&["b"]),
            }
        );
    }

    #[test]
    fn test_extra_keys_dropped() {
        let row = normalize(
            &object(json!({"a": 1, "zzz": "ignored"})),
            Some(&order(&["a"])),
        )
        .unwrap();
        assert_eq!(row.len(), 1);
        assert!(row.get("zzz").is_none());
    }

    #[test]
    fn test_unknown_order_sorts_keys() {
        let row = normalize(&object(json!({"c": 3, "a": 1, "b": 2})), None).unwrap();
        assert_eq!(row.columns, order(&["a", "b", "c"]));
        assert_eq!(row.values, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(
            normalize(&Map::new(), Some(&order(&["a"]))),
            Err(PredictionError::EmptyRecord)
        );
        assert_eq!(normalize(&Map::new(), None), Err(PredictionError::EmptyRecord));
    }

    #[test]
    fn test_values_pass_through() {
        let row = normalize(
            &object(json!({"a": "text", "b": null, "c": [1, 2]})),
            Some(&order(&["c", "b", "a"])),
        )
        .unwrap();
        assert_eq!(row.values, vec![json!([1, 2]), Value::Null, json!("text")]);
    }

    #[test]
    fn test_parse_record() {
        let map = parse_record(r#"{"age": 30}"#).unwrap();
        assert_eq!(map.get("age"), Some(&json!(30)));

        assert!(matches!(
            parse_record("[1, 2]"),
            Err(PredictionError::InvalidRecord(msg)) if msg.contains("array")
        ));
        assert!(matches!(
            parse_record("{not json"),
            Err(PredictionError::InvalidRecord(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_known_order_is_respected(
            record in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 1..20)
        ) {
            let map: Map<String, Value> =
                record.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let mut expected: Vec<String> = record.keys().cloned().collect();
            expected.reverse();

            let row = normalize(&map, Some(&expected)).unwrap();
            prop_assert_eq!(&row.columns, &expected);
            for (name, value) in row.columns.iter().zip(&row.values) {
                prop_assert_eq!(value, &json!(record[name]));
            }
        }
    }
}
