//! Schema builder

use super::descriptor::{FieldDescriptor, OutputDescriptor, Schema};
use super::SchemaError;
use crate::infer::{classify_column, InferenceConfig};
use crate::table::SampleTable;
use serde_json::Value;
use std::collections::BTreeSet;

/// Value placed in every column when no sample table is supplied.
///
/// An integer sentinel classifies every placeholder column as a number with
/// `min == max == 1`; without samples the schema only declares input slots.
pub const PLACEHOLDER_SENTINEL: i64 = 1;

/// Classifies feature columns and assembles a [`Schema`]
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: InferenceConfig,
}

impl SchemaBuilder {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build a schema for `feature_names`, in that order.
    ///
    /// Without a table a single placeholder row is classified instead. With a
    /// table, it must be non-empty and contain every feature column; extra
    /// columns are ignored.
    pub fn build(
        &self,
        table: Option<&SampleTable>,
        feature_names: &[String],
        output: OutputDescriptor,
    ) -> Result<Schema, SchemaError> {
        let inputs = self.build_inputs(table, feature_names)?;
        Ok(Schema::new(inputs, output))
    }

    /// Field descriptors only, one per feature in `feature_names` order
    pub fn build_inputs(
        &self,
        table: Option<&SampleTable>,
        feature_names: &[String],
    ) -> Result<Vec<FieldDescriptor>, SchemaError> {
        if feature_names.is_empty() {
            return Err(SchemaError::NoFeatures);
        }

        let mut seen = BTreeSet::new();
        for name in feature_names {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateFeature(name.clone()));
            }
        }

        let placeholder;
        let placeholder_config;
        let (table, config) = match table {
            Some(table) => {
                validate_table(table, feature_names)?;
                (table, &self.config)
            }
            None => {
                placeholder =
                    SampleTable::placeholder(feature_names, Value::from(PLACEHOLDER_SENTINEL));
                // A lone sentinel must stay a number under any numeric category threshold
                placeholder_config = InferenceConfig {
                    numeric_category_threshold: None,
                    ..self.config.clone()
                };
                (&placeholder, &placeholder_config)
            }
        };

        let inputs = feature_names
            .iter()
            .map(|name| {
                let values = table.column(name).unwrap_or_default();
                FieldDescriptor::new(name.clone(), classify_column(name, values, config))
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            features = inputs.len(),
            rows = table.n_rows(),
            "built input schema"
        );

        Ok(inputs)
    }
}

fn validate_table(table: &SampleTable, feature_names: &[String]) -> Result<(), SchemaError> {
    if table.is_empty() {
        return Err(SchemaError::EmptyTable);
    }

    let missing: BTreeSet<String> = feature_names
        .iter()
        .filter(|name| !table.has_column(name))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::{Kind, KindInfo};
    use proptest::prelude::*;
    use serde_json::json;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_table() -> SampleTable {
        SampleTable::from_columns(vec![
            ("notes".to_string(), vec![json!("a"), json!("b"), json!("c")]),
            ("age".to_string(), vec![json!(30), json!(45), json!(22)]),
            ("smoker".to_string(), vec![json!("yes"), json!("no"), json!("no")]),
            (
                "visit".to_string(),
                vec![json!("2024-01-01"), json!("2024-02-01"), json!("2024-03-01")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_without_table_uses_placeholders() {
        let features = names(&["b", "a", "c"]);
        let schema = SchemaBuilder::default()
            .build(None, &features, OutputDescriptor::regressor())
            .unwrap();

        assert_eq!(schema.input_names(), vec!["b", "a", "c"]);
        for field in &schema.inputs {
            assert_eq!(
                field.info,
                KindInfo::Number {
                    min: 1.0,
                    max: 1.0,
                    integer: true
                }
            );
        }
        assert_eq!(schema.outputs, vec![OutputDescriptor::regressor()]);
    }

    #[test]
    fn test_placeholders_ignore_numeric_category_threshold() {
        let config = InferenceConfig::default().with_numeric_category_threshold(20);
        let schema = SchemaBuilder::new(config.clone())
            .build(None, &names(&["a", "b"]), OutputDescriptor::regressor())
            .unwrap();

        for field in &schema.inputs {
            assert_eq!(field.kind(), Kind::Number);
        }

        // The threshold still applies to real samples
        let table =
            SampleTable::from_columns(vec![("a".to_string(), vec![json!(1), json!(2)])]).unwrap();
        let schema = SchemaBuilder::new(config)
            .build(Some(&table), &names(&["a"]), OutputDescriptor::regressor())
            .unwrap();
        assert_eq!(schema.inputs[0].kind(), Kind::Category);
    }

    #[test]
    fn test_build_follows_feature_order_not_table_order() {
        let features = names(&["visit", "smoker", "age"]);
        let schema = SchemaBuilder::default()
            .build(Some(&sample_table()), &features, OutputDescriptor::regressor())
            .unwrap();

        assert_eq!(schema.input_names(), vec!["visit", "smoker", "age"]);
        assert_eq!(schema.inputs[0].kind(), Kind::Date);
        assert_eq!(schema.inputs[1].kind(), Kind::Boolean);
        assert_eq!(schema.inputs[2].kind(), Kind::Number);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let features = names(&["age"]);
        let schema = SchemaBuilder::default()
            .build(Some(&sample_table()), &features, OutputDescriptor::regressor())
            .unwrap();
        assert_eq!(schema.inputs.len(), 1);
        assert!(schema.field("notes").is_none());
    }

    #[test]
    fn test_no_features() {
        let result = SchemaBuilder::default().build(None, &[], OutputDescriptor::regressor());
        assert_eq!(result, Err(SchemaError::NoFeatures));
    }

    #[test]
    fn test_duplicate_feature() {
        let result = SchemaBuilder::default().build(
            None,
            &names(&["a", "a"]),
            OutputDescriptor::regressor(),
        );
        assert_eq!(result, Err(SchemaError::DuplicateFeature("a".to_string())));
    }

    #[test]
    fn test_missing_columns() {
        let features = names(&["age", "income", "zip"]);
        let result = SchemaBuilder::default().build(
            Some(&sample_table()),
            &features,
            OutputDescriptor::regressor(),
        );
        let expected: BTreeSet<String> = names(&["income", "zip"]).into_iter().collect();
        assert_eq!(result, Err(SchemaError::MissingColumns(expected)));
    }

    #[test]
    fn test_empty_table() {
        let table = SampleTable::from_columns(vec![("age".to_string(), vec![])]).unwrap();
        let result = SchemaBuilder::default().build(
            Some(&table),
            &names(&["age"]),
            OutputDescriptor::regressor(),
        );
        assert_eq!(result, Err(SchemaError::EmptyTable));
    }

    #[test]
    fn test_all_null_column_is_text() {
        let table = SampleTable::from_columns(vec![(
            "comment".to_string(),
            vec![Value::Null, Value::Null],
        )])
        .unwrap();
        let schema = SchemaBuilder::default()
            .build(Some(&table), &names(&["comment"]), OutputDescriptor::regressor())
            .unwrap();
        assert_eq!(schema.inputs[0].info, KindInfo::empty_text());
    }

    #[test]
    fn test_classifier_output_attached() {
        let output = OutputDescriptor::classifier(names(&["no", "yes"]));
        let schema = SchemaBuilder::default()
            .build(None, &names(&["x"]), output.clone())
            .unwrap();
        assert_eq!(schema.outputs, vec![output]);
    }

    fn feature_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z][a-z0-9_]{0,10}", 1..30)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_placeholder_schema_preserves_order(features in feature_names()) {
            let schema = SchemaBuilder::default()
                .build(None, &features, OutputDescriptor::regressor())
                .unwrap();
            prop_assert_eq!(schema.inputs.len(), features.len());
            let names: Vec<String> = schema.inputs.iter().map(|f| f.name.clone()).collect();
            prop_assert_eq!(names, features);
        }

        #[test]
        fn prop_subset_of_table_columns_never_fails(
            rows in prop::collection::vec((any::<i16>(), "[a-c]{1,2}", any::<bool>()), 1..20),
            take in 1usize..=3
        ) {
            let table = SampleTable::from_columns(vec![
                ("n".to_string(), rows.iter().map(|r| json!(r.0)).collect()),
                ("s".to_string(), rows.iter().map(|r| json!(r.1)).collect()),
                ("b".to_string(), rows.iter().map(|r| json!(r.2)).collect()),
            ]).unwrap();
            let features: Vec<String> =
                ["b", "n", "s"][..take].iter().map(|s| s.to_string()).collect();

            let schema = SchemaBuilder::default()
                .build(Some(&table), &features, OutputDescriptor::regressor())
                .unwrap();
            prop_assert_eq!(schema.inputs.len(), take);
        }
    }
}
