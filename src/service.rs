//! Request-level operations shared by the HTTP server and the CLI
//!
//! Each function is synchronous and independent of any other request.

use crate::infer::InferenceConfig;
use crate::model::{ModelAdapter, ModelMetadata, TaskType};
use crate::predict::{normalize, PredictionError, PredictionOutput, PredictionResponse};
use crate::schema::{Schema, SchemaBuilder};
use crate::table::SampleTable;
use crate::Result;
use serde_json::{Map, Value};
use std::time::Instant;

/// Metadata for an uploaded model; unsupported tasks are rejected
pub fn describe_model(adapter: &ModelAdapter, file_name: &str) -> Result<ModelMetadata> {
    Ok(adapter.metadata(file_name)?)
}

/// Input schema for the model, classified from `table` when supplied
pub fn build_schema(
    adapter: &ModelAdapter,
    table: Option<&SampleTable>,
    config: &InferenceConfig,
) -> Result<Schema> {
    let output = adapter.output_descriptor()?;
    let features = adapter.feature_names()?;
    let schema = SchemaBuilder::new(config.clone()).build(table, &features, output)?;

    tracing::info!(
        model = adapter.specific_type(),
        features = schema.inputs.len(),
        sampled = table.is_some(),
        "schema built"
    );
    Ok(schema)
}

/// Normalize a single record and run it through the model
pub fn predict_record(
    adapter: &ModelAdapter,
    record: &Map<String, Value>,
) -> Result<PredictionResponse> {
    let task = adapter.ensure_supported()?;
    let row = normalize(record, adapter.fitted_feature_names())?;

    let start = Instant::now();
    let prediction = adapter.predict(&row)?;
    let elapsed = start.elapsed();

    let output = match task {
        TaskType::Classifier => {
            let probabilities = adapter.predict_proba(&row)?.ok_or_else(|| {
                PredictionError::InferenceFailure(format!(
                    "{} does not provide class probabilities",
                    adapter.specific_type()
                ))
            })?;
            PredictionOutput::classifier(
                adapter.classes().unwrap_or_default(),
                probabilities,
                elapsed,
            )
        }
        _ => PredictionOutput::regressor(prediction, elapsed),
    };

    tracing::info!(
        model = adapter.specific_type(),
        elapsed_us = elapsed.as_micros() as u64,
        "prediction complete"
    );
    Ok(output.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::Kind;
    use crate::model::{
        DummyRegressor, EstimatorSpec, KMeans, LinearRegression, LogisticRegression, ModelArtifact,
    };
    use crate::schema::OutputDescriptor;
    use crate::Error;
    use serde_json::json;

    fn churn_model() -> ModelAdapter {
        ModelAdapter::new(
            ModelArtifact::new(EstimatorSpec::LogisticRegression(LogisticRegression::new(
                vec![json!("no"), json!("yes")],
                vec![vec![0.05, -0.00002]],
                vec![-0.5],
            )))
            .with_feature_names(vec!["age".to_string(), "income".to_string()]),
        )
    }

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_end_to_end_classifier() {
        let response =
            predict_record(&churn_model(), &record(json!({"income": 50000, "age": 30}))).unwrap();

        assert_eq!(response.outputs.len(), 1);
        match &response.outputs[0] {
            PredictionOutput::Classifier {
                mapping,
                probabilities,
                details,
                ..
            } => {
                assert_eq!(mapping, &vec!["no".to_string(), "yes".to_string()]);
                assert_eq!(probabilities.len(), 2);
                assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
                assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
                assert!(!details);
            }
            other => panic!("expected classifier output, got {other:?}"),
        }
    }

    #[test]
    fn test_regressor_without_fitted_names_uses_sorted_keys() {
        let adapter = ModelAdapter::new(ModelArtifact::new(EstimatorSpec::LinearRegression(
            LinearRegression::new(vec![1.0, 10.0], 0.0),
        )));
        // sorted order is [a, b] -> 1*1 + 10*2
        let response = predict_record(&adapter, &record(json!({"b": 2, "a": 1}))).unwrap();
        match &response.outputs[0] {
            PredictionOutput::Regressor { values, .. } => assert_eq!(values, &vec![json!(21.0)]),
            other => panic!("expected regressor output, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = predict_record(&churn_model(), &record(json!({"age": 30}))).unwrap_err();
        assert!(matches!(
            err,
            Error::Prediction(PredictionError::MissingField { ref field, .. }) if field == "income"
        ));
    }

    #[test]
    fn test_unsupported_model_rejected_everywhere() {
        let adapter = ModelAdapter::new(ModelArtifact::new(EstimatorSpec::KMeans(KMeans {
            cluster_centers: vec![vec![0.0, 1.0]],
        })));
        assert!(describe_model(&adapter, "k.json").is_err());
        assert!(build_schema(&adapter, None, &InferenceConfig::default()).is_err());
        assert!(predict_record(&adapter, &record(json!({"x0": 1, "x1": 2}))).is_err());
    }

    #[test]
    fn test_build_schema_placeholder() {
        let schema = build_schema(&churn_model(), None, &InferenceConfig::default()).unwrap();
        assert_eq!(schema.input_names(), vec!["age", "income"]);
        assert!(schema.inputs.iter().all(|f| f.kind() == Kind::Number));
        assert_eq!(
            schema.outputs,
            vec![OutputDescriptor::classifier(vec!["no".into(), "yes".into()])]
        );
    }

    #[test]
    fn test_build_schema_without_feature_names() {
        let adapter = ModelAdapter::new(ModelArtifact::new(EstimatorSpec::DummyRegressor(
            DummyRegressor {
                constant: 0.0,
                n_features_in: None,
            },
        )));
        let err = build_schema(&adapter, None, &InferenceConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No feature names"));
    }

    #[test]
    fn test_build_schema_with_table() {
        let table = SampleTable::from_records(&[
            record(json!({"age": 30, "income": 1000, "extra": "x"})),
            record(json!({"age": 50, "income": 2000, "extra": "y"})),
        ]);
        let schema =
            build_schema(&churn_model(), Some(&table), &InferenceConfig::default()).unwrap();
        assert_eq!(schema.inputs.len(), 2);
        assert_eq!(schema.inputs[0].kind(), Kind::Number);
    }

    #[test]
    fn test_inference_failure_on_text_value() {
        let input = record(json!({"age": "old", "income": 1}));
        let err = predict_record(&churn_model(), &input).unwrap_err();
        assert!(matches!(
            err,
            Error::Prediction(PredictionError::InferenceFailure(_))
        ));
    }
}
