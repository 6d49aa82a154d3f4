//! Model adapter

use super::artifact::{load_artifact, parse_artifact, ArtifactFormat, ModelArtifact};
use super::estimator::{Estimator, TaskType};
use super::ModelError;
use crate::predict::{FeatureRow, PredictionError};
use crate::schema::OutputDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Identifying metadata reported for an uploaded model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub file_name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub specific_type: String,
}

/// Read-only view over a loaded estimator
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAdapter {
    artifact: ModelArtifact,
}

impl ModelAdapter {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Decode an uploaded artifact; `file_name` selects the format
    pub fn from_bytes(bytes: &[u8], file_name: &str) -> Result<Self, ModelError> {
        let format = ArtifactFormat::from_file_name(file_name)?;
        parse_artifact(bytes, format).map(Self::new)
    }

    /// Load an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        load_artifact(path).map(Self::new)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Concrete estimator class name, e.g. `LogisticRegression`
    pub fn specific_type(&self) -> &'static str {
        self.artifact.estimator.specific_type()
    }

    pub fn task_type(&self) -> TaskType {
        self.artifact.estimator.task_type()
    }

    /// Fail with [`ModelError::UnsupportedTask`] unless the model is a
    /// classifier or regressor
    pub fn ensure_supported(&self) -> Result<TaskType, ModelError> {
        match self.task_type() {
            TaskType::Unsupported => Err(ModelError::UnsupportedTask {
                specific_type: self.specific_type().to_string(),
                estimator_type: self.artifact.estimator.estimator_type().to_string(),
            }),
            task => Ok(task),
        }
    }

    /// Feature names in model order
    ///
    /// Fit-time names take precedence; otherwise the estimator's generated
    /// names are used. Estimators with neither fail with
    /// [`ModelError::NoFeatureNames`].
    pub fn feature_names(&self) -> Result<Vec<String>, ModelError> {
        if let Some(names) = &self.artifact.feature_names_in {
            return Ok(names.clone());
        }
        self.artifact
            .estimator
            .feature_names_out()
            .ok_or_else(|| ModelError::NoFeatureNames(self.specific_type().to_string()))
    }

    /// Fit-time column names only; used to order prediction records
    pub fn fitted_feature_names(&self) -> Option<&[String]> {
        self.artifact.feature_names_in.as_deref()
    }

    /// Class labels stringified, in model order
    pub fn classes(&self) -> Option<Vec<String>> {
        self.artifact
            .estimator
            .classes()
            .map(|classes| classes.iter().map(label_to_string).collect())
    }

    /// Output slot for the model's task
    pub fn output_descriptor(&self) -> Result<OutputDescriptor, ModelError> {
        match self.ensure_supported()? {
            TaskType::Classifier => Ok(OutputDescriptor::classifier(
                self.classes().unwrap_or_default(),
            )),
            _ => Ok(OutputDescriptor::regressor()),
        }
    }

    /// Metadata reported for the uploaded file
    pub fn metadata(&self, file_name: &str) -> Result<ModelMetadata, ModelError> {
        let task_type = self.ensure_supported()?;
        Ok(ModelMetadata {
            file_name: file_name.to_string(),
            task_type,
            specific_type: self.specific_type().to_string(),
        })
    }

    /// Predict a single normalized row
    pub fn predict(&self, row: &FeatureRow) -> Result<Value, PredictionError> {
        let x = coerce_row(row)?;
        self.artifact.estimator.predict(&x)
    }

    /// Class probabilities for a single normalized row
    pub fn predict_proba(&self, row: &FeatureRow) -> Result<Option<Vec<f64>>, PredictionError> {
        let x = coerce_row(row)?;
        self.artifact.estimator.predict_proba(&x)
    }
}

/// Render a class label the way it is shown to clients
pub fn label_to_string(label: &Value) -> String {
    match label {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_row(row: &FeatureRow) -> Result<Vec<f64>, PredictionError> {
    row.columns
        .iter()
        .zip(&row.values)
        .map(|(name, value)| {
            coerce_value(value).ok_or_else(|| {
                PredictionError::InferenceFailure(format!(
                    "could not convert value {value} of feature '{name}' to a number"
                ))
            })
        })
        .collect()
}

fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
