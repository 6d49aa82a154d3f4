//! Baseline estimators that ignore their inputs

use super::estimator::{argmax, Estimator, TaskType};
use super::ModelError;
use crate::predict::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PRIOR_SUM_TOLERANCE: f64 = 1e-6;

/// Predicts the most frequent class with the training class prior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyClassifier {
    pub classes: Vec<Value>,
    pub class_prior: Vec<f64>,
    /// Width the estimator was fitted on, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features_in: Option<usize>,
}

impl Estimator for DummyClassifier {
    fn task_type(&self) -> TaskType {
        TaskType::Classifier
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features_in
    }

    /// Dummy estimators never expose generated feature names
    fn feature_names_out(&self) -> Option<Vec<String>> {
        None
    }

    fn classes(&self) -> Option<&[Value]> {
        Some(&self.classes)
    }

    fn predict(&self, _x: &[f64]) -> Result<Value, PredictionError> {
        argmax(&self.class_prior)
            .and_then(|i| self.classes.get(i).cloned())
            .ok_or_else(|| {
                PredictionError::InferenceFailure("DummyClassifier has no classes".to_string())
            })
    }

    fn predict_proba(&self, _x: &[f64]) -> Result<Option<Vec<f64>>, PredictionError> {
        Ok(Some(self.class_prior.clone()))
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "DummyClassifier has no classes".to_string(),
            ));
        }
        if self.classes.len() != self.class_prior.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "DummyClassifier has {} classes but {} priors",
                self.classes.len(),
                self.class_prior.len()
            )));
        }
        if self.class_prior.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ModelError::InvalidArtifact(
                "DummyClassifier priors must be finite and non-negative".to_string(),
            ));
        }
        let total: f64 = self.class_prior.iter().sum();
        if (total - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(ModelError::InvalidArtifact(format!(
                "DummyClassifier priors sum to {total}, expected 1"
            )));
        }
        Ok(())
    }
}

/// Predicts a constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyRegressor {
    pub constant: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features_in: Option<usize>,
}

impl Estimator for DummyRegressor {
    fn task_type(&self) -> TaskType {
        TaskType::Regressor
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features_in
    }

    fn feature_names_out(&self) -> Option<Vec<String>> {
        None
    }

    fn predict(&self, _x: &[f64]) -> Result<Value, PredictionError> {
        serde_json::Number::from_f64(self.constant)
            .map(Value::Number)
            .ok_or_else(|| {
                PredictionError::InferenceFailure(
                    "DummyRegressor constant is not finite".to_string(),
                )
            })
    }

    fn validate(&self) -> Result<(), ModelError> {
        if !self.constant.is_finite() {
            return Err(ModelError::InvalidArtifact(
                "DummyRegressor constant must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
