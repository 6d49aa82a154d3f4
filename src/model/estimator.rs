//! Estimator capability interface

use super::cluster::KMeans;
use super::dummy::{DummyClassifier, DummyRegressor};
use super::linear::{LinearRegression, LogisticRegression};
use super::ModelError;
use crate::predict::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What an estimator predicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Classifier,
    Regressor,
    /// Anything else (clusterers, transformers); cannot be served
    Unsupported,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Classifier => write!(f, "classifier"),
            TaskType::Regressor => write!(f, "regressor"),
            TaskType::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Capabilities of a trained estimator
pub trait Estimator {
    /// What the estimator predicts
    fn task_type(&self) -> TaskType;

    /// Estimator family as reported by the estimator itself
    /// (`classifier`, `regressor`, `clusterer`)
    fn estimator_type(&self) -> &'static str {
        match self.task_type() {
            TaskType::Classifier => "classifier",
            TaskType::Regressor => "regressor",
            TaskType::Unsupported => "unknown",
        }
    }

    /// Number of input features, when the fitted parameters determine it
    fn n_features(&self) -> Option<usize>;

    /// Generated feature names, `x0..x{n-1}`, when the width is known
    fn feature_names_out(&self) -> Option<Vec<String>> {
        self.n_features()
            .map(|n| (0..n).map(|i| format!("x{i}")).collect())
    }

    /// Class labels in model order (classifiers only)
    fn classes(&self) -> Option<&[Value]> {
        None
    }

    /// Predict one row of numeric features
    fn predict(&self, x: &[f64]) -> Result<Value, PredictionError>;

    /// Per-class probabilities aligned with [`Estimator::classes`]
    fn predict_proba(&self, _x: &[f64]) -> Result<Option<Vec<f64>>, PredictionError> {
        Ok(None)
    }

    /// Check fitted parameters for internal consistency
    fn validate(&self) -> Result<(), ModelError>;
}

/// Serialized estimator, tagged by its class name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estimator")]
pub enum EstimatorSpec {
    LinearRegression(LinearRegression),
    Ridge(LinearRegression),
    LogisticRegression(LogisticRegression),
    DummyClassifier(DummyClassifier),
    DummyRegressor(DummyRegressor),
    KMeans(KMeans),
}

impl EstimatorSpec {
    /// Concrete estimator class name
    pub fn specific_type(&self) -> &'static str {
        match self {
            EstimatorSpec::LinearRegression(_) => "LinearRegression",
            EstimatorSpec::Ridge(_) => "Ridge",
            EstimatorSpec::LogisticRegression(_) => "LogisticRegression",
            EstimatorSpec::DummyClassifier(_) => "DummyClassifier",
            EstimatorSpec::DummyRegressor(_) => "DummyRegressor",
            EstimatorSpec::KMeans(_) => "KMeans",
        }
    }

    fn inner(&self) -> &dyn Estimator {
        match self {
            EstimatorSpec::LinearRegression(e) | EstimatorSpec::Ridge(e) => e,
            EstimatorSpec::LogisticRegression(e) => e,
            EstimatorSpec::DummyClassifier(e) => e,
            EstimatorSpec::DummyRegressor(e) => e,
            EstimatorSpec::KMeans(e) => e,
        }
    }
}

impl Estimator for EstimatorSpec {
    fn task_type(&self) -> TaskType {
        self.inner().task_type()
    }

    fn estimator_type(&self) -> &'static str {
        self.inner().estimator_type()
    }

    fn n_features(&self) -> Option<usize> {
        self.inner().n_features()
    }

    fn feature_names_out(&self) -> Option<Vec<String>> {
        self.inner().feature_names_out()
    }

    fn classes(&self) -> Option<&[Value]> {
        self.inner().classes()
    }

    fn predict(&self, x: &[f64]) -> Result<Value, PredictionError> {
        self.inner().predict(x)
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<Vec<f64>>, PredictionError> {
        self.inner().predict_proba(x)
    }

    fn validate(&self) -> Result<(), ModelError> {
        self.inner().validate()
    }
}

/// Reject rows whose width does not match the fitted width
pub(crate) fn check_width(
    x: &[f64],
    expected: Option<usize>,
    name: &str,
) -> Result<(), PredictionError> {
    match expected {
        Some(n) if n != x.len() => Err(PredictionError::InferenceFailure(format!(
            "X has {} features, but {name} is expecting {n} features as input",
            x.len()
        ))),
        _ => Ok(()),
    }
}

/// Index of the largest value; first wins on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
