//! Linear estimators

use super::estimator::{argmax, check_width, Estimator, TaskType};
use super::ModelError;
use crate::predict::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordinary least squares (and ridge) regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    fn decision(&self, x: &[f64]) -> f64 {
        dot(&self.coef, x) + self.intercept
    }
}

impl Estimator for LinearRegression {
    fn task_type(&self) -> TaskType {
        TaskType::Regressor
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn predict(&self, x: &[f64]) -> Result<Value, PredictionError> {
        check_width(x, self.n_features(), "LinearRegression")?;
        finite_number(self.decision(x))
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.coef.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "LinearRegression has no coefficients".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logistic regression, binary (one coefficient row) or multinomial
/// (one row per class)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<Value>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(classes: Vec<Value>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Self {
        Self {
            classes,
            coef,
            intercept,
        }
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    fn probabilities(&self, x: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_width(x, self.n_features(), "LogisticRegression")?;

        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| dot(row, x) + b)
            .collect();

        let probs = match scores.first() {
            Some(&z) if self.is_binary() => {
                let p = sigmoid(z);
                vec![1.0 - p, p]
            }
            _ => softmax(&scores),
        };

        if probs.iter().any(|p| !p.is_finite()) {
            return Err(PredictionError::InferenceFailure(
                "LogisticRegression produced non-finite probabilities".to_string(),
            ));
        }
        Ok(probs)
    }
}

impl Estimator for LogisticRegression {
    fn task_type(&self) -> TaskType {
        TaskType::Classifier
    }

    fn n_features(&self) -> Option<usize> {
        self.coef.first().map(Vec::len)
    }

    fn classes(&self) -> Option<&[Value]> {
        Some(&self.classes)
    }

    fn predict(&self, x: &[f64]) -> Result<Value, PredictionError> {
        let probs = self.probabilities(x)?;
        argmax(&probs)
            .and_then(|i| self.classes.get(i).cloned())
            .ok_or_else(|| {
                PredictionError::InferenceFailure("LogisticRegression has no classes".to_string())
            })
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<Vec<f64>>, PredictionError> {
        self.probabilities(x).map(Some)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let invalid =
            |msg: String| -> Result<(), ModelError> { Err(ModelError::InvalidArtifact(msg)) };

        if self.classes.len() < 2 {
            return invalid(format!(
                "LogisticRegression needs at least 2 classes, got {}",
                self.classes.len()
            ));
        }

        let expected_rows = if self.classes.len() == 2 { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows && self.coef.len() != self.classes.len() {
            return invalid(format!(
                "LogisticRegression has {} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            ));
        }

        if self.intercept.len() != self.coef.len() {
            return invalid(format!(
                "LogisticRegression has {} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            ));
        }

        let width = self.n_features().unwrap_or(0);
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return invalid(
                "LogisticRegression coefficient rows must share a non-zero width".to_string(),
            );
        }

        Ok(())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn finite_number(value: f64) -> Result<Value, PredictionError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| PredictionError::InferenceFailure(format!("non-finite prediction: {value}")))
}
