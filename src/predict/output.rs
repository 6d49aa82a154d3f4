//! Prediction response shapes

use crate::schema::{CLASSIFIER_TITLE, REGRESSOR_TITLE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One output slot of a prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredictionOutput {
    Classifier {
        /// Seconds spent in `predict`
        execution_time: f64,
        title: String,
        mapping: Vec<String>,
        /// Per-class probabilities for the submitted row, aligned with `mapping`
        probabilities: Vec<f64>,
        details: bool,
    },
    Regressor {
        execution_time: f64,
        title: String,
        values: Vec<Value>,
    },
}

impl PredictionOutput {
    pub fn classifier(mapping: Vec<String>, probabilities: Vec<f64>, elapsed: Duration) -> Self {
        Self::Classifier {
            execution_time: elapsed.as_secs_f64(),
            title: CLASSIFIER_TITLE.to_string(),
            mapping,
            probabilities,
            details: false,
        }
    }

    pub fn regressor(value: Value, elapsed: Duration) -> Self {
        Self::Regressor {
            execution_time: elapsed.as_secs_f64(),
            title: REGRESSOR_TITLE.to_string(),
            values: vec![value],
        }
    }

    pub fn execution_time(&self) -> f64 {
        match self {
            Self::Classifier { execution_time, .. } | Self::Regressor { execution_time, .. } => {
                *execution_time
            }
        }
    }
}

/// `{"outputs": [...]}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub outputs: Vec<PredictionOutput>,
}

impl From<PredictionOutput> for PredictionResponse {
    fn from(output: PredictionOutput) -> Self {
        Self {
            outputs: vec![output],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classifier_serialize() {
        let output = PredictionOutput::classifier(
            vec!["no".to_string(), "yes".to_string()],
            vec![0.25, 0.75],
            Duration::from_millis(2),
        );
        let value = serde_json::to_value(PredictionResponse::from(output)).unwrap();
        assert_eq!(
            value,
            json!({"outputs": [{
                "type": "classifier",
                "execution_time": 0.002,
                "title": "Predicted class",
                "mapping": ["no", "yes"],
                "probabilities": [0.25, 0.75],
                "details": false
            }]})
        );
    }

    #[test]
    fn test_regressor_serialize() {
        let output = PredictionOutput::regressor(json!(12.5), Duration::ZERO);
        assert_eq!(output.execution_time(), 0.0);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "regressor",
                "execution_time": 0.0,
                "title": "Predicted value",
                "values": [12.5]
            })
        );
    }
}
