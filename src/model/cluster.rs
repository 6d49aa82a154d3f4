//! Clustering estimators
//!
//! Clusterers load and describe themselves but are never served: the
//! adapter reports them as unsupported.

use super::estimator::{argmax, check_width, Estimator, TaskType};
use super::ModelError;
use crate::predict::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// K-means with fitted cluster centers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    pub cluster_centers: Vec<Vec<f64>>,
}

impl Estimator for KMeans {
    fn task_type(&self) -> TaskType {
        TaskType::Unsupported
    }

    fn estimator_type(&self) -> &'static str {
        "clusterer"
    }

    fn n_features(&self) -> Option<usize> {
        self.cluster_centers.first().map(Vec::len)
    }

    fn predict(&self, x: &[f64]) -> Result<Value, PredictionError> {
        check_width(x, self.n_features(), "KMeans")?;
        let neg_dist: Vec<f64> = self
            .cluster_centers
            .iter()
            .map(|c| -c.iter().zip(x).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
            .collect();
        argmax(&neg_dist)
            .map(Value::from)
            .ok_or_else(|| PredictionError::InferenceFailure("KMeans has no clusters".to_string()))
    }

    fn validate(&self) -> Result<(), ModelError> {
        let width = self.n_features().unwrap_or(0);
        if width == 0 || self.cluster_centers.iter().any(|c| c.len() != width) {
            return Err(ModelError::InvalidArtifact(
                "KMeans cluster centers must share a non-zero width".to_string(),
            ));
        }
        Ok(())
    }
}
