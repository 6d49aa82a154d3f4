//! Model adapter
//!
//! Wraps a trained estimator loaded from a serialized artifact and exposes
//! the capabilities the rest of the service relies on: task type, feature
//! order, class labels, prediction and class probabilities.
//!
//! Estimators are tagged variants of [`EstimatorSpec`] behind the
//! [`Estimator`] capability trait; the adapter never mutates them.

mod adapter;
mod artifact;
mod cache;
mod cluster;
mod dummy;
mod estimator;
mod linear;

pub use adapter::{label_to_string, ModelAdapter, ModelMetadata};
pub use artifact::{load_artifact, parse_artifact, save_artifact, ArtifactFormat, ModelArtifact};
pub use cache::{artifact_digest, ModelCache};
pub use cluster::KMeans;
pub use dummy::{DummyClassifier, DummyRegressor};
pub use estimator::{Estimator, EstimatorSpec, TaskType};
pub use linear::{LinearRegression, LogisticRegression};

use thiserror::Error;

/// Model loading and capability errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model must be a classifier or regressor, got {specific_type} ({estimator_type})")]
    UnsupportedTask {
        specific_type: String,
        estimator_type: String,
    },

    #[error("No feature names found in the model ({0})")]
    NoFeatureNames(String),

    #[error("Unsupported model artifact format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}
