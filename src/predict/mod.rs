//! Prediction input normalization and output shaping
//!
//! A submitted record is a flat JSON object. [`normalize`] turns it into a
//! single [`FeatureRow`] ordered the way the model expects; the prediction
//! itself is shaped into a [`PredictionResponse`].

mod normalize;
mod output;

pub use normalize::{normalize, parse_record, FeatureRow};
pub use output::{PredictionOutput, PredictionResponse};

use thiserror::Error;

/// Errors raised while preparing or running a prediction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Missing required field '{field}' (required: {required:?}, supplied: {supplied:?})")]
    MissingField {
        field: String,
        required: Vec<String>,
        supplied: Vec<String>,
    },

    #[error("Prediction record is empty")]
    EmptyRecord,

    #[error("Invalid prediction record: {0}")]
    InvalidRecord(String),

    #[error("Inference failed: {0}")]
    InferenceFailure(String),
}
