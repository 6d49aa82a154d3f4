//! Input schema construction
//!
//! Turns a model's feature names, plus an optional sample table, into the
//! ordered list of field descriptors a client renders as a form, followed by
//! the model's output descriptor.
//!
//! # Example
//!
//! ```
//! use tabserve::infer::{InferenceConfig, Kind};
//! use tabserve::schema::{OutputDescriptor, SchemaBuilder};
//!
//! let features = vec!["age".to_string(), "income".to_string()];
//! let schema = SchemaBuilder::new(InferenceConfig::default())
//!     .build(None, &features, OutputDescriptor::regressor())
//!     .unwrap();
//!
//! assert_eq!(schema.inputs.len(), 2);
//! assert_eq!(schema.inputs[0].name, "age");
//! assert_eq!(schema.inputs[0].kind(), Kind::Number);
//! ```

mod builder;
mod descriptor;

pub use builder::{SchemaBuilder, PLACEHOLDER_SENTINEL};
pub use descriptor::{
    FieldDescriptor, OutputDescriptor, Schema, CLASSIFIER_TITLE, REGRESSOR_TITLE,
};

use std::collections::BTreeSet;
use thiserror::Error;

/// Schema construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("No feature names supplied")]
    NoFeatures,

    #[error("Sample table is empty")]
    EmptyTable,

    #[error("Sample table does not contain all required columns: {0:?}")]
    MissingColumns(BTreeSet<String>),

    #[error("Duplicate feature name: {0}")]
    DuplicateFeature(String),
}
