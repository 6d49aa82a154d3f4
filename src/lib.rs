//! # tabserve: Tabular Model Serving
//!
//! tabserve loads trained tabular estimators and exposes three operations
//! over them: identifying metadata, an input schema a client can render as a
//! form, and single-record prediction.
//!
//! ## Architecture
//!
//! - **infer**: Column kind classification (text, number, category, boolean, date)
//! - **table**: Sample tables decoded from JSON or CSV
//! - **schema**: Field descriptors in model feature order plus the output slot
//! - **model**: Estimator artifacts, the model adapter and the model cache
//! - **predict**: Record normalization and prediction output
//! - **service**: Request-level operations shared by server and CLI
//! - **server**: HTTP boundary (axum)
//! - **config**: Declarative YAML configuration and CLI

pub mod config;
pub mod infer;
pub mod model;
pub mod predict;
pub mod schema;
pub mod server;
pub mod service;
pub mod table;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::ModelAdapter;
pub use schema::{Schema, SchemaBuilder};
