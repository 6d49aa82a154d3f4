//! Declarative YAML configuration
//!
//! Every section and key is optional.
//!
//! # Example
//!
//! ```yaml
//! server:
//!   address: 127.0.0.1:8000
//!   cors_origins: ["https://localhost:8443"]
//!   max_body_size: 10485760
//!   timeout_secs: 30
//!
//! inference:
//!   category_threshold: 20
//!   date_formats: ["%Y-%m-%d", "%d/%m/%Y"]
//!
//! cache:
//!   capacity: 16
//! ```

mod cli;
mod load;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, MetadataArgs, OutputFormat, PredictArgs,
    SchemaArgs, ServeArgs,
};
pub use load::{load_config, parse_config};
pub use schema::{CacheConfig, ServiceConfig};
pub use validate::{validate_config, ValidationError};
