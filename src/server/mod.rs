//! HTTP boundary
//!
//! Exposes metadata, schema and prediction over multipart uploads.
//!
//! # Example
//!
//! ```no_run
//! use tabserve::server::ModelServer;
//! use tabserve::config::ServiceConfig;
//!
//! # async fn run() -> Result<(), tabserve::server::ServerError> {
//! let server = ModelServer::new(ServiceConfig::default());
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod handlers;
mod state;

pub use api::ModelServer;
pub use handlers::{build_schema, health_check, model_metadata, predict};
pub use state::AppState;

use crate::predict::PredictionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bind error: {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed upload: missing or unreadable multipart fields
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Service(#[from] crate::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Inference failures are server faults; everything else is the client's
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Service(crate::Error::Prediction(
                PredictionError::InferenceFailure(_),
            )) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Service(crate::Error::Io(_) | crate::Error::ConfigError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Service(_) => StatusCode::BAD_REQUEST,
            ServerError::Bind(_) | ServerError::Io(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.to_string());

        if status.is_server_error() {
            tracing::error!(request_id = %body.request_id, error = %body.error, "request failed");
        } else {
            tracing::warn!(request_id = %body.request_id, error = %body.error, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub address: SocketAddr,
    /// Enable CORS
    pub cors_enabled: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            cors_enabled: true,
            cors_origins: vec![
                "https://localhost:8443".to_string(),
                "http://localhost:8443".to_string(),
            ],
            timeout_secs: 30,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ServerConfig {
    pub fn with_address(mut self, addr: SocketAddr) -> Self {
        self.address = addr;
        self
    }

    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub request_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            request_id: request_id(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Models currently held by the model cache
    pub cached_models: usize,
}

/// Generate a request ID
pub(crate) fn request_id() -> String {
    format!("req-{:016x}", rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use crate::schema::SchemaError;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.address.port(), 8000);
        assert!(config.cors_enabled);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_server_config_partial_yaml() {
        let config: ServerConfig = serde_yaml::from_str("address: 0.0.0.0:9000\n").unwrap();
        assert_eq!(config.address.port(), 9000);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_status_codes() {
        let inference: ServerError =
            crate::Error::from(PredictionError::InferenceFailure("boom".to_string())).into();
        assert_eq!(inference.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing: ServerError = crate::Error::from(PredictionError::MissingField {
            field: "a".to_string(),
            required: vec!["a".to_string()],
            supplied: vec![],
        })
        .into();
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let unsupported: ServerError = crate::Error::from(ModelError::UnsupportedTask {
            specific_type: "KMeans".to_string(),
            estimator_type: "clusterer".to_string(),
        })
        .into();
        assert_eq!(unsupported.status_code(), StatusCode::BAD_REQUEST);

        let schema: ServerError = crate::Error::from(SchemaError::EmptyTable).into();
        assert_eq!(schema.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ServerError::Validation("no model_file".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_request_id_format() {
        let id = request_id();
        assert!(id.starts_with("req-"));
        assert_eq!(id.len(), 4 + 16);
    }

    #[test]
    fn test_error_response_serialize() {
        let body = ErrorResponse::new("bad");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "bad");
        assert!(json["request_id"].as_str().unwrap().starts_with("req-"));
    }
}
