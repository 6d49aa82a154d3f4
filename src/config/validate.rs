//! Configuration validation

use super::schema::ServiceConfig;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid category threshold: {0} (must be > 0)")]
    InvalidCategoryThreshold(usize),

    #[error("Invalid numeric category threshold: {0} (must be > 0)")]
    InvalidNumericCategoryThreshold(usize),

    #[error("No date formats configured")]
    NoDateFormats,

    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    #[error("Invalid max body size: {0} (must be > 0)")]
    InvalidMaxBodySize(usize),

    #[error("Invalid timeout: {0} (must be > 0)")]
    InvalidTimeout(u64),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

/// Validate a service configuration
///
/// Checks:
/// - Thresholds and limits are positive
/// - Date formats are non-empty chrono format strings
/// - CORS origins are valid header values
pub fn validate_config(config: &ServiceConfig) -> Result<(), ValidationError> {
    let inference = &config.inference;

    if inference.category_threshold == 0 {
        return Err(ValidationError::InvalidCategoryThreshold(0));
    }

    if let Some(0) = inference.numeric_category_threshold {
        return Err(ValidationError::InvalidNumericCategoryThreshold(0));
    }

    if inference.date_formats.is_empty() {
        return Err(ValidationError::NoDateFormats);
    }

    for format in &inference.date_formats {
        if !is_valid_date_format(format) {
            return Err(ValidationError::InvalidDateFormat(format.clone()));
        }
    }

    let server = &config.server;

    if server.max_body_size == 0 {
        return Err(ValidationError::InvalidMaxBodySize(0));
    }

    if server.timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout(0));
    }

    for origin in &server.cors_origins {
        if origin != "*" && axum::http::HeaderValue::from_str(origin).is_err() {
            return Err(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }

    Ok(())
}

/// A format is usable when it has at least one specifier and chrono accepts it
fn is_valid_date_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    let mut has_spec = false;
    for item in StrftimeItems::new(format) {
        match item {
            Item::Error => return false,
            Item::Numeric(..) | Item::Fixed(..) => has_spec = true,
            _ => {}
        }
    }
    has_spec
}
