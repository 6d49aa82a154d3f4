//! Service configuration schema

use crate::infer::InferenceConfig;
use crate::server::ServerConfig;
use serde::{Deserialize, Serialize};

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener and boundary layers
    pub server: ServerConfig,

    /// Column classification thresholds and date formats
    pub inference: InferenceConfig,

    /// Decoded model cache
    pub cache: CacheConfig,
}

/// Model cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of decoded models kept; 0 disables the cache
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 16 }
    }
}
