//! Server application state
//!
//! Shared, read-mostly state: configuration plus the model cache.

use crate::config::ServiceConfig;
use crate::infer::InferenceConfig;
use crate::model::ModelCache;
use crate::server::ServerConfig;
use std::sync::Arc;
use std::time::Instant;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub cache: Arc<ModelCache>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let cache = ModelCache::new(config.cache.capacity);
        Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
            start_time: Instant::now(),
        }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    pub fn inference(&self) -> &InferenceConfig {
        &self.config.inference
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
