//! API router and server setup
//!
//! Configures axum routes and runs the HTTP server.

use crate::config::ServiceConfig;
use crate::server::{
    handlers::{build_schema, health_check, model_metadata, predict},
    state::AppState,
    Result, ServerConfig, ServerError,
};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Model serving server
pub struct ModelServer {
    state: AppState,
}

impl ModelServer {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    fn server_config(&self) -> &ServerConfig {
        self.state.server()
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let config = self.server_config();

        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/metadata", post(model_metadata))
            .route("/build_schema", post(build_schema))
            .route("/predict", post(predict))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::max(config.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeout_secs)))
            .layer(TraceLayer::new_for_http());

        if config.cors_enabled {
            app = app.layer(cors_layer(&config.cors_origins));
        }

        app
    }

    /// Run the server until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let addr = self.address();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

        tracing::info!(
            address = %addr,
            cache_capacity = self.state.cache.capacity(),
            "tabserve listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Io)?;

        tracing::info!("server stopped");
        Ok(())
    }

    pub fn address(&self) -> SocketAddr {
        self.server_config().address
    }

    /// Get the current state (for testing)
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// `*` allows any origin; otherwise only the listed origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

// =============================================================================
// Tests
// =============================================================================
