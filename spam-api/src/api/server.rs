//! API Server - HTTP server for the prediction API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use crate::config::Config;
use crate::detector::SpamDetector;
use crate::error::Result;

/// Shared, read-only request state
pub struct AppState {
    /// Loaded artifacts; `None` when loading failed at startup
    pub detector: Option<SpamDetector>,
    /// Return raw inference errors in 500 bodies
    pub expose_errors: bool,
}

/// Build the router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home).fallback(handlers::get_only))
        .route("/health", get(handlers::health).fallback(handlers::get_only))
        .route(
            "/predict",
            post(handlers::predict).fallback(handlers::predict_wrong_method),
        )
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prediction API server
pub struct ApiServer {
    config: Config,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server around an optional detector
    pub fn new(config: Config, detector: Option<SpamDetector>) -> Self {
        let state = Arc::new(AppState {
            detector,
            expose_errors: config.server.expose_errors(),
        });

        Self { config, state }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind the listener and serve until the process stops
    pub async fn run(&self) -> Result<()> {
        let addr = &self.config.server.listen_addr;

        match self.state.detector {
            Some(ref detector) => info!("Serving predictions with {:?}", detector),
            None => warn!("Serving without a model, /predict will return 500"),
        }

        if self.config.server.debug {
            warn!("Debug mode is enabled, do not run it in production");
        }
        if self.state.expose_errors {
            info!("Inference errors are returned to callers");
        }

        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on http://{}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
