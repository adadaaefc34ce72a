//! Sales Prediction API server
//!
//! HTTP surface over a shared, read-only [`InferenceContext`]:
//! `POST /predict`, `GET /` and `GET /schema`.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::inference::InferenceContext;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub feature_names_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "Sales_Predictor.json".to_string())
                .into(),
            feature_names_path: std::env::var("FEATURE_NAMES_PATH")
                .unwrap_or_else(|_| "feature_names.json".to_string())
                .into(),
        }
    }
}

/// Load the artifacts and serve until ctrl+c.
///
/// Artifact loading happens before the listener is bound; a missing or
/// corrupt artifact aborts startup.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        model_path = %config.model_path.display(),
        feature_names_path = %config.feature_names_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Loading inference artifacts"
    );

    let context = InferenceContext::load(&config.model_path, &config.feature_names_path)
        .map_err(|e| {
            error!(error = %e, "Cannot start without a usable model");
            e
        })?;

    let state = Arc::new(AppState::new(Arc::new(context)));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        "Sales Prediction API listening"
    );
    info!(url = %format!("http://{}/predict", addr), "Prediction endpoint available");

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
