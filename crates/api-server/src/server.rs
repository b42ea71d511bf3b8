//! API server: campaign REST endpoints plus the Prometheus exporter.

use crate::rest::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use hyperlocal_core::config::AppConfig;
use hyperlocal_generator::MockBackend;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    config: AppConfig,
    backend: Arc<MockBackend>,
}

impl ApiServer {
    pub fn new(config: AppConfig, backend: Arc<MockBackend>) -> Self {
        Self { config, backend }
    }

    pub fn state(&self) -> AppState {
        AppState {
            store: self.backend.store().clone(),
            backend: self.backend.clone(),
            node_id: self.config.node_id.clone(),
            offer_max_chars: self.config.flow.offer_max_chars,
            start_time: Instant::now(),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state())
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/campaigns", post(rest::handle_create_campaign))
        .route("/v1/campaigns/:id", get(rest::handle_get_campaign))
        .route("/v1/campaigns/:id/regenerate", post(rest::handle_regenerate))
        .route("/v1/campaigns/:id/outputs", get(rest::handle_outputs))
        .route("/v1/campaigns/:id/status", get(rest::handle_status))
        .route("/v1/campaigns/:id/analytics", get(rest::handle_analytics))
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
