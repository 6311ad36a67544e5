//! Application startup and lifecycle management.
//!
//! Everything the handlers need is constructed here and passed in through
//! [`AppState`]; there are no process-wide singletons besides the metrics
//! registry.

use crate::config::FortuneConfig;
use crate::handlers::{create_fortune, health_check, index, metrics, readiness_check};
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::FortuneService;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub fortune: Arc<FortuneService>,
}

impl AppState {
    pub fn new(fortune: FortuneService) -> Self {
        Self {
            fortune: Arc::new(fortune),
        }
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/api/fortune", post(create_fortune))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider from `config`.
    pub async fn build(config: FortuneConfig) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            base_url: config.google.api_base.clone(),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.fortune.model,
            thinking_effort = %config.fortune.thinking_effort,
            persona_enabled = config.fortune.persona_enabled,
            tone_instruction_enabled = config.fortune.tone_instruction_enabled,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around any text provider.
    pub async fn build_with_provider(
        config: FortuneConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState::new(FortuneService::new(provider, config.fortune_options()));

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Fortune service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
