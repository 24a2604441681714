//! Application startup and lifecycle management.

use crate::config::PoetryConfig;
use crate::handlers::{generate_and_post, health_check, readiness_check};
use crate::services::providers::{
    DiscordWebhookDelivery, GeminiPoemGenerator, MessageDelivery, PoemGenerator,
};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn PoemGenerator>,
    pub delivery: Arc<dyn MessageDelivery>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PoetryConfig) -> Result<Self, AppError> {
        let generator: Arc<dyn PoemGenerator> =
            Arc::new(GeminiPoemGenerator::new(config.gemini.clone()));
        tracing::info!(model = %config.gemini.model, "Initialized Gemini poem generator");

        if config.discord.webhook_url.is_none() {
            tracing::warn!("DISCORD_WEBHOOK_URL is not set; deliveries will fail");
        }
        let delivery: Arc<dyn MessageDelivery> =
            Arc::new(DiscordWebhookDelivery::new(config.discord.clone()));

        let state = AppState {
            generator,
            delivery,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Poetry service listening on port {}", port);

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

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Router::new()
            .route("/generate_and_post", post(generate_and_post))
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
