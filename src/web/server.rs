//! Web 伺服器

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::utils::error::{DoseError, Result};
use crate::web::handlers::{calculate_api, calculate_form, health, index, AppState};

pub struct WebServer {
    addr: SocketAddr,
    app: Router,
}

impl WebServer {
    pub fn new(config: AppConfig) -> Result<Self> {
        let addr = config.socket_addr()?;
        let app = create_app(config);
        Ok(Self { addr, app })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DoseError::ServerError {
                message: format!("Failed to run web server: {}", e),
            })?;

        info!("Web server stopped");
        Ok(())
    }
}

pub fn create_app(config: AppConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    Router::new()
        .route("/", get(index).post(calculate_form))
        .route("/health", get(health))
        .route("/api/calculate", post(calculate_api))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
