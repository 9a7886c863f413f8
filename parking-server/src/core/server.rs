//! Server Implementation
//!
//! HTTP server startup and shutdown

use std::net::SocketAddr;

use crate::core::{Result, ServerState};
use crate::services::http;

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Serve until Ctrl-C, then drain connections and stop background tasks
    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();
        let config = &self.state.config;

        let tasks = state.start_background_tasks();

        let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
        tracing::info!(
            environment = %config.environment,
            admin_auth_required = config.admin_auth_required,
            "Parking server starting on {}",
            addr
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        let app = http::build_router(state);
        let served = http::serve(app, addr, config.shutdown_timeout(), shutdown).await;

        tasks.shutdown().await;
        served.map_err(|e| crate::core::ServerError::Internal(anyhow::anyhow!(e)))?;

        Ok(())
    }
}
