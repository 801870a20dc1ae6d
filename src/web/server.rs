//! Web server for depot.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use super::handlers::AppState;
use super::router::create_router;
use crate::config::ServerConfig;
use crate::{DepotError, Result};

/// HTTP server for the API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server over the assembled application state.
    pub fn new(config: &ServerConfig, app_state: Arc<AppState>) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| DepotError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state,
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        info!("web server listening on {}", self.addr);

        axum::serve(listener, router)
            .await
            .map_err(|e| DepotError::Config(format!("server error: {e}")))?;

        Ok(())
    }
}
