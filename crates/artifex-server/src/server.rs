//! Server assembly and accept loop

use std::sync::Arc;

use tokio::net::TcpListener;

use artifex_core::errors::{ArtifexError, Result};

use crate::actions;
use crate::config::ServerConfig;
use crate::connection::handle_connection;
use crate::registry::ActionRegistry;
use crate::state::AppState;

/// Immutable state shared by every connection task
pub struct ServerInner {
    pub config: ServerConfig,
    pub registry: ActionRegistry,
    pub app: AppState,
}

/// The router endpoint
pub struct Server {
    inner: Arc<ServerInner>,
}

impl Server {
    /// Assemble a server with the built-in action set
    pub fn new(config: ServerConfig, app: AppState) -> Self {
        let mut registry = ActionRegistry::new();
        actions::register_all(&mut registry);
        Self::with_registry(config, app, registry)
    }

    /// Assemble with a caller-supplied registry (tests add handlers here)
    pub fn with_registry(config: ServerConfig, app: AppState, registry: ActionRegistry) -> Self {
        Self {
            inner: Arc::new(ServerInner {
                config,
                registry,
                app,
            }),
        }
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.inner.config.listen)
            .await
            .map_err(|e| ArtifexError::Internal {
                message: format!("cannot bind {}: {}", self.inner.config.listen, e),
            })?;
        self.serve(listener).await
    }

    /// Accept loop over an already-bound listener
    ///
    /// Never returns under normal operation; accept errors are logged
    /// and the loop continues.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr().map_err(|e| ArtifexError::Internal {
            message: e.to_string(),
        })?;
        tracing::info!(
            listen = %local,
            actions = self.inner.registry.action_names().len(),
            "server_listening"
        );

        loop {
            match listener.accept().await {
                Ok((stream, _peer)) => {
                    tokio::spawn(handle_connection(stream, Arc::clone(&self.inner)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept_failed");
                }
            }
        }
    }
}
