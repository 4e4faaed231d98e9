//! Lazy ownership of the single database connection.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use falkor_core::{GatewayConfig, GatewayError, Result};

use crate::driver::{Connector, GraphConnection};

/// Externally visible connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Uninitialized,
    Ready,
    Failed,
}

enum State<T> {
    Uninitialized,
    Ready(Arc<T>),
    Failed,
}

/// Owns at most one connection, created on first [`acquire`](Self::acquire).
///
/// Initialization runs under an async mutex, so concurrent first callers
/// wait for one connection instead of each building their own. A failed
/// initialization is not cached: the next `acquire` tries again.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    config: Arc<GatewayConfig>,
    state: Mutex<State<C::Connection>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, config: Arc<GatewayConfig>) -> Self {
        Self {
            connector,
            config,
            state: Mutex::new(State::Uninitialized),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Return the live connection, connecting and probing it first if needed.
    pub async fn acquire(&self) -> Result<Arc<C::Connection>> {
        let mut state = self.state.lock().await;
        if let State::Ready(conn) = &*state {
            return Ok(Arc::clone(conn));
        }

        tracing::debug!(addr = %self.config, "Initializing FalkorDB connection");
        match self.initialize().await {
            Ok(conn) => {
                let conn = Arc::new(conn);
                *state = State::Ready(Arc::clone(&conn));
                tracing::info!(addr = %self.config, "Connected to FalkorDB");
                Ok(conn)
            }
            Err(e) => {
                *state = State::Failed;
                tracing::error!(addr = %self.config, error = %e, "Failed to connect to FalkorDB");
                Err(e)
            }
        }
    }

    async fn initialize(&self) -> Result<C::Connection> {
        let conn = self
            .connector
            .connect(&self.config)
            .await
            .map_err(as_connection_error)?;

        if let Err(e) = conn.ping().await {
            if let Err(close_err) = conn.close().await {
                tracing::warn!(error = %close_err, "Failed to close unhealthy connection");
            }
            return Err(as_connection_error(e));
        }

        Ok(conn)
    }

    /// Close the connection, if any. Calling this with no open connection is a no-op.
    pub async fn release(&self) {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Uninitialized) {
            State::Ready(conn) => {
                if let Err(e) = conn.close().await {
                    tracing::warn!(error = %e, "Error while closing FalkorDB connection");
                }
                tracing::info!(addr = %self.config, "FalkorDB connection closed");
            }
            State::Uninitialized | State::Failed => {
                tracing::debug!("No FalkorDB connection to release");
            }
        }
    }

    pub async fn status(&self) -> ConnectionStatus {
        match &*self.state.lock().await {
            State::Uninitialized => ConnectionStatus::Uninitialized,
            State::Ready(_) => ConnectionStatus::Ready,
            State::Failed => ConnectionStatus::Failed,
        }
    }
}

/// Anything that goes wrong while establishing the connection is a
/// connection error, except configuration problems which keep their kind.
fn as_connection_error(e: GatewayError) -> GatewayError {
    match e {
        GatewayError::Connection(_) | GatewayError::Config(_) => e,
        other => GatewayError::Connection(other.to_string()),
    }
}
