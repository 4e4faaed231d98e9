//! The seam between the gateway and the database driver.
//!
//! [`ConnectionManager`](crate::ConnectionManager) and
//! [`GraphService`](crate::GraphService) only talk to these traits, so a
//! fake backend can stand in for FalkorDB in tests.

use std::collections::HashMap;

use falkordb::FalkorValue;

use falkor_core::{GatewayConfig, Result};

/// Rows collected from a driver result, detached from its cursor.
///
/// Values are still driver-native; [`crate::extract`] converts them before
/// they leave this crate.
#[derive(Debug, Clone, Default)]
pub struct RawResultSet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<FalkorValue>>,
    pub stats: Vec<String>,
}

/// Builds live connections from configuration.
#[allow(async_fn_in_trait)]
pub trait Connector: Send + Sync {
    type Connection: GraphConnection;

    /// Open a connection. No liveness guarantee until [`GraphConnection::ping`] succeeds.
    async fn connect(&self, config: &GatewayConfig) -> Result<Self::Connection>;
}

/// A live handle to the graph database.
#[allow(async_fn_in_trait)]
pub trait GraphConnection: Send + Sync {
    /// No-op round trip used as a liveness probe.
    async fn ping(&self) -> Result<()>;

    /// Names of all graphs in the database, in driver order.
    async fn list_graphs(&self) -> Result<Vec<String>>;

    /// Run `query` against `graph`. `params` maps parameter names to encoded
    /// literals and is sent through the driver's parameter channel.
    async fn query(
        &self,
        graph: &str,
        query: &str,
        params: &HashMap<String, String>,
    ) -> Result<RawResultSet>;

    async fn close(&self) -> Result<()>;
}
