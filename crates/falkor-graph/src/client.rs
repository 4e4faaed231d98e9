//! FalkorDB connection handling via the `falkordb` async client.

use std::collections::HashMap;

use falkordb::{FalkorAsyncClient, FalkorClientBuilder, FalkorConnectionInfo, FalkorValue};

use falkor_core::{GatewayConfig, GatewayError, Result};

use crate::driver::{Connector, GraphConnection, RawResultSet};

/// Opens [`FalkorClient`] connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FalkorConnector;

impl Connector for FalkorConnector {
    type Connection = FalkorClient;

    async fn connect(&self, config: &GatewayConfig) -> Result<FalkorClient> {
        let url = config.connection_url()?;
        let info = FalkorConnectionInfo::try_from(url.as_str())
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let client = FalkorClientBuilder::new_async()
            .with_connection_info(info)
            .build()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        tracing::debug!(addr = %config, "FalkorDB client built");
        Ok(FalkorClient { client })
    }
}

/// A FalkorDB client handle.
pub struct FalkorClient {
    client: FalkorAsyncClient,
}

impl FalkorClient {
    /// Get a reference to the underlying client for direct operations.
    pub fn inner(&self) -> &FalkorAsyncClient {
        &self.client
    }
}

impl GraphConnection for FalkorClient {
    async fn ping(&self) -> Result<()> {
        self.client
            .list_graphs()
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::Connection(e.to_string()))
    }

    async fn list_graphs(&self) -> Result<Vec<String>> {
        self.client
            .list_graphs()
            .await
            .map_err(|e| GatewayError::Query(e.to_string()))
    }

    async fn query(
        &self,
        graph: &str,
        query: &str,
        params: &HashMap<String, String>,
    ) -> Result<RawResultSet> {
        let mut graph = self.client.select_graph(graph);
        let mut builder = graph.query(query);
        if !params.is_empty() {
            builder = builder.with_params(params);
        }

        let result = builder
            .execute()
            .await
            .map_err(|e| GatewayError::Query(e.to_string()))?;

        let header = result.header;
        let stats = result.stats;
        let rows: Vec<Vec<FalkorValue>> = result.data.collect();

        Ok(RawResultSet {
            header,
            rows,
            stats,
        })
    }

    async fn close(&self) -> Result<()> {
        // The client's connections are released when the handle is dropped.
        Ok(())
    }
}
