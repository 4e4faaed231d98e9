//! falkor-gateway: Uniform tool envelopes over FalkorDB graph operations.
//!
//! Wraps the operations of `falkor-graph` so that every invocation yields
//! exactly one [`Envelope`], whether the operation succeeded or not. The
//! surrounding protocol layer only ever sees envelopes.

pub mod envelope;
pub mod types;

pub use envelope::{Context, Envelope};
pub use types::{GraphsResource, StatusResource, ToolRequest};

use std::fmt::Display;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;
use uuid::Uuid;

use falkor_core::{GatewayConfig, GatewayError, GraphList, GraphMetadata, QueryParams, QueryResult};
use falkor_graph::{ConnectionManager, Connector, GraphService};

/// Dispatches tool invocations to graph operations and wraps the outcome.
pub struct Gateway<C: Connector> {
    service: GraphService<C>,
}

impl<C: Connector> Gateway<C> {
    pub fn new(service: GraphService<C>) -> Self {
        Self { service }
    }

    /// Build a gateway with its own connection manager. No connection is
    /// opened until the first operation.
    pub fn with_connector(connector: C, config: Arc<GatewayConfig>) -> Self {
        let manager = Arc::new(ConnectionManager::new(connector, config));
        Self::new(GraphService::new(manager))
    }

    fn config(&self) -> &GatewayConfig {
        self.service.manager().config()
    }

    // ── Tools ────────────────────────────────────────────────────

    pub async fn execute_query(
        &self,
        graph: &str,
        query: &str,
        params: Option<&QueryParams>,
    ) -> Envelope<QueryResult> {
        let result = self.service.execute_query(graph, query, params).await;
        Envelope::from_result(result, Context::query(graph, query))
    }

    pub async fn list_graphs(&self) -> Envelope<GraphList> {
        let result = self.service.list_graphs().await;
        Envelope::from_result(result, Context::default())
    }

    pub async fn get_graph_metadata(&self, graph: &str) -> Envelope<GraphMetadata> {
        let result = self.service.get_graph_metadata(graph).await;
        Envelope::from_result(result, Context::graph(graph))
    }

    // ── Resources ────────────────────────────────────────────────

    pub async fn graphs_resource(&self) -> Envelope<GraphsResource> {
        let result = self.service.list_graphs().await.map(|list| GraphsResource {
            graphs: list.graphs,
            count: list.count,
            host: self.config().host.clone(),
            port: self.config().port,
        });
        Envelope::from_result(result, Context::default())
    }

    /// Report the connection state without opening a connection.
    pub async fn status_resource(&self) -> Envelope<StatusResource> {
        let status = self.service.connection_status().await;
        Envelope::success(
            StatusResource {
                status,
                host: self.config().host.clone(),
                port: self.config().port,
                version: env!("CARGO_PKG_VERSION"),
            },
            Context::default(),
        )
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Route a request to its operation and render the envelope as JSON.
    pub async fn dispatch(&self, request: ToolRequest) -> serde_json::Value {
        let span = tracing::info_span!(
            "tool",
            request_id = %Uuid::new_v4(),
            tool = request.name()
        );

        async {
            let response = match &request {
                ToolRequest::ExecuteQuery {
                    graph,
                    query,
                    params,
                } => self
                    .execute_query(graph, query, params.as_ref())
                    .await
                    .to_json(),
                ToolRequest::ListGraphs => self.list_graphs().await.to_json(),
                ToolRequest::GetGraphMetadata { graph } => {
                    self.get_graph_metadata(graph).await.to_json()
                }
                ToolRequest::Graphs => self.graphs_resource().await.to_json(),
                ToolRequest::Status => self.status_resource().await.to_json(),
            };
            tracing::debug!(outcome = %response["outcome"], "Tool completed");
            response
        }
        .instrument(span)
        .await
    }

    /// Parse one JSON request and dispatch it. Malformed input yields a
    /// failure envelope rather than an error.
    pub async fn handle_line(&self, line: &str) -> serde_json::Value {
        match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => invalid_request(e),
        }
    }

    /// Answer newline-delimited requests from `reader` until end of input,
    /// writing one envelope per line to `writer`.
    ///
    /// Undecodable lines get a failure envelope like any other malformed
    /// request. Only I/O errors end the loop early.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(e) => invalid_request(e),
            };

            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
        Ok(())
    }

    /// Close the database connection. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.service.manager().release().await;
    }
}

fn invalid_request(e: impl Display) -> serde_json::Value {
    tracing::warn!(error = %e, "Rejected malformed tool request");
    let err = GatewayError::Query(format!("Invalid request: {e}"));
    Envelope::<()>::failure(&err, Context::default()).to_json()
}
