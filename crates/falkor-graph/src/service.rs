//! The gateway's graph operations.

use std::collections::HashMap;
use std::sync::Arc;

use falkor_core::{
    ErrorKind, GatewayError, GraphList, GraphMetadata, QueryParams, QueryResult, Result,
};

use crate::driver::{Connector, GraphConnection};
use crate::extract;
use crate::manager::{ConnectionManager, ConnectionStatus};
use crate::params::encode_params;

/// Label introspection procedure; yields one label name per row.
pub const LABELS_QUERY: &str = "CALL db.labels()";

/// Query execution and introspection against the managed connection.
///
/// Clone is cheap (inner Arc).
pub struct GraphService<C: Connector> {
    manager: Arc<ConnectionManager<C>>,
}

impl<C: Connector> Clone for GraphService<C> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
        }
    }
}

impl<C: Connector> GraphService<C> {
    pub fn new(manager: Arc<ConnectionManager<C>>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &ConnectionManager<C> {
        &self.manager
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Run a caller-supplied query against `graph`.
    ///
    /// The query text is passed through untouched; parameters travel
    /// separately and are never spliced into it.
    pub async fn execute_query(
        &self,
        graph: &str,
        query: &str,
        params: Option<&QueryParams>,
    ) -> Result<QueryResult> {
        let result = self.run_query(graph, query, params).await;
        if let Err(e) = &result {
            log_failure(e, "Error executing query", graph);
        }
        result
    }

    async fn run_query(
        &self,
        graph: &str,
        query: &str,
        params: Option<&QueryParams>,
    ) -> Result<QueryResult> {
        let encoded = match params {
            Some(p) => encode_params(p)?,
            None => HashMap::new(),
        };

        let conn = self.manager.acquire().await?;
        let raw = conn.query(graph, query, &encoded).await?;
        let result = extract::query_result(raw)?;

        tracing::debug!(
            graph = %sanitize_for_log(graph),
            rows = result.row_count(),
            "Query executed"
        );
        Ok(result)
    }

    // ── Introspection ────────────────────────────────────────────

    /// List all graphs in the database.
    pub async fn list_graphs(&self) -> Result<GraphList> {
        let result = self.fetch_graphs().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Error listing FalkorDB graphs");
        }
        result
    }

    async fn fetch_graphs(&self) -> Result<GraphList> {
        let conn = self.manager.acquire().await?;
        let names = conn.list_graphs().await?;
        Ok(GraphList::from_names(names))
    }

    /// Get the node labels of `graph`.
    ///
    /// The graph's existence is checked first, so a missing graph is an
    /// error instead of an empty label list.
    pub async fn get_graph_metadata(&self, graph: &str) -> Result<GraphMetadata> {
        let result = self.fetch_metadata(graph).await;
        if let Err(e) = &result {
            log_failure(e, "Error getting graph metadata", graph);
        }
        result
    }

    async fn fetch_metadata(&self, graph: &str) -> Result<GraphMetadata> {
        let conn = self.manager.acquire().await?;

        let known = GraphList::from_names(conn.list_graphs().await?);
        if !known.contains(graph) {
            return Err(GatewayError::Query(format!(
                "Graph '{}' does not exist",
                sanitize_for_log(graph)
            )));
        }

        let raw = conn.query(graph, LABELS_QUERY, &HashMap::new()).await?;
        let labels = extract::first_column_strings(raw.rows)?;

        Ok(GraphMetadata {
            name: graph.to_string(),
            labels,
        })
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        self.manager.status().await
    }
}

fn log_failure(e: &GatewayError, message: &str, graph: &str) {
    let graph = sanitize_for_log(graph);
    match e.kind() {
        ErrorKind::Extraction => tracing::warn!(
            %graph,
            error = %e,
            "{message}: result could not be converted"
        ),
        _ => tracing::error!(%graph, error = %e, "{message}"),
    }
}

/// Strip control characters from caller-supplied text before it is logged.
pub fn sanitize_for_log(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("test\ngraph"), "testgraph");
        assert_eq!(sanitize_for_log("a\r\n\u{1b}[31mb"), "a[31mb");
        assert_eq!(sanitize_for_log("social"), "social");
    }
}
