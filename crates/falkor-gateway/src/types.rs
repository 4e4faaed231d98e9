//! Request and resource types for gateway tools.

use serde::{Deserialize, Serialize};

use falkor_core::QueryParams;
use falkor_graph::ConnectionStatus;

/// A tool invocation, as received from the protocol layer.
///
/// ```json
/// {"tool": "execute_query", "graph": "social", "query": "MATCH (n) RETURN n", "params": {}}
/// {"tool": "list_graphs"}
/// {"tool": "get_graph_metadata", "graph": "social"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolRequest {
    /// Run a Cypher query against a graph.
    ExecuteQuery {
        #[serde(alias = "graph_name")]
        graph: String,
        query: String,
        #[serde(default)]
        params: Option<QueryParams>,
    },
    /// List all graphs in the database.
    ListGraphs,
    /// Get the labels of a graph.
    GetGraphMetadata {
        #[serde(alias = "graph_name")]
        graph: String,
    },
    /// Graph list together with server address.
    Graphs,
    /// Connection state and server address.
    Status,
}

impl ToolRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExecuteQuery { .. } => "execute_query",
            Self::ListGraphs => "list_graphs",
            Self::GetGraphMetadata { .. } => "get_graph_metadata",
            Self::Graphs => "graphs",
            Self::Status => "status",
        }
    }
}

/// Payload of the graphs resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphsResource {
    pub graphs: Vec<String>,
    pub count: usize,
    pub host: String,
    pub port: u16,
}

/// Payload of the status resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResource {
    pub status: ConnectionStatus,
    pub host: String,
    pub port: u16,
    pub version: &'static str,
}
