//! In-process stand-in for FalkorDB.
//!
//! Shared by this crate's integration tests and by downstream crates that
//! exercise the gateway without a server. Enabled by the `test-util` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use falkordb::FalkorValue;

use falkor_core::{GatewayConfig, GatewayError, Result};

use crate::driver::{Connector, GraphConnection, RawResultSet};
use crate::service::LABELS_QUERY;

/// A query the fake database has seen.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub graph: String,
    pub query: String,
    pub params: HashMap<String, String>,
}

/// Scripted database state shared by every connection a [`FakeConnector`]
/// opens. Unscripted queries fail like a Cypher syntax error.
#[derive(Default)]
pub struct FakeDatabase {
    unreachable: AtomicBool,
    connects: AtomicUsize,
    graphs: Mutex<Vec<String>>,
    labels: Mutex<HashMap<String, Vec<FalkorValue>>>,
    responses: Mutex<HashMap<String, std::result::Result<RawResultSet, String>>>,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl FakeDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn add_graph(&self, name: &str, labels: &[&str]) {
        self.graphs.lock().unwrap().push(name.to_string());
        self.labels.lock().unwrap().insert(
            name.to_string(),
            labels
                .iter()
                .map(|l| FalkorValue::String((*l).to_string()))
                .collect(),
        );
    }

    /// Register a graph name without labels, e.g. to simulate driver duplicates.
    pub fn push_graph_name(&self, name: &str) {
        self.graphs.lock().unwrap().push(name.to_string());
    }

    pub fn set_raw_labels(&self, graph: &str, labels: Vec<FalkorValue>) {
        self.labels.lock().unwrap().insert(graph.to_string(), labels);
    }

    pub fn respond(&self, query: &str, header: &[&str], rows: Vec<Vec<FalkorValue>>) {
        let result = RawResultSet {
            header: header.iter().map(|h| (*h).to_string()).collect(),
            rows,
            stats: vec!["Query internal execution time: 0.2 milliseconds".to_string()],
        };
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(result));
    }

    pub fn fail(&self, query: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(message.to_string()));
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

pub struct FakeConnector {
    pub db: Arc<FakeDatabase>,
}

pub struct FakeConnection {
    db: Arc<FakeDatabase>,
}

impl Connector for FakeConnector {
    type Connection = FakeConnection;

    async fn connect(&self, config: &GatewayConfig) -> Result<FakeConnection> {
        self.db.connects.fetch_add(1, Ordering::SeqCst);
        if self.db.unreachable.load(Ordering::SeqCst) {
            return Err(GatewayError::Connection(format!(
                "Connection refused ({config})"
            )));
        }
        Ok(FakeConnection {
            db: Arc::clone(&self.db),
        })
    }
}

impl GraphConnection for FakeConnection {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_graphs(&self) -> Result<Vec<String>> {
        Ok(self.db.graphs.lock().unwrap().clone())
    }

    async fn query(
        &self,
        graph: &str,
        query: &str,
        params: &HashMap<String, String>,
    ) -> Result<RawResultSet> {
        self.db.queries.lock().unwrap().push(RecordedQuery {
            graph: graph.to_string(),
            query: query.to_string(),
            params: params.clone(),
        });

        if query == LABELS_QUERY {
            let labels = self
                .db
                .labels
                .lock()
                .unwrap()
                .get(graph)
                .cloned()
                .unwrap_or_default();
            return Ok(RawResultSet {
                header: vec!["label".to_string()],
                rows: labels.into_iter().map(|l| vec![l]).collect(),
                stats: Vec::new(),
            });
        }

        match self.db.responses.lock().unwrap().get(query) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(message)) => Err(GatewayError::Query(message.clone())),
            None => Err(GatewayError::Query(format!(
                "errMsg: Invalid input at end of input: {query}"
            ))),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
