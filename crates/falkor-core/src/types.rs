//! Value types that cross the gateway boundary.
//!
//! Everything here is plain data: no driver handles, no cursors. Driver
//! results are converted into these types before an operation returns.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

// ── Result Values ─────────────────────────────────────────────────

/// A concrete value extracted from a query result row.
///
/// Primitives serialize as their JSON counterparts; graph entities
/// serialize as objects with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<GraphValue>),
    Map(BTreeMap<String, GraphValue>),
    Entity(GraphEntity),
}

/// Structural values returned by graph pattern queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphEntity {
    Node {
        id: i64,
        labels: Vec<String>,
        properties: BTreeMap<String, GraphValue>,
    },
    Edge {
        id: i64,
        relation: String,
        src_node: i64,
        dest_node: i64,
        properties: BTreeMap<String, GraphValue>,
    },
    Path {
        nodes: Vec<GraphEntity>,
        edges: Vec<GraphEntity>,
    },
    Point {
        latitude: f64,
        longitude: f64,
    },
}

// ── Query Parameters ──────────────────────────────────────────────

/// A caller-supplied query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

/// Named query parameters, passed alongside the query text.
pub type QueryParams = BTreeMap<String, ParamValue>;

// ── Operation Payloads ────────────────────────────────────────────

/// Rows returned by `execute_query`, plus column headers and server statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<GraphValue>>,
    pub statistics: Vec<String>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Graph names known to the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphList {
    pub graphs: Vec<String>,
    pub count: usize,
}

impl GraphList {
    /// Build a list from driver output, dropping repeated names while
    /// keeping the first-seen order.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let graphs: Vec<String> = names
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        let count = graphs.len();
        Self { graphs, count }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graphs.iter().any(|g| g == name)
    }
}

/// Label introspection for a single graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphMetadata {
    pub name: String,
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_serialize_as_plain_json() {
        let row = vec![
            GraphValue::Integer(1),
            GraphValue::String("Alice".to_string()),
            GraphValue::Float(0.5),
            GraphValue::Bool(true),
            GraphValue::Null,
            GraphValue::List(vec![GraphValue::Integer(2)]),
        ];
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!([1, "Alice", 0.5, true, null, [2]]));
    }

    #[test]
    fn node_serializes_with_type_tag() {
        let mut properties = BTreeMap::new();
        properties.insert("name".to_string(), GraphValue::String("Alice".to_string()));
        let node = GraphValue::Entity(GraphEntity::Node {
            id: 123,
            labels: vec!["Person".to_string()],
            properties,
        });

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "node");
        assert_eq!(value["id"], 123);
        assert_eq!(value["labels"], json!(["Person"]));
        assert_eq!(value["properties"]["name"], "Alice");
    }

    #[test]
    fn edge_serializes_with_endpoints() {
        let edge = GraphValue::Entity(GraphEntity::Edge {
            id: 456,
            relation: "KNOWS".to_string(),
            src_node: 123,
            dest_node: 789,
            properties: BTreeMap::new(),
        });

        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["type"], "edge");
        assert_eq!(value["relation"], "KNOWS");
        assert_eq!(value["src_node"], 123);
        assert_eq!(value["dest_node"], 789);
    }

    #[test]
    fn params_deserialize_from_json() {
        let params: QueryParams = serde_json::from_value(json!({
            "name": "Alice",
            "age": 30,
            "score": 1.5,
            "active": false,
            "nick": null,
            "tags": ["a", "b"],
        }))
        .unwrap();

        assert_eq!(params["name"], ParamValue::String("Alice".to_string()));
        assert_eq!(params["age"], ParamValue::Integer(30));
        assert_eq!(params["score"], ParamValue::Float(1.5));
        assert_eq!(params["active"], ParamValue::Bool(false));
        assert_eq!(params["nick"], ParamValue::Null);
        assert_eq!(
            params["tags"],
            ParamValue::List(vec![
                ParamValue::String("a".to_string()),
                ParamValue::String("b".to_string()),
            ])
        );
    }

    #[test]
    fn graph_list_drops_duplicates_and_counts() {
        let list = GraphList::from_names(vec![
            "social".to_string(),
            "movies".to_string(),
            "social".to_string(),
        ]);
        assert_eq!(list.graphs, vec!["social", "movies"]);
        assert_eq!(list.count, list.graphs.len());
        assert!(list.contains("movies"));
        assert!(!list.contains("music"));
    }

    #[test]
    fn empty_graph_list() {
        let list = GraphList::from_names(Vec::new());
        assert!(list.graphs.is_empty());
        assert_eq!(list.count, 0);
    }
}
