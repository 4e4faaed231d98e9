//! Conversion of driver values into boundary values.
//!
//! Every row that leaves this crate passes through here. Values the gateway
//! cannot represent become [`GatewayError::Extraction`] rather than being
//! passed through or silently dropped.

use std::collections::{BTreeMap, HashMap};

use falkordb::{Edge, FalkorValue, Node};

use falkor_core::types::GraphEntity;
use falkor_core::{GatewayError, GraphValue, QueryResult, Result};

use crate::driver::RawResultSet;

/// Convert a collected driver result into a [`QueryResult`].
pub fn query_result(raw: RawResultSet) -> Result<QueryResult> {
    Ok(QueryResult {
        headers: raw.header,
        rows: rows(raw.rows)?,
        statistics: raw.stats,
    })
}

pub fn rows(rows: Vec<Vec<FalkorValue>>) -> Result<Vec<Vec<GraphValue>>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(value).collect())
        .collect()
}

/// Flatten the first column of every row into strings.
///
/// Used for introspection procedures such as `db.labels()` that yield one
/// name per row.
pub fn first_column_strings(rows: Vec<Vec<FalkorValue>>) -> Result<Vec<String>> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row.into_iter().next() {
            Some(FalkorValue::String(s)) => Ok(s),
            Some(other) => Err(GatewayError::Extraction(format!(
                "Row {i}: expected a string in the first column, found {other:?}"
            ))),
            None => Err(GatewayError::Extraction(format!("Row {i} has no columns"))),
        })
        .collect()
}

pub fn value(v: FalkorValue) -> Result<GraphValue> {
    Ok(match v {
        FalkorValue::None => GraphValue::Null,
        FalkorValue::Bool(b) => GraphValue::Bool(b),
        FalkorValue::I64(i) => GraphValue::Integer(i),
        FalkorValue::F64(f) => GraphValue::Float(f),
        FalkorValue::String(s) => GraphValue::String(s),
        FalkorValue::Array(items) => {
            GraphValue::List(items.into_iter().map(value).collect::<Result<_>>()?)
        }
        FalkorValue::Map(entries) => GraphValue::Map(properties(entries)?),
        FalkorValue::Node(node) => GraphValue::Entity(node_entity(node)?),
        FalkorValue::Edge(edge) => GraphValue::Entity(edge_entity(edge)?),
        FalkorValue::Path(path) => GraphValue::Entity(GraphEntity::Path {
            nodes: path
                .nodes
                .into_iter()
                .map(node_entity)
                .collect::<Result<_>>()?,
            edges: path
                .relationships
                .into_iter()
                .map(edge_entity)
                .collect::<Result<_>>()?,
        }),
        FalkorValue::Point(point) => GraphValue::Entity(GraphEntity::Point {
            latitude: point.latitude,
            longitude: point.longitude,
        }),
        FalkorValue::Vec32(vector) => GraphValue::List(
            vector
                .values
                .into_iter()
                .map(|f| GraphValue::Float(f64::from(f)))
                .collect(),
        ),
        FalkorValue::Unparseable(raw) => {
            return Err(GatewayError::Extraction(format!(
                "Driver could not parse value: {raw}"
            )))
        }
    })
}

fn node_entity(node: Node) -> Result<GraphEntity> {
    Ok(GraphEntity::Node {
        id: node.entity_id,
        labels: node.labels,
        properties: properties(node.properties)?,
    })
}

fn edge_entity(edge: Edge) -> Result<GraphEntity> {
    Ok(GraphEntity::Edge {
        id: edge.entity_id,
        relation: edge.relationship_type,
        src_node: edge.src_node_id,
        dest_node: edge.dst_node_id,
        properties: properties(edge.properties)?,
    })
}

fn properties(entries: HashMap<String, FalkorValue>) -> Result<BTreeMap<String, GraphValue>> {
    entries
        .into_iter()
        .map(|(k, v)| Ok((k, value(v)?)))
        .collect()
}
