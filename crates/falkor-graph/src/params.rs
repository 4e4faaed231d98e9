//! Encoding of query parameters for FalkorDB's parameter channel.
//!
//! FalkorDB receives parameters as `name=literal` pairs ahead of the query
//! body. Values are rendered as Cypher literals here and never spliced into
//! the caller's query text.

use std::collections::HashMap;

use falkor_core::{GatewayError, ParamValue, QueryParams, Result};

/// Encode every parameter as a Cypher literal, keyed by parameter name.
pub fn encode_params(params: &QueryParams) -> Result<HashMap<String, String>> {
    params
        .iter()
        .map(|(name, value)| {
            if !is_identifier(name) {
                return Err(GatewayError::Query(format!(
                    "Invalid parameter name {name:?}: expected letters, digits, or underscores"
                )));
            }
            Ok((name.clone(), to_cypher(value)?))
        })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn to_cypher(value: &ParamValue) -> Result<String> {
    Ok(match value {
        ParamValue::Null => "null".to_string(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Integer(i) => i.to_string(),
        ParamValue::Float(f) if f.is_finite() => format!("{f:?}"),
        ParamValue::Float(f) => {
            return Err(GatewayError::Query(format!(
                "Parameter value {f} is not a finite number"
            )))
        }
        ParamValue::String(s) => quote(s),
        ParamValue::List(items) => {
            let items = items.iter().map(to_cypher).collect::<Result<Vec<_>>>()?;
            format!("[{}]", items.join(", "))
        }
        ParamValue::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                if !is_identifier(key) {
                    return Err(GatewayError::Query(format!(
                        "Invalid map key {key:?} in query parameter"
                    )));
                }
                parts.push(format!("{key}: {}", to_cypher(value)?));
            }
            format!("{{{}}}", parts.join(", "))
        }
    })
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
