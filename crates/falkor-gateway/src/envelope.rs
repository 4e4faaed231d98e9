//! The uniform response shape for every gateway operation.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use falkor_core::{ErrorKind, GatewayError, Result};

/// What an operation was invoked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Context {
    pub fn graph(graph: &str) -> Self {
        Self {
            graph: Some(graph.to_string()),
            query: None,
        }
    }

    pub fn query(graph: &str, query: &str) -> Self {
        Self {
            graph: Some(graph.to_string()),
            query: Some(query.to_string()),
        }
    }
}

/// Outcome of one operation, tagged by `outcome`.
///
/// Callers branch on the tag (and on `kind` for failures) instead of on
/// transport-specific error signalling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Envelope<T> {
    Success {
        payload: T,
        context: Context,
        timestamp: String,
    },
    Failure {
        error: String,
        kind: ErrorKind,
        context: Context,
        timestamp: String,
    },
}

/// Current UTC time as RFC 3339 with fixed microsecond precision, so
/// timestamps sort lexically.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl<T> Envelope<T> {
    pub fn success(payload: T, context: Context) -> Self {
        Self::Success {
            payload,
            context,
            timestamp: timestamp(),
        }
    }

    pub fn failure(error: &GatewayError, context: Context) -> Self {
        Self::Failure {
            error: error.to_string(),
            kind: error.envelope_kind(),
            context,
            timestamp: timestamp(),
        }
    }

    pub fn from_result(result: Result<T>, context: Context) -> Self {
        match result {
            Ok(payload) => Self::success(payload, context),
            Err(e) => Self::failure(&e, context),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn context(&self) -> &Context {
        match self {
            Self::Success { context, .. } | Self::Failure { context, .. } => context,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::Success { timestamp, .. } | Self::Failure { timestamp, .. } => timestamp,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render as JSON. Serialization of gateway payloads does not fail in
    /// practice; if it ever does, the result is still a failure envelope.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            let fallback: Envelope<()> = Envelope::failure(
                &GatewayError::Extraction(format!("Failed to serialize envelope: {e}")),
                self.context().clone(),
            );
            serde_json::json!({
                "outcome": "failure",
                "error": fallback.error(),
                "kind": fallback.kind(),
                "context": fallback.context(),
                "timestamp": fallback.timestamp(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_shape() {
        let envelope = Envelope::success(json!({"count": 2}), Context::graph("social"));
        let value = envelope.to_json();

        assert_eq!(value["outcome"], "success");
        assert_eq!(value["payload"]["count"], 2);
        assert_eq!(value["context"], json!({"graph": "social"}));
        assert!(value["timestamp"].is_string());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_shape_carries_context_and_kind() {
        let err = GatewayError::Query("Query syntax error".to_string());
        let envelope: Envelope<()> = Envelope::failure(&err, Context::query("g", "INVALID"));
        let value = envelope.to_json();

        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["kind"], "query");
        assert_eq!(value["error"], "FalkorDB query error: Query syntax error");
        assert_eq!(value["context"]["graph"], "g");
        assert_eq!(value["context"]["query"], "INVALID");
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn extraction_failure_reports_query_kind() {
        let envelope: Envelope<()> = Envelope::from_result(
            Err(GatewayError::Extraction("bad row".to_string())),
            Context::default(),
        );
        assert_eq!(envelope.kind(), Some(ErrorKind::Query));
        assert!(!envelope.is_success());
    }

    #[test]
    fn timestamps_are_sortable() {
        let earlier = timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = timestamp();

        assert_eq!(earlier.len(), later.len());
        assert!(earlier < later);
        assert!(earlier.ends_with('Z'));
    }
}
