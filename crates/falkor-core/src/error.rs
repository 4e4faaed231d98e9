use serde::Serialize;
use thiserror::Error;

/// Top-level error type for the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("FalkorDB connection error: {0}")]
    Connection(String),

    #[error("FalkorDB query error: {0}")]
    Query(String),

    #[error("Result extraction error: {0}")]
    Extraction(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Error classification that callers can branch on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Connection,
    Query,
    Extraction,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Query(_) => ErrorKind::Query,
            Self::Extraction(_) => ErrorKind::Extraction,
        }
    }

    /// Classification reported in failure envelopes.
    ///
    /// Extraction failures surface as query failures; operators tell them
    /// apart through the logs.
    pub fn envelope_kind(&self) -> ErrorKind {
        match self.kind() {
            ErrorKind::Extraction => ErrorKind::Query,
            other => other,
        }
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(GatewayError::Config("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(GatewayError::Connection("x".into()).kind(), ErrorKind::Connection);
        assert_eq!(GatewayError::Query("x".into()).kind(), ErrorKind::Query);
        assert_eq!(GatewayError::Extraction("x".into()).kind(), ErrorKind::Extraction);
    }

    #[test]
    fn extraction_reports_as_query_in_envelopes() {
        let err = GatewayError::Extraction("bad row".into());
        assert_eq!(err.envelope_kind(), ErrorKind::Query);
        assert_eq!(
            GatewayError::Connection("down".into()).envelope_kind(),
            ErrorKind::Connection
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::Configuration).unwrap();
        assert_eq!(json, "\"configuration\"");
    }
}
