//! falkor-core: Shared configuration, errors, and boundary types for the FalkorDB gateway.
//!
//! This crate provides the foundational pieces used by every gateway layer:
//! - Connection configuration resolved from the process environment
//! - The error taxonomy carried through to response envelopes
//! - Serializable value types that cross the protocol boundary

pub mod config;
pub mod error;
pub mod types;

pub use config::GatewayConfig;
pub use error::{ErrorKind, GatewayError, Result};
pub use types::{GraphList, GraphMetadata, GraphValue, ParamValue, QueryParams, QueryResult};
