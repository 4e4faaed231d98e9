//! falkor-graph: FalkorDB access for the gateway.
//!
//! This crate owns the single database connection and is the only place
//! where driver result types exist. Every operation converts driver rows
//! into `falkor_core` values before returning, so nothing driver-specific
//! reaches the envelope layer.

pub mod client;
pub mod driver;
pub mod extract;
pub mod manager;
pub mod params;
pub mod service;
#[cfg(feature = "test-util")]
pub mod testing;

pub use client::{FalkorClient, FalkorConnector};
pub use driver::{Connector, GraphConnection, RawResultSet};
pub use manager::{ConnectionManager, ConnectionStatus};
pub use service::GraphService;
