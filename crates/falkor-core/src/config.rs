//! Connection configuration for the FalkorDB gateway.
//!
//! Values are read from environment variables with the `FALKORDB_` prefix:
//! `FALKORDB_HOST`, `FALKORDB_PORT`, `FALKORDB_USERNAME`, `FALKORDB_PASSWORD`.
//! Unset or empty variables fall back to the defaults below.

use std::collections::HashMap;
use std::fmt;

use config::{Config, Environment};
use serde::Deserialize;
use url::Url;

use crate::error::{GatewayError, Result};

const ENV_PREFIX: &str = "FALKORDB";

/// Resolved FalkorDB connection parameters. Immutable once loaded.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Database host (default: "localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 6379).
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6379
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// A port that is not a valid `u16` (or is zero) is an error; callers
    /// are expected to abort startup on it.
    pub fn load() -> Result<Self> {
        Self::resolve(Environment::with_prefix(ENV_PREFIX))
    }

    /// Resolve configuration from an explicit variable map instead of the
    /// process environment. Keys use the full variable names, e.g. `FALKORDB_HOST`.
    pub fn from_source(vars: HashMap<String, String>) -> Result<Self> {
        Self::resolve(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn resolve(env: Environment) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(env.ignore_empty(true))
            .build()?;

        let mut resolved: GatewayConfig = cfg.try_deserialize()?;
        if resolved.port == 0 {
            return Err(GatewayError::Config(
                "FALKORDB_PORT must be between 1 and 65535".to_string(),
            ));
        }
        if resolved.host.trim().is_empty() {
            resolved.host = default_host();
        }
        resolved.username = resolved.username.filter(|u| !u.is_empty());
        resolved.password = resolved.password.filter(|p| !p.is_empty());

        tracing::debug!(
            host = %resolved.host,
            port = resolved.port,
            authenticated = resolved.username.is_some() || resolved.password.is_some(),
            "Resolved FalkorDB configuration"
        );
        Ok(resolved)
    }

    /// Connection URL understood by the FalkorDB client, with credentials
    /// percent-encoded into the userinfo section.
    pub fn connection_url(&self) -> Result<String> {
        let mut url = Url::parse(&format!("falkor://{}:{}", self.host, self.port))
            .map_err(|e| GatewayError::Config(format!("Invalid FalkorDB address {self}: {e}")))?;

        if let Some(user) = &self.username {
            url.set_username(user)
                .map_err(|()| GatewayError::Config("Cannot encode FalkorDB username".into()))?;
        }
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|()| GatewayError::Config("Cannot encode FalkorDB password".into()))?;
        }

        Ok(url.to_string())
    }
}

impl fmt::Display for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
