//! Declarative configuration for a set of MySQL connections.
//!
//! A configuration selects exactly one topology (an explicit DSN, a cluster
//! or an HA cluster) and declares the named connections to open against it:
//!
//! ```json
//! {
//!   "cluster": "my_cluster",
//!   "schema": "my_schema",
//!   "connections": [
//!     {
//!       "name": "master",
//!       "is_master": true,
//!       "is_read_only": false,
//!       "parameters": "parseTime=true&readTimeout=100ms&timeout=100ms&writeTimeout=100ms",
//!       "connection_pool": {
//!         "conn_max_lifetime": "10m",
//!         "max_idle_connections": 100,
//!         "max_open_connections": 100,
//!         "conn_max_idle_time": "1m"
//!       }
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::ConfigDuration;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format {0:?}, expected .json or .toml")]
    UnsupportedFormat(String),
}

/// Configuration for opening one or more connections to a MySQL database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data source name, `[username[:password]@][protocol[(address)]]/schema[?params]`.
    /// Mutually exclusive with `cluster` and `ha_cluster`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dsn: String,

    /// Name of a single-instance cluster whose endpoints and credentials are
    /// injected through the environment.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster: String,

    /// Name of a high-availability cluster.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ha_cluster: String,

    /// Schema to connect to. Required with a cluster, forbidden with a DSN.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub schema: String,

    /// Connections to open, in order.
    pub connections: Vec<ConnectionSpec>,
}

impl Config {
    /// Configuration using an explicit DSN.
    pub fn direct(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Default::default()
        }
    }

    /// Configuration for a single-instance cluster.
    pub fn cluster(cluster: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            schema: schema.into(),
            ..Default::default()
        }
    }

    /// Configuration for a high-availability cluster.
    pub fn ha_cluster(cluster: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            ha_cluster: cluster.into(),
            schema: schema.into(),
            ..Default::default()
        }
    }

    /// Append a connection.
    pub fn connection(mut self, spec: ConnectionSpec) -> Self {
        self.connections.push(spec);
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(input)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A named connection to open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSpec {
    /// Unique name of the connection.
    pub name: String,

    /// Connect to the primary endpoint instead of a replica. Ignored with a DSN.
    pub is_master: bool,

    /// Use read-only credentials. Ignored with a DSN.
    pub is_read_only: bool,

    /// Driver parameters, `param1=value1&...&paramN=valueN`. Ignored with a DSN.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parameters: String,

    /// Pool tuning. Unset fields keep the driver defaults.
    pub connection_pool: PoolSettings,
}

impl ConnectionSpec {
    /// A connection with the given name and default flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Mark as a primary-endpoint connection.
    pub fn master(mut self) -> Self {
        self.is_master = true;
        self
    }

    /// Mark as read-only.
    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    /// Set the driver parameters.
    pub fn parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = parameters.into();
        self
    }

    /// Set the pool tuning.
    pub fn pool(mut self, pool: PoolSettings) -> Self {
        self.connection_pool = pool;
        self
    }
}

/// Connection pool tuning for a single connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum amount of time a connection may be reused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_max_lifetime: Option<ConfigDuration>,

    /// Maximum number of idle connections kept in the pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_connections: Option<u32>,

    /// Maximum number of open connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_open_connections: Option<u32>,

    /// Maximum amount of time a connection may sit idle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_max_idle_time: Option<ConfigDuration>,
}

impl PoolSettings {
    /// Returns `true` if no setting is present.
    pub fn is_empty(&self) -> bool {
        self.conn_max_lifetime.is_none()
            && self.max_idle_connections.is_none()
            && self.max_open_connections.is_none()
            && self.conn_max_idle_time.is_none()
    }
}
