//! Named registry of pooled MySQL handles.
//!
//! A [`Config`] declares one topology (an explicit DSN, a cluster or an HA
//! cluster) and a list of named connections. [`Registry::open`] validates it,
//! resolves each connection string (cluster endpoints and credentials come
//! from environment variables), opens a pooled handle per connection through
//! an injected [`Connector`], and applies the configured pool tuning.
//!
//! # Example
//!
//! ```rust,ignore
//! use myconn_core::{Config, Registry};
//! use myconn_mysql::MysqlConnector;
//!
//! let config = Config::load("db.json".as_ref())?;
//! let registry = Registry::open(&config, &MysqlConnector::new())?;
//!
//! let primary = registry.get("master")?;
//! registry.ping_all().await?;
//!
//! // At shutdown
//! registry.close().await?;
//! ```

pub mod config;
pub mod driver;
pub mod dsn;
pub mod duration;
pub mod env;
pub mod error;
pub mod logging;
pub mod registry;
pub mod resolve;
pub mod validate;

pub use config::{Config, ConnectionSpec, LoadError, PoolSettings};
pub use driver::{Connector, PooledHandle};
pub use dsn::{Dsn, DsnError};
pub use duration::{ConfigDuration, ParseDurationError};
pub use env::{Environment, ProcessEnv};
pub use error::{
    AggregateError, ConfigError, DriverError, RegistryError, RegistryResult, ResolveError,
};
pub use registry::Registry;
pub use resolve::resolve_dsn;
pub use validate::{Topology, validate};
