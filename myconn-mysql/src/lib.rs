//! MySQL driver adapter for the myconn connection registry.
//!
//! [`MysqlConnector`] turns each resolved DSN into a [`MysqlHandle`], a
//! `mysql_async` pool created lazily on first use.
//!
//! # Example
//!
//! ```rust,ignore
//! use myconn_core::{Config, ConnectionSpec, Registry};
//! use myconn_mysql::MysqlConnector;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::direct("root:secret@tcp(localhost:3306)/app")
//!         .connection(ConnectionSpec::new("main"));
//!     let registry = Registry::open(&config, &MysqlConnector::new())?;
//!
//!     let mut conn = registry.get("main")?.get_conn().await?;
//!     // Use the connection...
//!
//!     registry.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pool;

pub use config::{Endpoint, MysqlConfig, TlsMode};
pub use error::{MysqlError, MysqlResult};
pub use pool::{MAX_POOL_SIZE, MysqlConnector, MysqlHandle, PoolTuning};

/// A registry of MySQL handles.
pub type MysqlRegistry = myconn_core::Registry<MysqlHandle>;
