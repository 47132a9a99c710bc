//! # myconn
//!
//! A registry of named, pooled MySQL handles built from one declarative
//! configuration.
//!
//! myconn provides:
//! - Validation of connection configurations before anything is opened
//! - Connection strings taken verbatim or resolved from cluster environment variables
//! - Per-connection pool tuning
//! - Ordered shutdown with every failure reported
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use myconn::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::cluster("desaenv08", "orders")
//!         .connection(ConnectionSpec::new("writer").master())
//!         .connection(ConnectionSpec::new("reader").read_only());
//!
//!     let registry = Registry::open(&config, &MysqlConnector::new())?;
//!     let writer = registry.get("writer")?;
//!     let mut conn = writer.get_conn().await?;
//!
//!     registry.close().await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Configuration, validation, resolution and the generic registry.
pub mod registry {
    pub use myconn_core::*;
}

/// The `mysql_async` driver adapter.
pub mod mysql {
    pub use myconn_mysql::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::registry::{Config, ConnectionSpec, PoolSettings, Registry, RegistryError};
    pub use crate::mysql::{MysqlConnector, MysqlHandle, MysqlRegistry};
}

// Re-export key types at the crate root
pub use myconn_core::{
    Config, ConfigError, ConnectionSpec, PoolSettings, Registry, RegistryError, RegistryResult,
};
pub use myconn_mysql::{MysqlConnector, MysqlHandle, MysqlRegistry};
