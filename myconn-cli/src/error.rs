//! CLI error types and result alias.

use miette::Diagnostic;
use myconn_core::{ConfigError, LoadError, RegistryError, ResolveError};
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    #[diagnostic(code(myconn::config))]
    Config(#[from] LoadError),

    /// Configuration is structurally invalid
    #[error("Validation error: {0}")]
    #[diagnostic(code(myconn::validation))]
    Validation(#[from] ConfigError),

    /// A connection string could not be resolved
    #[error("Resolve error: connection {name:?}: {source}")]
    #[diagnostic(
        code(myconn::resolve),
        help("cluster endpoints and credentials are read from DB_MYSQL_* / DB_HA_MYSQL_* variables")
    )]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },

    /// Opening, pinging or closing connections failed
    #[error("Database error: {0}")]
    #[diagnostic(code(myconn::database))]
    Database(#[from] RegistryError),
}
