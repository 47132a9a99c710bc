//! Error types for the MySQL adapter.

use myconn_core::DsnError;
use thiserror::Error;

/// Result type for MySQL adapter operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Error type for MySQL adapter operations.
#[derive(Debug, Error)]
pub enum MysqlError {
    /// The handle was closed.
    #[error("sql: database is closed")]
    Closed,

    /// The connection string could not be parsed.
    #[error(transparent)]
    Dsn(#[from] DsnError),

    /// The DSN names a network other than `tcp` or `unix`.
    #[error("unsupported network {0:?}")]
    UnsupportedNetwork(String),

    /// The DSN address is not a valid `host[:port]`.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// A recognized DSN parameter has an unusable value.
    #[error("invalid value {value:?} for parameter {key}")]
    InvalidParameter { key: String, value: String },

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql_async::Error),
}

impl MysqlError {
    /// Returns `true` if the handle was already closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
