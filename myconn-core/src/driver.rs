//! Capabilities the registry needs from a database driver.
//!
//! The registry never names a concrete driver. A [`Connector`] is passed to
//! [`Registry::open`](crate::Registry::open) and produces one
//! [`PooledHandle`] per configured connection.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

/// Opens pooled handles from connection strings.
pub trait Connector {
    /// Handle type produced by this connector.
    type Handle: PooledHandle;

    /// Create a pooled handle for `dsn`.
    ///
    /// Implementations may defer dialing until the handle is first used.
    fn open(&self, dsn: &str) -> Result<Self::Handle, DriverError>;
}

/// A pooled database handle.
///
/// Pool setters are called by the registry right after [`Connector::open`],
/// and only for settings present in the configuration.
#[async_trait]
pub trait PooledHandle: Send + Sync + 'static {
    /// Maximum amount of time a connection may be reused.
    fn set_conn_max_lifetime(&mut self, lifetime: Duration);

    /// Maximum number of idle connections retained by the pool.
    fn set_max_idle_connections(&mut self, max: u32);

    /// Maximum number of open connections.
    fn set_max_open_connections(&mut self, max: u32);

    /// Maximum amount of time a connection may remain idle.
    fn set_conn_max_idle_time(&mut self, idle: Duration);

    /// Verify that a connection can be established.
    async fn ping(&self) -> Result<(), DriverError>;

    /// Close the pool. Subsequent use of the handle must fail.
    async fn close(&self) -> Result<(), DriverError>;
}
