//! Pooled MySQL handles.

use std::fmt;
use std::mem;
use std::time::Duration;

use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts, Pool, PoolConstraints, PoolOpts};
use myconn_core::{Connector, DriverError, PooledHandle};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::{Endpoint, MysqlConfig};
use crate::error::{MysqlError, MysqlResult};

/// Largest pool size handed to `mysql_async`.
///
/// The driver preallocates its idle queue to the pool maximum, so an
/// unlimited (`0`) or very large open limit is capped here.
pub const MAX_POOL_SIZE: usize = 1024;

/// Pool limits applied when the pool is created.
///
/// Unset fields keep the `mysql_async` defaults. `mysql_async` expires idle
/// connections only above the pool minimum, so when an idle time is set
/// without an idle limit the minimum drops to zero and every idle connection
/// is subject to the idle time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolTuning {
    /// Absolute lifetime of a connection.
    pub conn_max_lifetime: Option<Duration>,
    /// Connections kept open while idle. Never exceeds the open limit.
    pub max_idle_connections: Option<u32>,
    /// Upper bound on open connections; `0` means unlimited, capped at
    /// [`MAX_POOL_SIZE`].
    pub max_open_connections: Option<u32>,
    /// Idle time after which connections above the idle limit are closed.
    pub conn_max_idle_time: Option<Duration>,
}

impl PoolTuning {
    /// Build `mysql_async` pool options.
    pub fn to_pool_opts(&self) -> PoolOpts {
        let defaults = PoolConstraints::default();
        let max = match self.max_open_connections {
            Some(0) => MAX_POOL_SIZE,
            Some(n) => (n as usize).min(MAX_POOL_SIZE),
            None => defaults.max(),
        };
        let min = match (self.max_idle_connections, self.conn_max_idle_time) {
            (Some(n), _) => n as usize,
            (None, Some(_)) => 0,
            (None, None) => defaults.min(),
        }
        .min(max);

        let mut opts = PoolOpts::default()
            .with_constraints(PoolConstraints::new(min, max).unwrap_or(defaults))
            .with_abs_conn_ttl(self.conn_max_lifetime);
        if let Some(idle) = self.conn_max_idle_time {
            opts = opts.with_inactive_connection_ttl(idle);
        }
        opts
    }
}

enum State {
    /// No connection attempted yet.
    Idle,
    Open(Pool),
    Closed,
}

/// A lazily created `mysql_async` pool.
///
/// The pool is built on first use, so it must be used from within a Tokio
/// runtime. Once closed, every operation fails with [`MysqlError::Closed`].
pub struct MysqlHandle {
    config: MysqlConfig,
    tuning: PoolTuning,
    state: Mutex<State>,
}

impl MysqlHandle {
    /// Create a handle; no connection is made until the pool is first used.
    pub fn new(config: MysqlConfig) -> Self {
        Self {
            config,
            tuning: PoolTuning::default(),
            state: Mutex::new(State::Idle),
        }
    }

    /// Connection options.
    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    /// Pool limits.
    pub fn tuning(&self) -> &PoolTuning {
        &self.tuning
    }

    /// Returns `true` once [`PooledHandle::close`] has been called.
    pub fn is_closed(&self) -> bool {
        matches!(*self.state.lock(), State::Closed)
    }

    /// The underlying pool, creating it on first call.
    pub fn pool(&self) -> MysqlResult<Pool> {
        let mut state = self.state.lock();
        match &*state {
            State::Open(pool) => Ok(pool.clone()),
            State::Closed => Err(MysqlError::Closed),
            State::Idle => {
                let opts = self
                    .config
                    .to_opts_builder()
                    .pool_opts(self.tuning.to_pool_opts());
                let pool = Pool::new(Opts::from(opts));

                match &self.config.endpoint {
                    Endpoint::Tcp { host, port } => info!(
                        host = %host,
                        port = %port,
                        database = %self.config.database,
                        "MySQL connection pool created"
                    ),
                    Endpoint::Socket(path) => info!(
                        socket = %path,
                        database = %self.config.database,
                        "MySQL connection pool created"
                    ),
                }

                *state = State::Open(pool.clone());
                Ok(pool)
            }
        }
    }

    /// Get a connection from the pool.
    pub async fn get_conn(&self) -> MysqlResult<Conn> {
        debug!("Acquiring connection from pool");
        Ok(self.pool()?.get_conn().await?)
    }

    async fn check(&self) -> MysqlResult<()> {
        let mut conn = self.get_conn().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn shutdown(&self) -> MysqlResult<()> {
        let previous = mem::replace(&mut *self.state.lock(), State::Closed);
        if let State::Open(pool) = previous {
            pool.disconnect().await?;
            info!(database = %self.config.database, "MySQL connection pool closed");
        }
        Ok(())
    }
}

impl fmt::Debug for MysqlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.state.lock() {
            State::Idle => "idle",
            State::Open(_) => "open",
            State::Closed => "closed",
        };
        f.debug_struct("MysqlHandle")
            .field("endpoint", &self.config.endpoint)
            .field("database", &self.config.database)
            .field("tuning", &self.tuning)
            .field("state", &state)
            .finish()
    }
}

#[async_trait]
impl PooledHandle for MysqlHandle {
    fn set_conn_max_lifetime(&mut self, lifetime: Duration) {
        self.tuning.conn_max_lifetime = Some(lifetime);
    }

    fn set_max_idle_connections(&mut self, max: u32) {
        self.tuning.max_idle_connections = Some(max);
    }

    fn set_max_open_connections(&mut self, max: u32) {
        self.tuning.max_open_connections = Some(max);
    }

    fn set_conn_max_idle_time(&mut self, idle: Duration) {
        self.tuning.conn_max_idle_time = Some(idle);
    }

    async fn ping(&self) -> Result<(), DriverError> {
        Ok(self.check().await?)
    }

    async fn close(&self) -> Result<(), DriverError> {
        Ok(self.shutdown().await?)
    }
}

/// Opens [`MysqlHandle`]s from Go-style MySQL DSNs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlConnector;

impl MysqlConnector {
    /// Create a connector.
    pub fn new() -> Self {
        Self
    }
}

impl Connector for MysqlConnector {
    type Handle = MysqlHandle;

    fn open(&self, dsn: &str) -> Result<MysqlHandle, DriverError> {
        Ok(MysqlHandle::new(MysqlConfig::from_dsn(dsn)?))
    }
}
