//! Named registry of pooled database handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{Config, PoolSettings};
use crate::driver::{Connector, PooledHandle};
use crate::dsn;
use crate::env::{Environment, ProcessEnv};
use crate::error::{AggregateError, RegistryError, RegistryResult};
use crate::resolve::resolve_dsn;
use crate::validate::validate;

/// The set of handles opened from a [`Config`], keyed by connection name.
///
/// The mapping never changes after [`Registry::open`] returns, so lookups
/// are safe from any number of threads. [`Registry::close`] is a shutdown
/// step and must not race with other use of the registry or its handles.
pub struct Registry<H> {
    handles: HashMap<String, Arc<H>>,
}

impl<H: PooledHandle> Registry<H> {
    /// Validate `config` and open every declared connection, reading cluster
    /// endpoints and credentials from the process environment.
    pub fn open<C>(config: &Config, connector: &C) -> RegistryResult<Self>
    where
        C: Connector<Handle = H>,
    {
        Self::open_with_env(config, connector, &ProcessEnv)
    }

    /// Like [`Registry::open`], reading variables from `env`.
    ///
    /// Connections are opened one after another in declaration order. The
    /// first failure aborts the call and drops every handle opened so far.
    pub fn open_with_env<C, E>(config: &Config, connector: &C, env: &E) -> RegistryResult<Self>
    where
        C: Connector<Handle = H>,
        E: Environment + ?Sized,
    {
        let topology = validate(config)?;

        let mut handles = HashMap::with_capacity(config.connections.len());
        for spec in &config.connections {
            let dsn = resolve_dsn(&topology, spec, env).map_err(|source| RegistryError::Resolve {
                name: spec.name.clone(),
                source,
            })?;

            debug!(
                connection = %spec.name,
                topology = topology.kind(),
                dsn = %dsn::redact(&dsn),
                "Opening connection"
            );

            let mut handle = connector
                .open(&dsn)
                .map_err(|source| RegistryError::Connect {
                    name: spec.name.clone(),
                    source,
                })?;
            apply_pool_settings(&mut handle, &spec.connection_pool);

            handles.insert(spec.name.clone(), Arc::new(handle));
        }

        info!(
            connections = handles.len(),
            topology = topology.kind(),
            "Connection registry opened"
        );

        Ok(Self { handles })
    }

    /// Handle registered under `name`.
    pub fn get(&self, name: &str) -> RegistryResult<Arc<H>> {
        self.handles
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Every registered handle, in no particular order.
    pub fn list(&self) -> Vec<Arc<H>> {
        self.handles.values().cloned().collect()
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` if a handle is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if the registry holds no handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Ping every handle in ascending name order.
    ///
    /// All handles are pinged even when some fail; failures are reported
    /// together.
    pub async fn ping_all(&self) -> RegistryResult<()> {
        let mut failures = Vec::new();
        for name in self.names() {
            if let Err(err) = self.handles[name].ping().await {
                warn!(connection = %name, error = %err, "Connection ping failed");
                failures.push((name.to_string(), err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Ping(AggregateError::new("ping", failures)))
        }
    }

    /// Close every handle in ascending name order.
    ///
    /// Every handle is closed even when some fail; failures are reported
    /// together as `name: error` pairs. Calling this more than once is not
    /// supported.
    pub async fn close(&self) -> RegistryResult<()> {
        let mut failures = Vec::new();
        for name in self.names() {
            if let Err(err) = self.handles[name].close().await {
                warn!(connection = %name, error = %err, "Failed to close connection");
                failures.push((name.to_string(), err));
            }
        }

        info!(
            connections = self.handles.len(),
            failed = failures.len(),
            "Connection registry closed"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Close(AggregateError::new("close", failures)))
        }
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.handles.keys().collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("connections", &names).finish()
    }
}

fn apply_pool_settings<H: PooledHandle>(handle: &mut H, pool: &PoolSettings) {
    if let Some(lifetime) = pool.conn_max_lifetime {
        handle.set_conn_max_lifetime(lifetime.into());
    }
    if let Some(max) = pool.max_idle_connections {
        handle.set_max_idle_connections(max);
    }
    if let Some(max) = pool.max_open_connections {
        handle.set_max_open_connections(max);
    }
    if let Some(idle) = pool.conn_max_idle_time {
        handle.set_conn_max_idle_time(idle.into());
    }
}
