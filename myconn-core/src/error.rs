//! Error types for configuration, resolution and registry operations.

use std::fmt;

use thiserror::Error;

/// Error reported by a driver behind the [`Connector`](crate::driver::Connector)
/// and [`PooledHandle`](crate::driver::PooledHandle) capabilities.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A violated configuration invariant.
///
/// Variants are listed in the order [`validate`](crate::validate::validate)
/// checks them; only the first violation is ever reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid MySQL config: DSN, Cluster and HACluster are empty")]
    NoTopology,

    #[error("invalid MySQL config: DSN is mutually exclusive with Cluster and HACluster")]
    DsnWithCluster,

    #[error("invalid MySQL config: Cluster is mutually exclusive with HACluster")]
    ClusterWithHaCluster,

    #[error(
        "invalid MySQL config: DSN is mutually exclusive with Schema since the schema is already defined in the DSN"
    )]
    DsnWithSchema,

    #[error("invalid MySQL config: when DSN is empty the Schema must be defined")]
    MissingSchema,

    #[error("invalid MySQL config: no connections defined")]
    NoConnections,

    #[error("invalid MySQL config: duplicated connection name {0:?}")]
    DuplicateName(String),

    #[error("invalid MySQL config: cannot write to a replica: connection {0:?}")]
    WriteToReplica(String),
}

/// Failure to derive a connection string from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The variable is not set in the environment.
    #[error("environment variable {name} is not set")]
    MissingVariable { name: String },

    /// The variable is set but empty where a value is required.
    #[error("environment variable {name} is empty")]
    EmptyVariable { name: String },
}

/// Errors produced while opening, querying or shutting down a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A connection string could not be resolved.
    #[error("failed to resolve connection {name:?}: {source}")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },

    /// The driver refused to open a handle.
    #[error("failed to open connection {name:?}: {source}")]
    Connect {
        name: String,
        #[source]
        source: DriverError,
    },

    /// No handle is registered under the name.
    #[error("unknown connection name {0}")]
    NotFound(String),

    /// One or more handles failed to close.
    #[error(transparent)]
    Close(AggregateError),

    /// One or more handles failed a health check.
    #[error(transparent)]
    Ping(AggregateError),
}

impl RegistryError {
    /// Returns `true` if this error stems from an invalid configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this error is an unknown-name lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Per-handle failures collected by a bulk operation, in the order the
/// handles were visited.
#[derive(Debug)]
pub struct AggregateError {
    operation: &'static str,
    failures: Vec<(String, DriverError)>,
}

impl AggregateError {
    pub(crate) fn new(operation: &'static str, failures: Vec<(String, DriverError)>) -> Self {
        Self {
            operation,
            failures,
        }
    }

    /// The failed handles with their errors.
    pub fn failures(&self) -> &[(String, DriverError)] {
        &self.failures
    }

    /// Names of the failed handles.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {} connections: ", self.operation)?;
        for (i, (name, err)) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_offending_value() {
        let err = ConfigError::DuplicateName("foo".into());
        assert_eq!(
            err.to_string(),
            "invalid MySQL config: duplicated connection name \"foo\""
        );

        let err = ConfigError::WriteToReplica("replica".into());
        assert_eq!(
            err.to_string(),
            "invalid MySQL config: cannot write to a replica: connection \"replica\""
        );
    }

    #[test]
    fn test_aggregate_error_display() {
        let err = AggregateError::new(
            "close",
            vec![
                ("bar".to_string(), "bad connection".into()),
                ("foo".to_string(), "bad connection".into()),
            ],
        );

        assert_eq!(
            err.to_string(),
            "failed to close connections: bar: bad connection, foo: bad connection"
        );
        assert_eq!(err.names().collect::<Vec<_>>(), vec!["bar", "foo"]);
    }

    #[test]
    fn test_registry_error_predicates() {
        assert!(RegistryError::from(ConfigError::NoConnections).is_config());
        assert!(RegistryError::NotFound("x".into()).is_not_found());
        assert_eq!(
            RegistryError::NotFound("x".into()).to_string(),
            "unknown connection name x"
        );
    }
}
