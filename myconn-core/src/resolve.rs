//! Connection string resolution.
//!
//! Cluster deployments inject endpoints and passwords through environment
//! variables whose names are derived from the cluster, the schema and the
//! role of the connection:
//!
//! | topology   | master endpoint                          | replica endpoint                                  |
//! |------------|------------------------------------------|---------------------------------------------------|
//! | cluster    | `DB_MYSQL_{C}_{S}_{S}_ENDPOINT`          | `DB_MYSQL_{C}_{S}_{S}_LOCAL_REPLICA_ENDPOINT`     |
//! | ha_cluster | `DB_HA_MYSQL_{C}_{S}_{S}_WR_ENDPOINT`    | `DB_HA_MYSQL_{C}_{S}_{S}_RO_ENDPOINT`             |
//!
//! Passwords live under the same prefix with a `_WPROD` (read-write) or
//! `_RPROD` (read-only) suffix, and the user name is `{schema}_WPROD` or
//! `{schema}_RPROD`. Cluster and schema are upper-cased in variable names
//! only; the user name and database keep the configured schema spelling.

use tracing::debug;

use crate::config::ConnectionSpec;
use crate::dsn;
use crate::env::Environment;
use crate::error::ResolveError;
use crate::validate::Topology;

/// Environment variable names consulted for one cluster connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvNames {
    /// Variable holding `host:port`.
    pub endpoint: String,
    /// Variable holding the password.
    pub password: String,
}

/// User name and variable names for a cluster connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRole {
    pub username: String,
    pub database: String,
    pub vars: EnvNames,
}

/// Derive the user name and environment variable names for a connection.
///
/// Returns `None` for a direct topology, which reads no variables.
pub fn cluster_role(topology: &Topology<'_>, spec: &ConnectionSpec) -> Option<ClusterRole> {
    let (prefix, cluster, schema, master_suffix, replica_suffix) = match *topology {
        Topology::Direct { .. } => return None,
        Topology::Cluster { cluster, schema } => (
            "DB_MYSQL",
            cluster,
            schema,
            "ENDPOINT",
            "LOCAL_REPLICA_ENDPOINT",
        ),
        Topology::HaCluster { cluster, schema } => (
            "DB_HA_MYSQL",
            cluster,
            schema,
            "WR_ENDPOINT",
            "RO_ENDPOINT",
        ),
    };

    let cluster_upper = cluster.to_uppercase();
    let schema_upper = schema.to_uppercase();
    let base = format!(
        "{}_{}_{}_{}",
        prefix, cluster_upper, schema_upper, schema_upper
    );

    let endpoint_suffix = if spec.is_master {
        master_suffix
    } else {
        replica_suffix
    };
    let credential_suffix = if spec.is_read_only { "RPROD" } else { "WPROD" };

    Some(ClusterRole {
        username: format!("{}_{}", schema, credential_suffix),
        database: schema.to_string(),
        vars: EnvNames {
            endpoint: format!("{}_{}", base, endpoint_suffix),
            password: format!("{}_{}", base, credential_suffix),
        },
    })
}

/// Resolve the connection string for `spec`.
///
/// A direct topology yields its DSN verbatim and ignores `spec.parameters`.
/// Cluster topologies read the endpoint and password from `env`; a missing
/// variable or an empty endpoint is an error.
pub fn resolve_dsn<E>(
    topology: &Topology<'_>,
    spec: &ConnectionSpec,
    env: &E,
) -> Result<String, ResolveError>
where
    E: Environment + ?Sized,
{
    let Some(role) = cluster_role(topology, spec) else {
        return Ok(topology.direct_dsn().unwrap_or_default().to_string());
    };

    let host = require(env, &role.vars.endpoint)?;
    if host.is_empty() {
        return Err(ResolveError::EmptyVariable {
            name: role.vars.endpoint,
        });
    }
    let password = require(env, &role.vars.password)?;

    debug!(
        connection = %spec.name,
        endpoint_var = %role.vars.endpoint,
        password_var = %role.vars.password,
        username = %role.username,
        "Resolved cluster credentials"
    );

    Ok(dsn::compose(
        &role.username,
        &password,
        &host,
        &role.database,
        &spec.parameters,
    ))
}

fn require<E: Environment + ?Sized>(env: &E, name: &str) -> Result<String, ResolveError> {
    env.var(name).ok_or_else(|| ResolveError::MissingVariable {
        name: name.to_string(),
    })
}
