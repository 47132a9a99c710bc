//! CLI command implementations.

pub mod check;
pub mod resolve;
pub mod validate;
pub mod version;

use std::path::Path;

use myconn_core::{Config, ConnectionSpec, Topology};

use crate::error::CliResult;
use crate::output;

/// Load a configuration file, printing its path.
pub(crate) fn load_config(path: &Path) -> CliResult<Config> {
    output::kv("Config", &path.display().to_string());
    Ok(Config::load(path)?)
}

/// Print the topology fields.
pub(crate) fn print_topology(topology: &Topology<'_>) {
    output::kv("Topology", topology.kind());
    match topology {
        Topology::Direct { .. } => {}
        Topology::Cluster { cluster, schema } | Topology::HaCluster { cluster, schema } => {
            output::kv("Cluster", cluster);
            output::kv("Schema", schema);
        }
    }
}

/// Human-readable role of a connection.
pub(crate) fn role(topology: &Topology<'_>, spec: &ConnectionSpec) -> &'static str {
    if !topology.is_cluster() {
        return "direct";
    }
    match (spec.is_master, spec.is_read_only) {
        (true, false) => "master, read-write",
        (true, true) => "master, read-only",
        (false, _) => "replica, read-only",
    }
}
