//! `myconn validate` command - Validate a connection configuration file.

use myconn_core::validate;

use crate::cli::ConfigArgs;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the validate command
pub async fn run(args: ConfigArgs) -> CliResult<()> {
    output::header("Validate Configuration");

    let config = super::load_config(&args.config)?;
    let topology = validate(&config)?;
    super::print_topology(&topology);

    output::newline();
    output::section("Connections");
    for spec in &config.connections {
        output::list_item(&format!("{} ({})", spec.name, super::role(&topology, spec)));
        if topology.is_cluster() && !spec.parameters.is_empty() {
            output::kv("parameters", &spec.parameters);
        }
        if !spec.connection_pool.is_empty() {
            let pool = &spec.connection_pool;
            let settings = [
                ("conn_max_lifetime", pool.conn_max_lifetime.map(|d| d.to_string())),
                ("max_idle_connections", pool.max_idle_connections.map(|n| n.to_string())),
                ("max_open_connections", pool.max_open_connections.map(|n| n.to_string())),
                ("conn_max_idle_time", pool.conn_max_idle_time.map(|d| d.to_string())),
            ];
            for (key, value) in settings {
                if let Some(value) = value {
                    output::kv(key, &value);
                }
            }
        }
    }

    output::newline();
    success(&format!(
        "Configuration is valid ({} connections)",
        config.connections.len()
    ));

    Ok(())
}
