//! `myconn resolve` command - Show the connection string of every connection.

use myconn_core::{ProcessEnv, dsn, resolve_dsn, validate};

use crate::cli::ConfigArgs;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the resolve command
///
/// Passwords are masked. No connection is attempted.
pub async fn run(args: ConfigArgs) -> CliResult<()> {
    output::header("Resolve Connections");

    let config = super::load_config(&args.config)?;
    let topology = validate(&config)?;
    super::print_topology(&topology);

    output::newline();
    output::section("Connections");
    for spec in &config.connections {
        let resolved =
            resolve_dsn(&topology, spec, &ProcessEnv).map_err(|source| CliError::Resolve {
                name: spec.name.clone(),
                source,
            })?;
        output::kv(&spec.name, &dsn::redact(&resolved));
    }

    output::newline();
    success(&format!(
        "Resolved {} connections",
        config.connections.len()
    ));

    Ok(())
}
