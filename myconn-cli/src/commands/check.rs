//! `myconn check` command - Open, ping and close every connection.

use myconn_mysql::{MysqlConnector, MysqlRegistry};

use crate::cli::ConfigArgs;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the check command
pub async fn run(args: ConfigArgs) -> CliResult<()> {
    output::header("Check Connections");

    let config = super::load_config(&args.config)?;
    output::newline();

    output::step(1, 3, "Opening connections...");
    let registry = MysqlRegistry::open(&config, &MysqlConnector::new())?;

    output::step(2, 3, "Pinging connections...");
    let pinged = registry.ping_all().await;

    // Close even when pinging failed.
    output::step(3, 3, "Closing connections...");
    let closed = registry.close().await;

    output::newline();
    match (pinged, closed) {
        (Ok(()), Ok(())) => {
            success(&format!("{} connections reachable", registry.len()));
            Ok(())
        }
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err.into()),
        (Err(ping), Err(close)) => {
            warn(&close.to_string());
            Err(ping.into())
        }
    }
}
