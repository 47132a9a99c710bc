//! myconn CLI - operator checks for connection registry configurations.

use clap::Parser;

use myconn_cli::cli::{Cli, Command};
use myconn_cli::commands;
use myconn_cli::error::CliResult;
use myconn_cli::output;
use myconn_core::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_with_level("debug");
    } else {
        logging::init();
    }

    match cli.command {
        Command::Validate(args) => commands::validate::run(args).await,
        Command::Resolve(args) => commands::resolve::run(args).await,
        Command::Check(args) => commands::check::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
