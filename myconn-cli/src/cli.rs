//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// myconn - MySQL connection registry tool
#[derive(Parser, Debug)]
#[command(name = "myconn")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "myconn - MySQL connection registry tool", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a connection configuration file
    Validate(ConfigArgs),

    /// Print the connection string each connection resolves to
    Resolve(ConfigArgs),

    /// Open every connection, ping it and close it
    Check(ConfigArgs),

    /// Display version information
    Version,
}

/// Arguments shared by commands reading a configuration file
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the configuration file (.json or .toml)
    #[arg(short, long, env = "MYCONN_CONFIG")]
    pub config: PathBuf,
}
