//! myconn CLI - operator checks for connection registry configurations.
//!
//! Validates configuration files, previews the connection strings each
//! connection resolves to, and checks connectivity.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
