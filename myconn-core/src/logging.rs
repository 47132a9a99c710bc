//! Logging setup for binaries embedding myconn.
//!
//! Library code only emits `tracing` events. Installing a subscriber is left
//! to the application; [`init`] does it from environment variables when the
//! `tracing-subscriber` feature is enabled:
//!
//! - `MYCONN_DEBUG=true|1|yes` - enable debug logging
//! - `MYCONN_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `MYCONN_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! ```rust,no_run
//! myconn_core::logging::init();
//! ```
//!
//! Events carry structured fields, and DSNs are always redacted:
//!
//! ```rust,ignore
//! debug!(connection = %name, dsn = %dsn::redact(&dsn), "Opening connection");
//! warn!(connection = %name, error = %err, "Failed to close connection");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "MYCONN_DEBUG";
const LEVEL_VAR: &str = "MYCONN_LOG_LEVEL";
const FORMAT_VAR: &str = "MYCONN_LOG_FORMAT";

/// Check if debug logging is enabled via `MYCONN_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    debug_flag(env::var(DEBUG_VAR).ok().as_deref())
}

/// Log level from `MYCONN_LOG_LEVEL`, falling back to `debug` when
/// `MYCONN_DEBUG` is set and `warn` otherwise.
pub fn get_log_level() -> &'static str {
    level_from(
        env::var(LEVEL_VAR).ok().as_deref(),
        is_debug_enabled(),
    )
}

/// Output format from `MYCONN_LOG_FORMAT`, defaulting to `json`.
pub fn get_log_format() -> &'static str {
    format_from(env::var(FORMAT_VAR).ok().as_deref())
}

fn debug_flag(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn level_from(level: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn format_from(format: Option<&str>) -> &'static str {
    match format.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize logging from the environment.
///
/// Does nothing unless `MYCONN_DEBUG` or `MYCONN_LOG_LEVEL` is set.
/// Only the first call in a process has an effect.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    install(get_log_level());
}

/// Initialize logging at `level`, ignoring `MYCONN_DEBUG` and `MYCONN_LOG_LEVEL`.
pub fn init_with_level(level: &str) {
    install(level_from(Some(level), false));
}

fn install(level: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "myconn={},myconn_core={},myconn_mysql={},myconn_cli={}",
                level, level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let format = get_log_format();
            let registry = tracing_subscriber::registry().with(filter);
            let result = match format {
                "pretty" => registry.with(fmt::layer().pretty()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().json()).try_init(),
            };

            if result.is_ok() {
                tracing::info!(level = level, format = format, "myconn logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = level;
        }
    });
}
