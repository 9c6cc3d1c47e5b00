// --- File: crates/bookify_common/src/logging.rs ---
//! Logging utilities for the Bookify application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the Bookify application. It sets up the tracing subscriber once, with
//! an environment-driven filter on top of a sensible default level.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default level (INFO).
///
/// This function should be called at the start of the application to set up
/// logging. Log messages carry timestamps, levels, targets and file/line
/// information. `RUST_LOG` directives still take precedence over the
/// default level.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display for the bookify crates.
pub fn init_with_level(level: Level) {
    let filter = match format!("bookify={}", level).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    // Use try_init so a second call (e.g. from tests) is harmless.
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
