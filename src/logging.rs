//! Logging infrastructure for QuoteKit.
//!
//! All three subsystems emit structured `tracing` events under the
//! `quotekit::cache`, `quotekit::profiler`, and `quotekit::limit` targets.
//! Embedders with their own subscriber need nothing from this module; the
//! `tracing-subscriber` feature adds an opt-in, environment-driven
//! subscriber for binaries that want one.
//!
//! # Environment Variables
//!
//! - `QUOTEKIT_DEBUG=true|1|yes` - Enable debug logging
//! - `QUOTEKIT_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `QUOTEKIT_LOG_FORMAT=pretty|compact|json` - Output format (default: pretty)
//! - `RUST_LOG` - Full `EnvFilter` directives, overriding the above
//!
//! # Usage
//!
//! ```rust,no_run
//! use quotekit::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//!
//! // Or with a specific level
//! logging::init_with_level("debug");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `QUOTEKIT_DEBUG`.
///
/// Returns `true` if `QUOTEKIT_DEBUG` is set to "true", "1", or "yes"
/// (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("QUOTEKIT_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `QUOTEKIT_LOG_LEVEL`.
///
/// Defaults to "debug" if `QUOTEKIT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("QUOTEKIT_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `QUOTEKIT_LOG_FORMAT`.
///
/// Defaults to "pretty" for human consumption.
pub fn get_log_format() -> &'static str {
    env::var("QUOTEKIT_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "json" => "json",
            "compact" => "compact",
            _ => "pretty",
        })
        .unwrap_or("pretty")
}

/// Initialize the QuoteKit logging system.
///
/// Call once at application startup; subsequent calls are no-ops. Without
/// the `tracing-subscriber` feature, or when neither `QUOTEKIT_DEBUG` nor
/// `QUOTEKIT_LOG_LEVEL` is set, this does nothing and events go to
/// whatever subscriber the embedder installed.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("QUOTEKIT_LOG_LEVEL").is_err() {
            // No logging requested, skip initialization
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| {
                    EnvFilter::try_new(format!(
                        "quotekit={level},quotekit_cache={level},quotekit_profiler={level},quotekit_limit={level}"
                    ))
                })
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "QuoteKit logging initialized"
            );
        }
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call it early, before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: intended for program startup, before threads exist.
    unsafe {
        env::set_var("QUOTEKIT_LOG_LEVEL", level);
    }
    init();
}

/// Initialize debug-level logging (convenience function).
///
/// Equivalent to setting `QUOTEKIT_DEBUG=true` and calling [`init`].
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call it early, before spawning threads.
pub fn init_debug() {
    // SAFETY: intended for program startup, before threads exist.
    unsafe {
        env::set_var("QUOTEKIT_DEBUG", "true");
    }
    init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_parsing() {
        // Unset in the test environment
        if env::var("QUOTEKIT_DEBUG").is_err() {
            assert!(!is_debug_enabled());
        }
    }

    #[test]
    fn test_level_defaults_to_warn() {
        if env::var("QUOTEKIT_DEBUG").is_err() && env::var("QUOTEKIT_LOG_LEVEL").is_err() {
            assert_eq!(get_log_level(), "warn");
        }
    }

    #[test]
    fn test_format_defaults_to_pretty() {
        if env::var("QUOTEKIT_LOG_FORMAT").is_err() {
            assert_eq!(get_log_format(), "pretty");
        }
    }
}
