//! Opt-in tracing bootstrap.
//!
//! The crate emits `tracing` events on its own (shape registration at `debug`,
//! compiled filters at `trace`) but never installs a subscriber: embedding
//! applications bring their own. For binaries that just want output, [`init`]
//! installs a process-wide subscriber driven by two environment variables:
//!
//! - `SIFT_LOG_LEVEL` — `trace | debug | info | warn | error`. Unset or
//!   unrecognized leaves logging off.
//! - `SIFT_LOG_FORMAT` — `json` (default), `pretty`, or `compact`.
//!
//! [`init`] is idempotent and does nothing unless the `tracing-subscriber`
//! feature is enabled.
//!
//! ```rust,no_run
//! sift_query::logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// The level requested through `SIFT_LOG_LEVEL`, if any.
///
/// Unrecognized level names count as unset rather than erroring; a typo in an
/// env var should not change program behavior beyond losing log output.
pub fn requested_level() -> Option<&'static str> {
    let level = env::var("SIFT_LOG_LEVEL").ok()?;
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// The output format requested through `SIFT_LOG_FORMAT`.
///
/// Anything other than `pretty` or `compact` falls back to `json`.
pub fn requested_format() -> &'static str {
    match env::var("SIFT_LOG_FORMAT") {
        Ok(format) => match format.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        },
        Err(_) => "json",
    }
}

/// Install a subscriber for this crate's events, once per process.
///
/// A no-op when `SIFT_LOG_LEVEL` requests nothing, when the
/// `tracing-subscriber` feature is off, or on any call after the first.
pub fn init() {
    INIT.call_once(|| {
        let Some(level) = requested_level() else {
            return;
        };

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!("sift_query={level}"))
                .unwrap_or_else(|_| EnvFilter::new("warn"));
            let registry = tracing_subscriber::registry().with(filter);

            match requested_format() {
                "pretty" => registry.with(fmt::layer().pretty()).init(),
                "compact" => registry.with(fmt::layer().compact()).init(),
                _ => registry.with(fmt::layer().json()).init(),
            }

            tracing::info!(level, format = requested_format(), "logging enabled");
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        let _ = level;
    });
}
