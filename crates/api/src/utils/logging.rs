//! Tracing subscriber setup and structured request logging helpers

use std::time::Duration;

use ordertrack_domain::{LoggingConfig, OrderTrackError};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of an operation with structured fields.
///
/// `operation` should be a stable identifier such as `"orders::close"`.
#[inline]
pub fn log_operation(operation: &str, elapsed: Duration, error: Option<&OrderTrackError>) {
    match error {
        None => log_outcome(operation, elapsed, None),
        Some(err) => log_outcome(operation, elapsed, Some((err.label(), &err.to_string()))),
    }
}

/// Like [`log_operation`] for outcomes that carry their own failure label
/// instead of an error value.
pub fn log_outcome(operation: &str, elapsed: Duration, failure: Option<(&str, &str)>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match failure {
        None => info!(operation, duration_ms, "operation_success"),
        Some((error_type, error)) => {
            warn!(operation, duration_ms, error_type, error, "operation_failure");
        }
    }
}
