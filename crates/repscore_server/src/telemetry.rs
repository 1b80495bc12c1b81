//! Tracing subscriber setup.

use crate::ServerSettings;
use repscore_error::{ConfigError, RepscoreResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the configured log level. Emits JSON
/// lines when `json_logs` is set, human-readable output otherwise.
///
/// # Errors
///
/// Returns a configuration error if the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(settings: &ServerSettings) -> RepscoreResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level()))
        .map_err(|e| ConfigError::new(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = if *settings.json_logs() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
