//! Tracing subscriber setup.

use scriptsmith_error::{ConfigError, ScriptsmithResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a console subscriber with an environment filter.
///
/// `RUST_LOG` takes precedence; otherwise the filter is `info`, or
/// `info,scriptsmith=debug` style debug output when `verbose` is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> ScriptsmithResult<()> {
    let default_filter = if verbose {
        "info,scriptsmith=debug,scriptsmith_pipeline=debug,scriptsmith_models=debug"
    } else {
        "info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(verbose))
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(())
}
