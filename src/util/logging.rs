// LogHerald - util/logging.rs
//
// Installs the global tracing subscriber with the console layer as its
// output, so the application's own log lines use the same formatting it
// provides to others.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug (sets debug)
//   - Config file: [logging] level = "debug"
//
// Level gating is EnvFilter's job; the formatter prints whatever reaches it.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app::layer::ConsoleLayer;
use crate::core::console::ConsoleSink;
use crate::core::formatter::ConsoleFormatter;
use crate::util::constants;
use crate::util::error::LogHeraldError;

/// Level used when RUST_LOG is not set.
///
/// Priority: CLI --debug flag > config level > default "info".
pub fn fallback_level(debug_flag: bool, config_level: Option<&str>) -> &str {
    if debug_flag {
        "debug"
    } else {
        config_level.unwrap_or(constants::DEFAULT_LOG_LEVEL)
    }
}

/// Initialise the logging subsystem.
///
/// Prints the `title` header, installs the subscriber, and returns the shared
/// formatter so the panic hook can print through the same sink.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
pub fn init<S>(
    debug_flag: bool,
    config_level: Option<&str>,
    title: &str,
    sink: S,
) -> Result<Arc<ConsoleFormatter<S>>, LogHeraldError>
where
    S: ConsoleSink + Send + Sync + 'static,
{
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(fallback_level(debug_flag, config_level))
    };

    let formatter = Arc::new(ConsoleFormatter::new(sink));
    let layer = ConsoleLayer::new(Arc::clone(&formatter));
    layer.announce(title);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LogHeraldError::Logging {
            reason: e.to_string(),
        })?;

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        "Logging initialised"
    );

    Ok(formatter)
}
