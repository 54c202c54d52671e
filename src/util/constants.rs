// LogHerald - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogHerald";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogHerald";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Configuration
// =============================================================================

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum accepted size of `config.toml` in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum length of the application title printed in headers and panics.
pub const MAX_TITLE_LENGTH: usize = 128;

/// Default application title when neither CLI nor config provides one.
pub const DEFAULT_TITLE: &str = APP_NAME;

/// Default logging level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Largest width a `%0Nd` / `%Nd` console directive may request.
pub const MAX_FORMAT_WIDTH: usize = 256;

/// Level names accepted by `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Rendering
// =============================================================================

/// Prefix placed in front of a captured stack trace.
pub const BACKTRACE_LABEL: &str = "\nBACKTRACE:\n";

/// Shown in a panic banner when the payload is not a string.
pub const NON_STRING_PANIC_MESSAGE: &str = "[non-string message]";

/// Shown in a panic banner when the panic carries no location.
pub const UNKNOWN_LOCATION: &str = "[unknown location]";

/// Title used by the panic hook when none was supplied.
pub const UNKNOWN_TITLE: &str = "[unknown?]";

/// Module name used when a tracing event carries neither module path nor target.
pub const UNKNOWN_MODULE: &str = "?";
