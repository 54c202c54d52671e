// LogHerald - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogHerald operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogHeraldError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The global tracing subscriber could not be installed.
    Logging { reason: String },
}

impl fmt::Display for LogHeraldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Logging { reason } => write!(f, "Logging initialisation failed: {reason}"),
        }
    }
}

impl std::error::Error for LogHeraldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Logging { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Errors produced while substituting arguments into a console format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A directive has no matching positional argument.
    MissingArgument { directive: String, index: usize },

    /// The argument at `index` is the wrong kind for its directive.
    ArgumentMismatch {
        directive: String,
        index: usize,
        found: &'static str,
    },

    /// `%` followed by a character that is not a known directive.
    UnknownDirective { directive: char, offset: usize },

    /// The format string ends in a lone `%` or an unterminated width.
    Truncated { offset: usize },

    /// A `%Nd` width exceeds the supported maximum.
    WidthTooLarge { offset: usize, max: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { directive, index } => {
                write!(f, "no argument #{index} for directive '{directive}'")
            }
            Self::ArgumentMismatch {
                directive,
                index,
                found,
            } => write!(
                f,
                "argument #{index} is a {found}, which directive '{directive}' cannot print"
            ),
            Self::UnknownDirective { directive, offset } => {
                write!(f, "unknown directive '%{directive}' at byte {offset}")
            }
            Self::Truncated { offset } => {
                write!(f, "format string ends inside a directive at byte {offset}")
            }
            Self::WidthTooLarge { offset, max } => {
                write!(f, "width of directive at byte {offset} exceeds maximum of {max}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    NotFound { path: PathBuf },

    /// The config file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogHeraldError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogHerald results.
pub type Result<T> = std::result::Result<T, LogHeraldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_chain_preserved() {
        let err: LogHeraldError = ConfigError::Io {
            path: PathBuf::from("config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error:"));
        let inner = err.source().unwrap();
        assert!(inner.source().is_some());
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::MissingArgument {
            directive: "%s".to_string(),
            index: 3,
        };
        assert_eq!(err.to_string(), "no argument #3 for directive '%s'");
    }
}
