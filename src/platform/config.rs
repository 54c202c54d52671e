// LogHerald - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::platform::terminal::{ColorMode, StreamMode};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogHerald configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logherald/ or %APPDATA%\LogHerald\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[console]` section.
    pub console: ConsoleSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[console]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Title printed in the header and panic banners.
    pub title: Option<String>,
    /// "auto", "always" or "never".
    pub color: Option<String>,
    /// "split" or "stderr".
    pub stream: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub color: ColorMode,
    pub stream: StreamMode,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_TITLE.to_string(),
            color: ColorMode::default(),
            stream: StreamMode::default(),
            log_level: None,
        }
    }
}

/// Read and parse a config file without validating values.
pub fn read_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults with one warning.
pub fn load_config(path: &Path) -> (AppConfig, Vec<String>) {
    match read_config_file(path) {
        Ok(raw) => {
            tracing::info!(path = %path.display(), "Loaded config.toml");
            validate(raw)
        }
        Err(ConfigError::NotFound { .. }) => {
            tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
            (AppConfig::default(), Vec::new())
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Validate each field, accumulating a warning per rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Console: title --
    if let Some(title) = raw.console.title {
        let trimmed = title.trim();
        let max = constants::MAX_TITLE_LENGTH;
        if trimmed.is_empty() || trimmed.chars().count() > max {
            warnings.push(rejected(
                "console.title",
                &title,
                format!("1 to {max} characters"),
                "default",
            ));
        } else {
            config.title = trimmed.to_string();
        }
    }

    // -- Console: color --
    if let Some(ref color) = raw.console.color {
        match ColorMode::parse(color) {
            Some(mode) => config.color = mode,
            None => warnings.push(rejected(
                "console.color",
                color,
                "auto, always or never".to_string(),
                "auto",
            )),
        }
    }

    // -- Console: stream --
    if let Some(ref stream) = raw.console.stream {
        match StreamMode::parse(stream) {
            Some(mode) => config.stream = mode,
            None => warnings.push(rejected(
                "console.stream",
                stream,
                "split or stderr".to_string(),
                "split",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(rejected(
                "logging.level",
                level,
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Warning text for a value that failed validation.
fn rejected(field: &str, value: &str, expected: String, fallback: &str) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{err}. Using {fallback}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("nope.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config() {
        let (_dir, path) = write_config(
            r#"
            [console]
            title = "  Demo  "
            color = "never"
            stream = "stderr"

            [logging]
            level = "DEBUG"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.title, "Demo");
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.stream, StreamMode::Stderr);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (_dir, path) = write_config(
            r#"
            [console]
            title = ""
            color = "rainbow"
            stream = "pipe"

            [logging]
            level = "verbose"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().all(|w| w.contains("is out of range")));
    }

    #[test]
    fn test_rejected_value_names_field_and_expectation() {
        let (_dir, path) = write_config(
            r#"
            [logging]
            level = "verbose"
            "#,
        );
        let (_, warnings) = load_config(&path);
        assert_eq!(
            warnings,
            vec![
                "Config 'logging.level' = 'verbose' is out of range. \
                 Expected: error, warn, info, debug, trace. Using info."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_unparseable_file_warns() {
        let (_dir, path) = write_config("[console\ntitle = ");
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            read_config_file(&path),
            Err(ConfigError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let big = format!("# {}\n", "x".repeat(constants::MAX_CONFIG_FILE_SIZE as usize));
        let (_dir, path) = write_config(&big);
        assert!(matches!(
            read_config_file(&path),
            Err(ConfigError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_dir, path) = write_config("[future]\nkey = 1\n[console]\ncolor = \"always\"\n");
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty());
        assert_eq!(config.color, ColorMode::Always);
    }
}
