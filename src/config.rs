/// Service configuration.
///
/// Read from a TOML file (default `larvalog.toml`); a missing file means
/// the built-in defaults, so a fresh checkout runs against a local CSV
/// store with no setup. Secrets (the worksheet service token) come from
/// the environment via `.env`, never from the config file.

use serde::Deserialize;

use crate::logging::LogLevel;
use crate::store::csv_file::CsvStore;
use crate::store::sheet::SheetStore;
use crate::store::RecordStore;

/// Default config file path, next to the binary's working directory.
pub const DEFAULT_CONFIG_PATH: &str = "larvalog.toml";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreSection,
    pub log: LogSection,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// "csv" (local file, development) or "sheet" (worksheet service).
    pub mode: String,
    /// Directory holding the per-worksheet CSV files (csv mode).
    pub csv_dir: String,
    /// Worksheet service base URL (sheet mode).
    pub base_url: String,
    /// Worksheet name used for all reads and writes.
    pub worksheet: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub level: String,
    /// Optional log file; console-only when absent.
    pub file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store: StoreSection::default(),
            log: LogSection::default(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            mode: "csv".to_string(),
            csv_dir: ".".to_string(),
            base_url: String::new(),
            worksheet: "Sheet1".to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        LogSection {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(String),
    /// The file is not valid TOML for this schema.
    Parse(String),
    /// A field holds a value outside its allowed set.
    InvalidValue { field: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read failed: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse failed: {}", msg),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid config value for {}: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parses a TOML document and validates the enumerated fields.
    pub fn from_toml(text: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config file, falling back to defaults when it is absent.
    pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.store.mode.as_str() {
            "csv" => {}
            "sheet" if !self.store.base_url.is_empty() => {}
            "sheet" => {
                return Err(ConfigError::InvalidValue {
                    field: "store.base_url",
                    value: "(empty — required in sheet mode)".to_string(),
                })
            }
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "store.mode",
                    value: other.to_string(),
                })
            }
        }
        if LogLevel::parse(&self.log.level).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "log.level",
                value: self.log.level.clone(),
            });
        }
        Ok(())
    }

    /// The validated minimum log level.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log.level).unwrap_or(LogLevel::Info)
    }

    /// Builds the configured store backend.
    pub fn build_store(&self) -> Box<dyn RecordStore> {
        match self.store.mode.as_str() {
            "sheet" => Box::new(SheetStore::new(self.store.base_url.clone())),
            _ => Box::new(CsvStore::new(self.store.csv_dir.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_csv_mode_with_no_setup() {
        let config = AppConfig::default();
        assert_eq!(config.store.mode, "csv");
        assert_eq!(config.store.worksheet, "Sheet1");
        assert_eq!(config.log_level(), LogLevel::Info);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let config = AppConfig::from_toml(
            r#"
            [store]
            mode = "sheet"
            base_url = "https://sheets.example.com/api"
            worksheet = "Hatchery2024"

            [log]
            level = "debug"
            file = "larvalog.log"
            "#,
        )
        .expect("valid config should parse");
        assert_eq!(config.store.mode, "sheet");
        assert_eq!(config.store.worksheet, "Hatchery2024");
        assert_eq!(config.log_level(), LogLevel::Debug);
        assert_eq!(config.log.file.as_deref(), Some("larvalog.log"));
    }

    #[test]
    fn test_partial_config_keeps_defaults_for_missing_fields() {
        let config = AppConfig::from_toml("[store]\nworksheet = \"Trial\"\n").unwrap();
        assert_eq!(config.store.mode, "csv");
        assert_eq!(config.store.worksheet, "Trial");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_mode_is_named_in_the_error() {
        let err = AppConfig::from_toml("[store]\nmode = \"postgres\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(
            msg.contains("store.mode") && msg.contains("postgres"),
            "error should name the field and value, got: {}",
            msg
        );
    }

    #[test]
    fn test_sheet_mode_requires_base_url() {
        let err = AppConfig::from_toml("[store]\nmode = \"sheet\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let err = AppConfig::from_toml("[log]\nlevel = \"verbose\"\n").unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_unknown_keys_are_rejected_not_ignored() {
        // Catches typos like `worskheet` instead of silently using defaults.
        assert!(AppConfig::from_toml("[store]\nworskheet = \"Sheet1\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = AppConfig::load("/nonexistent/larvalog.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
