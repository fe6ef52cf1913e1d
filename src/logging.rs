/// Structured logging for the data-entry service
///
/// Provides context-rich logging with store/worksheet identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for unattended terminals.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl LogLevel {
    /// Parses a config-file level name.
    pub fn parse(name: &str) -> Option<LogLevel> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Log Sources
// ---------------------------------------------------------------------------

/// Which subsystem produced a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The remote worksheet service store.
    Sheet,
    /// The local CSV file store.
    CsvFile,
    /// The dashboard session loop.
    Ui,
    /// Startup, config, everything else.
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Sheet => write!(f, "SHEET"),
            Source::CsvFile => write!(f, "CSV"),
            Source::Ui => write!(f, "UI"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger {
            min_level,
            log_file,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: &Source, worksheet: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let sheet_part = worksheet.map(|w| format!(" [{}]", w)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, sheet_part, message
        );

        // Console output
        match level {
            LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, sheet_part, message),
            LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, sheet_part, message),
            LogLevel::Info => println!("   {}", message),
            LogLevel::Debug => println!("   [DEBUG] {}", message),
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message
pub fn info(source: Source, worksheet: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, &source, worksheet, message);
    }
}

/// Log a warning message
pub fn warn(source: Source, worksheet: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, &source, worksheet, message);
    }
}

/// Log an error message
pub fn error(source: Source, worksheet: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, &source, worksheet, message);
    }
}

/// Log a debug message
pub fn debug(source: Source, worksheet: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, &source, worksheet, message);
    }
}

// ---------------------------------------------------------------------------
// Store Failure Logging
// ---------------------------------------------------------------------------

/// Log a store failure at the level its kind warrants: malformed rows are
/// skipped data (warning), everything else blocks the operator (error).
pub fn log_store_failure(
    source: Source,
    worksheet: &str,
    operation: &str,
    err: &crate::model::StoreError,
) {
    use crate::model::StoreError;

    let message = format!("{} failed: {}", operation, err);
    match err {
        StoreError::MalformedRow { .. } => warn(source, Some(worksheet), &message),
        StoreError::ReadFailed(_)
        | StoreError::WriteFailed(_)
        | StoreError::SchemaMismatch { .. } => error(source, Some(worksheet), &message),
    }
}
