#![deny(missing_docs)]
//! Shared logging utilities for the uploader workspace.
//!
//! This crate provides the `upload_*` logging macros used across the codebase,
//! the run logger used by the binary, and a minimal test initializer.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! upload_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! upload_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! upload_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! upload_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! upload_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to a timestamped file inside the log directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the run logger.
///
/// File output goes to `{log_dir}/{YYYYMMDD-HHMMSS}.log`; one file per run.
/// Returns the log file path when a file logger was installed. If the file
/// cannot be created, logging falls back to the terminal.
pub fn initialize(destination: LogDestination, log_dir: &Path) -> Option<PathBuf> {
    let level = LevelFilter::Info;
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut log_path = None;

    if matches!(destination, LogDestination::File | LogDestination::Both) {
        let path = log_file_path(log_dir, &chrono::Local::now());
        if let Some(file_logger) = create_file_logger(level, config.clone(), &path) {
            loggers.push(file_logger);
            log_path = Some(path);
        }
    }

    if destination != LogDestination::File || loggers.is_empty() {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
    log_path
}

/// Builds the per-run log file path from a timestamp.
pub fn log_file_path<Tz>(log_dir: &Path, now: &chrono::DateTime<Tz>) -> PathBuf
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    log_dir.join(format!("{}.log", now.format("%Y%m%d-%H%M%S")))
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, err);
            return None;
        }
    }
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
