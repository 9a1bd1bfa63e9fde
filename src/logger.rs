//! Logging back ends.
//!
//! `StderrLogger` reports harness progress to the terminal. `CaptureLogger`
//! is the black-hole appender of the deferred logging strategy: it keeps
//! the last rendered message so the strategy can hand it to the sink.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger writing formatted records to standard error.
///
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        StderrLogger { level }
    }

    /// Install as the global logger.
    ///
    pub fn init(level: LevelFilter) -> Result<(), AppError> {
        log::set_boxed_logger(Box::new(StderrLogger::new(level)))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let stderr = std::io::stderr();
            let mut handle = stderr.lock();
            // Nowhere left to report a failed write to stderr
            let _ = writeln!(handle, "{}", format_log(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Logger that keeps the message of the most recent record.
///
pub struct CaptureLogger {
    level: LevelFilter,
    captured: Mutex<Option<String>>,
}

impl CaptureLogger {
    pub fn new(level: LevelFilter) -> Self {
        CaptureLogger {
            level,
            captured: Mutex::new(None),
        }
    }

    /// Take the last captured message, leaving nothing behind.
    ///
    pub fn take(&self) -> Option<String> {
        match self.captured.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut message = String::new();
            // A message that fails to render is not captured
            if fmt::write(&mut message, *record.args()).is_err() {
                return;
            }
            match self.captured.lock() {
                Ok(mut guard) => *guard = Some(message),
                Err(poisoned) => *poisoned.into_inner() = Some(message),
            }
        }
    }

    fn flush(&self) {
        // No-op
    }
}
