use super::{FormatError, FormatStrategy, LazyMessage};
use crate::args::ArgValue;
use crate::logger::CaptureLogger;
use crate::pattern::Variant;
use log::{Level, LevelFilter, Log, Metadata, Record};

const LOG_TARGET: &str = "messageformat_bench::deferred";

/// Logging-style formatting.
///
/// The record carries the pattern and its arguments unformatted. The
/// positional message is rendered once, by the capturing appender, and only
/// when it accepts a record of the configured level.
///
pub struct DeferredLogStrategy {
    logger: CaptureLogger,
    level: Level,
}

impl DeferredLogStrategy {
    /// Logs at `Error` into an appender that accepts everything.
    ///
    pub fn new() -> Self {
        DeferredLogStrategy::with_levels(Level::Error, LevelFilter::Trace)
    }

    /// Logs at `level` into an appender with threshold `threshold`.
    ///
    pub fn with_levels(level: Level, threshold: LevelFilter) -> Self {
        DeferredLogStrategy {
            logger: CaptureLogger::new(threshold),
            level,
        }
    }
}

impl Default for DeferredLogStrategy {
    fn default() -> Self {
        DeferredLogStrategy::new()
    }
}

impl FormatStrategy for DeferredLogStrategy {
    fn name(&self) -> &'static str {
        "deferred_log"
    }

    fn variant(&self) -> Variant {
        Variant::Canonical
    }

    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
        let metadata = Metadata::builder()
            .level(self.level)
            .target(LOG_TARGET)
            .build();
        if !self.logger.enabled(&metadata) {
            return Ok(String::new());
        }

        let message = LazyMessage::new(syntax, args);
        self.logger.log(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(self.level)
                .target(LOG_TARGET)
                .build(),
        );
        if let Some(e) = message.take_error() {
            return Err(e);
        }
        Ok(self.logger.take().unwrap_or_default())
    }
}
