//! Logger Module
//!
//! Pluggable diagnostics sink for the store.
//!
//! The store only reports a handful of events (mostly at open time), so the
//! seam is deliberately tiny: one `log` method plus a convenience method per
//! level. Messages arrive as `fmt::Arguments`, built with `format_args!`.
//!
//! The default [`ConsoleLogger`] forwards into `tracing`, so whatever
//! subscriber the host installed decides where the output ends up.

use std::fmt;

/// Severity of a log message, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

/// Receives leveled diagnostic messages
///
/// Implementations must not panic; a failure to log is never reported back
/// to the store.
pub trait Logger: Send + Sync {
    /// Emit one message at the given level
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args)
    }
}

/// Logger that forwards to `tracing`, dropping anything below `max_level`
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    max_level: Level,
}

impl ConsoleLogger {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }

    /// Most verbose level this logger lets through
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Whether a message at `level` would be forwarded
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        match level {
            Level::Fatal => tracing::error!(fatal = true, "{}", args),
            Level::Error => tracing::error!("{}", args),
            Level::Warn => tracing::warn!("{}", args),
            Level::Info => tracing::info!("{}", args),
            Level::Debug => tracing::debug!("{}", args),
            Level::Trace => tracing::trace!("{}", args),
        }
    }
}

/// Logger that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}
