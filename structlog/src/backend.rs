//! The leveled backend the facade delegates to.
//!
//! The facade itself never writes anywhere: once a call's fields are
//! normalized and rendered it hands the final string, the level, and the
//! extracted error (if any) to a [`Backend`]. Level-enablement checks are a
//! plain passthrough of the backend's own state and gate the whole pipeline.

use std::error::Error;
use std::fmt;

use crate::config;

/// Severity levels understood by the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Error conditions.
    Error,
    /// Potential issues, including the facade's own diagnostics.
    Warn,
    /// General informational messages.
    Info,
    /// Detailed debugging information.
    Debug,
    /// Very detailed debugging information.
    Trace,
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
            Level::Trace => log::Level::Trace,
        }
    }
}

/// A leveled logging backend.
///
/// Implementations receive fully rendered lines; they are not expected to do
/// any structuring of their own.
pub trait Backend {
    /// Whether the backend would emit anything at the given level.
    ///
    /// When this returns `false` the facade skips normalization and
    /// rendering entirely.
    fn enabled(&self, level: Level) -> bool;

    /// Emits one rendered line, with the call's extracted error if any.
    fn log(&self, level: Level, message: &str, error: Option<&(dyn Error + 'static)>);
}

/// Backend delegating to the [`log`] crate under a fixed target.
///
/// The target plays the role of a named logger, so downstream filtering can
/// be configured per module path.
///
/// # Examples
///
/// ```rust
/// use structlog::Logger;
///
/// let log = Logger::new("app::server");
/// ```
#[derive(Clone, Debug)]
pub struct LogBackend {
    target: String,
}

impl LogBackend {
    /// Creates a backend logging under the given target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Backend for LogBackend {
    fn enabled(&self, level: Level) -> bool {
        log::logger().enabled(
            &log::Metadata::builder()
                .level(level.into())
                .target(&self.target)
                .build(),
        )
    }

    fn log(&self, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) {
        // The forwarded error rides on the record as an `error` key-value,
        // where structured `log` sinks can pick it up.
        match error {
            Some(error) => {
                let error_text = error.to_string();
                let pair = ("error", error_text.as_str());
                log::logger().log(
                    &log::Record::builder()
                        .args(format_args!("{message}"))
                        .level(level.into())
                        .target(&self.target)
                        .key_values(&pair)
                        .build(),
                );
            }
            None => {
                log::logger().log(
                    &log::Record::builder()
                        .args(format_args!("{message}"))
                        .level(level.into())
                        .target(&self.target)
                        .build(),
                );
            }
        }
    }
}

/// Sink for the facade's own warn/error diagnostics.
///
/// Malformed input never fails a log call; it degrades to a dropped field
/// plus one diagnostic emitted through this handle, tagged with the library
/// prefix so backends can tell facade noise from application output.
pub struct Diagnostics<'a> {
    backend: &'a dyn Backend,
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Reports a recoverable malformed-input condition at warn level.
    pub fn warn(&self, message: &str) {
        self.backend
            .log(Level::Warn, &format!("{} {message}", config::TAG), None);
    }

    pub(crate) fn error(&self, message: &str) {
        self.backend
            .log(Level::Error, &format!("{} {message}", config::TAG), None);
    }
}
