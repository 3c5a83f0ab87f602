//! The logger facade: per-call orchestration and instance-bound context.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;

use crate::backend::{Backend, Diagnostics, Level, LogBackend};
use crate::config;
use crate::normalize::{self, ExtractedError, Normalized};
use crate::param::Param;
use crate::value::Value;

/// Structured-logging facade over a leveled [`Backend`].
///
/// Each logging call normalizes its arguments into ordered fields, merges in
/// instance-bound and global context, renders the result through the
/// configured renderer, and delegates exactly one call to the backend. When
/// the backend reports the level disabled, none of that work happens.
///
/// A logger instance owns its bound context exclusively; it is not
/// internally synchronized, so concurrent use of one instance must be
/// serialized by the caller (or use one instance per thread/request).
///
/// # Examples
///
/// ```rust
/// use structlog::{Logger, params};
///
/// let mut log = Logger::new("app::orders");
/// log.bind(params!["orderId", "o-193"]);
/// log.info("order accepted", params!["items", 3]);
/// ```
#[derive(Debug)]
pub struct Logger<B = LogBackend> {
    backend: B,
    bound: IndexMap<String, Value>,
}

impl Logger<LogBackend> {
    /// Creates a facade delegating to the [`log`] crate under the given
    /// target.
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_backend(LogBackend::new(target))
    }
}

impl<B: Backend> Logger<B> {
    /// Creates a facade over a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            bound: IndexMap::new(),
        }
    }

    /// Logs a message at the error level.
    pub fn error(&self, message: &str, params: Vec<Param>) {
        self.log(Level::Error, message, params);
    }

    /// Logs a message at the warn level.
    pub fn warn(&self, message: &str, params: Vec<Param>) {
        self.log(Level::Warn, message, params);
    }

    /// Logs a message at the info level.
    pub fn info(&self, message: &str, params: Vec<Param>) {
        self.log(Level::Info, message, params);
    }

    /// Logs a message at the debug level.
    pub fn debug(&self, message: &str, params: Vec<Param>) {
        self.log(Level::Debug, message, params);
    }

    /// Logs a message at the trace level.
    pub fn trace(&self, message: &str, params: Vec<Param>) {
        self.log(Level::Trace, message, params);
    }

    /// Whether the backend emits at the error level.
    pub fn is_error_enabled(&self) -> bool {
        self.backend.enabled(Level::Error)
    }

    /// Whether the backend emits at the warn level.
    pub fn is_warn_enabled(&self) -> bool {
        self.backend.enabled(Level::Warn)
    }

    /// Whether the backend emits at the info level.
    pub fn is_info_enabled(&self) -> bool {
        self.backend.enabled(Level::Info)
    }

    /// Whether the backend emits at the debug level.
    pub fn is_debug_enabled(&self) -> bool {
        self.backend.enabled(Level::Debug)
    }

    /// Whether the backend emits at the trace level.
    pub fn is_trace_enabled(&self) -> bool {
        self.backend.enabled(Level::Trace)
    }

    /// Replaces the instance-bound context wholesale.
    ///
    /// The arguments follow the same grammar as logging calls, minus error
    /// extraction. Duplicate keys within one call resolve last-write-wins;
    /// keys present in the global context are dropped with a diagnostic.
    pub fn new_bind(&mut self, params: Vec<Param>) {
        self.bound.clear();
        self.bind(params);
    }

    /// Merges the given context onto the instance-bound context.
    ///
    /// Behaves as [`new_bind`][Self::new_bind] when no context is bound yet.
    pub fn bind(&mut self, params: Vec<Param>) {
        let diag = Diagnostics::new(&self.backend);
        let global = config::expand_global_context(&diag);
        let Normalized { fields, .. } = normalize::normalize(&params, &global, &diag, false);
        for field in fields {
            self.bound.insert(field.key, field.value);
        }
    }

    /// Removes entries from the instance-bound context.
    ///
    /// An entry is removed only when both key and value match; a key-only
    /// match is left in place.
    pub fn unbind(&mut self, params: Vec<Param>) {
        let diag = Diagnostics::new(&self.backend);
        let Normalized { fields, .. } = normalize::normalize(&params, &[], &diag, false);
        for field in fields {
            if self.bound.get(&field.key) == Some(&field.value) {
                self.bound.shift_remove(&field.key);
            }
        }
    }

    fn log(&self, level: Level, message: &str, params: Vec<Param>) {
        if !self.backend.enabled(level) {
            return;
        }

        let diag = Diagnostics::new(&self.backend);
        // Logging must never crash the caller: anything unexpected inside
        // the pipeline is swallowed and reported as a single diagnostic.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let (line, error) = self.assemble(message, &params, &diag);
            let error_ref: Option<&(dyn Error + 'static)> = match &error {
                Some(cause) => Some(cause.as_ref()),
                None => None,
            };
            self.backend.log(level, &line, error_ref);
        }));
        if let Err(payload) = outcome {
            diag.error(&format!(
                "unexpected logger error `{}`.",
                panic_message(payload.as_ref()),
            ));
        }
    }

    fn assemble(
        &self,
        message: &str,
        params: &[Param],
        diag: &Diagnostics<'_>,
    ) -> (String, Option<ExtractedError>) {
        let mut builder = config::renderer().start();
        builder.add_message(message);

        let global = config::expand_global_context(diag);
        let Normalized { fields, error } = normalize::normalize(params, &global, diag, true);
        for field in &fields {
            builder.add_field(&field.key, &field.value, diag);
        }
        for (key, value) in &self.bound {
            // Global context may have gained this key after it was bound.
            match global.iter().find(|field| field.key == *key) {
                Some(winner) => diag.warn(&format!(
                    "key `{key}` ignored because it exists in the global context with \
                     value `{}` which takes precedence.",
                    winner.value,
                )),
                None => builder.add_field(key, value, diag),
            }
        }
        for field in &global {
            builder.add_field(&field.key, &field.value, diag);
        }
        (builder.end(), error)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "panic payload of unknown type"
    }
}
