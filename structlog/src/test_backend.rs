use std::sync::{Arc, Mutex};

use crate::backend::{Backend, Level};

/// A backend for testing that stores every delegated call in memory.
///
/// Captures diagnostics as well as regular lines, so tests can assert on the
/// exact sequence of backend calls a log invocation produced.
#[derive(Debug)]
pub struct TestBackend {
    entries: Arc<Mutex<Vec<TestEntry>>>,
    enabled: bool,
}

/// One captured backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct TestEntry {
    /// Level the call was made at.
    pub level: Level,
    /// The rendered line (or diagnostic message).
    pub message: String,
    /// Display form of the forwarded error, if one was attached.
    pub error: Option<String>,
}

impl TestBackend {
    /// Creates a test backend with all levels enabled, and a handle to the
    /// vector where captured calls are stored.
    pub fn new() -> (Self, Arc<Mutex<Vec<TestEntry>>>) {
        Self::with_enabled(true)
    }

    /// Creates a test backend that reports every level as disabled.
    pub fn disabled() -> (Self, Arc<Mutex<Vec<TestEntry>>>) {
        Self::with_enabled(false)
    }

    fn with_enabled(enabled: bool) -> (Self, Arc<Mutex<Vec<TestEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                entries: entries.clone(),
                enabled,
            },
            entries,
        )
    }
}

impl Backend for TestBackend {
    fn enabled(&self, _level: Level) -> bool {
        self.enabled
    }

    fn log(&self, level: Level, message: &str, error: Option<&(dyn std::error::Error + 'static)>) {
        self.entries.lock().unwrap().push(TestEntry {
            level,
            message: message.to_owned(),
            error: error.map(|error| error.to_string()),
        });
    }
}
