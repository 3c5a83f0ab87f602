//! Process-wide configuration.
//!
//! Mirrors the settings every [`Logger`][crate::Logger] instance shares: the
//! renderer, the global context supplier, the value-rendering function, and
//! the key-value separator.
//!
//! # Set once, early
//!
//! The configuration is expected to be written exactly once, at startup,
//! before concurrent logging begins. The interior lock only prevents data
//! races; it does not make mid-flight reconfiguration meaningful for calls
//! already in progress.
//!
//! # Examples
//!
//! ```rust
//! use structlog::GenericLoggable;
//! use structlog::render::JsonRenderer;
//! use structlog::params;
//!
//! structlog::config::set_renderer(&JsonRenderer::DEFAULT);
//! structlog::config::set_global_context(GenericLoggable::new(params![
//!     "service", "billing",
//!     "env", "production",
//! ]));
//! # structlog::config::reset();
//! ```

use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::backend::Diagnostics;
use crate::loggable::Loggable;
use crate::normalize;
use crate::render::{KeyValueRenderer, Render};
use crate::value::{Field, Value};

/// Prefix identifying diagnostics originating inside the facade.
pub(crate) const TAG: &str = "[structlog] :";

/// The function some renderers use to stringify field values.
pub type ValueRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

struct Config {
    renderer: &'static (dyn Render + Sync),
    context_supplier: Option<Arc<dyn Loggable + Send + Sync>>,
    value_renderer: ValueRenderer,
    separator: String,
}

impl Config {
    fn new() -> Self {
        Self {
            renderer: &KeyValueRenderer::DEFAULT,
            context_supplier: None,
            value_renderer: Arc::new(|value| value.to_string()),
            separator: ",".to_owned(),
        }
    }
}

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::new()));

fn read() -> RwLockReadGuard<'static, Config> {
    CONFIG.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Config> {
    CONFIG.write().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the renderer used by every logger instance.
///
/// The default is the key-value renderer.
pub fn set_renderer(renderer: &'static (dyn Render + Sync)) {
    write().renderer = renderer;
}

/// Returns the configured renderer.
pub fn renderer() -> &'static (dyn Render + Sync) {
    read().renderer
}

/// Sets the global context supplier, invoked on every log call.
///
/// Fields produced by the supplier are appended to every line from every
/// logger instance and take precedence over call-site and instance-bound
/// fields sharing the same key.
pub fn set_global_context(supplier: impl Loggable + Send + Sync + 'static) {
    write().context_supplier = Some(Arc::new(supplier));
}

/// Returns the global context supplier, if one is set.
pub fn global_context() -> Option<Arc<dyn Loggable + Send + Sync>> {
    read().context_supplier.clone()
}

/// Removes the global context supplier.
pub fn clear_global_context() {
    write().context_supplier = None;
}

/// Sets the function some renderers use to stringify field values.
///
/// The default renders scalars through their `Display` form and nulls as
/// `null`.
pub fn set_value_renderer(renderer: impl Fn(&Value) -> String + Send + Sync + 'static) {
    write().value_renderer = Arc::new(renderer);
}

/// Returns the configured value-rendering function.
pub fn value_renderer() -> ValueRenderer {
    Arc::clone(&read().value_renderer)
}

/// Sets the string the key-value renderer places between entries.
///
/// The default is `","`.
pub fn set_separator(separator: impl Into<String>) {
    write().separator = separator.into();
}

/// Returns the configured key-value separator.
pub fn separator() -> String {
    read().separator.clone()
}

/// Restores every setting to its default.
///
/// Primarily for tests; production code is expected to configure once and
/// never look back.
pub fn reset() {
    *write() = Config::new();
}

pub(crate) fn render_value(value: &Value) -> String {
    (*read().value_renderer)(value)
}

/// Expands the global context supplier into fields, if one is set.
pub(crate) fn expand_global_context(diag: &Diagnostics<'_>) -> Vec<Field> {
    let config = read();
    match &config.context_supplier {
        Some(supplier) => normalize::expand_loggable(supplier.as_ref(), diag),
        None => Vec::new(),
    }
}
