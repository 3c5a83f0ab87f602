//! Pluggable output formats.
//!
//! A renderer turns one log call (message plus ordered fields) into the
//! final line handed to the backend. The contract is split in two: a
//! [`Render`] singleton shared by all loggers, and a [`RenderBuilder`]
//! created fresh for every call so no scratch state is ever shared between
//! calls or threads.
//!
//! # Built-in renderers
//!
//! - [`KeyValueRenderer`] - `message, k1=v1, k2=v2` lines (the default)
//! - [`JsonRenderer`] - one JSON object per call
//! - [`YamlRenderer`] - one YAML block mapping per call
//!
//! # Custom renderers
//!
//! ```rust
//! use structlog::render::{Render, RenderBuilder};
//! use structlog::{Diagnostics, Value};
//!
//! #[derive(Debug)]
//! struct TabSeparated;
//!
//! struct TabSeparatedBuilder(String);
//!
//! impl Render for TabSeparated {
//!     fn start(&self) -> Box<dyn RenderBuilder> {
//!         Box::new(TabSeparatedBuilder(String::new()))
//!     }
//! }
//!
//! impl RenderBuilder for TabSeparatedBuilder {
//!     fn add_message(&mut self, message: &str) {
//!         self.0.push_str(message);
//!     }
//!
//!     fn add_field(&mut self, key: &str, value: &Value, _diag: &Diagnostics<'_>) {
//!         self.0.push('\t');
//!         self.0.push_str(key);
//!         self.0.push('=');
//!         self.0.push_str(&value.to_string());
//!     }
//!
//!     fn end(self: Box<Self>) -> String {
//!         self.0
//!     }
//! }
//!
//! static TAB_SEPARATED: TabSeparated = TabSeparated;
//! structlog::config::set_renderer(&TAB_SEPARATED);
//! # structlog::config::reset();
//! ```

mod json;
mod key_value;
mod yaml;

use std::fmt::Debug;

pub use json::JsonRenderer;
pub use key_value::KeyValueRenderer;
pub use yaml::YamlRenderer;

use crate::backend::Diagnostics;
use crate::value::Value;

/// A pluggable formatter converting a message and field sequence into the
/// final log line.
pub trait Render: Debug {
    /// Starts rendering one log call.
    ///
    /// The returned builder belongs to that call alone and is discarded by
    /// [`RenderBuilder::end`].
    fn start(&self) -> Box<dyn RenderBuilder>;
}

/// Per-call accumulator created by [`Render::start`].
pub trait RenderBuilder {
    /// Adds the log message. Called exactly once, before any field.
    fn add_message(&mut self, message: &str);

    /// Adds one key/value field.
    ///
    /// Never fails: a key colliding with a renderer-reserved name is renamed
    /// with a diagnostic, and unrepresentable values fall back to their
    /// string form.
    fn add_field(&mut self, key: &str, value: &Value, diag: &Diagnostics<'_>);

    /// Finishes the call and returns the rendered line.
    fn end(self: Box<Self>) -> String;
}
