use std::fmt::Write;

use crate::backend::Diagnostics;
use crate::config;
use crate::render::{Render, RenderBuilder};
use crate::value::Value;

/// The default renderer: `message, k1=v1, k2=v2` lines.
///
/// The inter-field separator comes from
/// [`config::set_separator`][crate::config::set_separator]. Values are
/// stringified through the configured value renderer and quoted only when
/// they contain a space, with embedded `"` escaped.
///
/// # Examples
///
/// ```rust
/// use structlog::render::KeyValueRenderer;
///
/// structlog::config::set_renderer(&KeyValueRenderer::DEFAULT);
/// # structlog::config::reset();
/// ```
#[derive(Debug, Default)]
pub struct KeyValueRenderer(());

impl KeyValueRenderer {
    /// A `const` version of `KeyValueRenderer::default()` to allow use as a
    /// `&'static`.
    pub const DEFAULT: Self = KeyValueRenderer(());
}

impl Render for KeyValueRenderer {
    fn start(&self) -> Box<dyn RenderBuilder> {
        Box::new(KeyValueBuilder {
            line: String::new(),
            separator: config::separator(),
        })
    }
}

struct KeyValueBuilder {
    line: String,
    separator: String,
}

impl RenderBuilder for KeyValueBuilder {
    fn add_message(&mut self, message: &str) {
        self.line.push_str(message);
    }

    fn add_field(&mut self, key: &str, value: &Value, _diag: &Diagnostics<'_>) {
        write!(self.line, "{} {key}=", self.separator).unwrap();
        let rendered = config::render_value(value).replace('"', "\\\"");
        if rendered.contains(' ') {
            write!(self.line, "\"{rendered}\"").unwrap();
        } else {
            self.line.push_str(&rendered);
        }
    }

    fn end(self: Box<Self>) -> String {
        self.line
    }
}
