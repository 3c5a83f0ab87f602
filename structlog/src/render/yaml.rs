use serde_yaml::Mapping;

use crate::backend::Diagnostics;
use crate::config;
use crate::render::{Render, RenderBuilder};
use crate::value::Value;

const MESSAGE_KEY: &str = "message";
const FALLBACK_MESSAGE_KEY: &str = "message1";

/// Renders each call as one YAML block mapping.
///
/// Line-oriented `key: value` output with the `message` entry first. Values
/// are stringified through the configured value renderer; quoting is applied
/// by the YAML encoder where required. A field key colliding with `message`
/// is renamed to `message1` with a diagnostic.
///
/// # Examples
///
/// ```rust
/// use structlog::render::YamlRenderer;
///
/// structlog::config::set_renderer(&YamlRenderer::DEFAULT);
/// # structlog::config::reset();
/// ```
#[derive(Debug, Default)]
pub struct YamlRenderer(());

impl YamlRenderer {
    /// A `const` version of `YamlRenderer::default()` to allow use as a
    /// `&'static`.
    pub const DEFAULT: Self = YamlRenderer(());
}

impl Render for YamlRenderer {
    fn start(&self) -> Box<dyn RenderBuilder> {
        Box::new(YamlBuilder {
            mapping: Mapping::new(),
        })
    }
}

struct YamlBuilder {
    mapping: Mapping,
}

impl RenderBuilder for YamlBuilder {
    fn add_message(&mut self, message: &str) {
        self.mapping.insert(
            serde_yaml::Value::String(MESSAGE_KEY.to_owned()),
            serde_yaml::Value::String(message.to_owned()),
        );
    }

    fn add_field(&mut self, key: &str, value: &Value, diag: &Diagnostics<'_>) {
        let key = if key == MESSAGE_KEY {
            diag.warn(&format!(
                "key `{MESSAGE_KEY}` renamed to `{FALLBACK_MESSAGE_KEY}` to avoid \
                 overriding the message field."
            ));
            FALLBACK_MESSAGE_KEY
        } else {
            key
        };
        self.mapping.insert(
            serde_yaml::Value::String(key.to_owned()),
            serde_yaml::Value::String(config::render_value(value)),
        );
    }

    fn end(self: Box<Self>) -> String {
        serde_yaml::to_string(&serde_yaml::Value::Mapping(self.mapping))
            .unwrap_or_default()
            .trim()
            .to_owned()
    }
}
