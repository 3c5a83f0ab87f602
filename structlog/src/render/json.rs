use serde_json::Map;

use crate::backend::Diagnostics;
use crate::render::{Render, RenderBuilder};
use crate::value::Value;

const MESSAGE_KEY: &str = "message";
const CUSTOM_MESSAGE_KEY: &str = "custom_message";

/// Renders each call as one JSON object.
///
/// The object starts with a `message` entry followed by one entry per field
/// in render order. Scalar types are preserved natively and nulls stay
/// explicit nulls. A field key colliding with `message` is renamed to
/// `custom_message` with a diagnostic.
///
/// # Examples
///
/// ```rust
/// use structlog::render::JsonRenderer;
///
/// structlog::config::set_renderer(&JsonRenderer::DEFAULT);
/// # structlog::config::reset();
/// ```
#[derive(Debug, Default)]
pub struct JsonRenderer(());

impl JsonRenderer {
    /// A `const` version of `JsonRenderer::default()` to allow use as a
    /// `&'static`.
    pub const DEFAULT: Self = JsonRenderer(());
}

impl Render for JsonRenderer {
    fn start(&self) -> Box<dyn RenderBuilder> {
        Box::new(JsonBuilder { object: Map::new() })
    }
}

struct JsonBuilder {
    object: Map<String, serde_json::Value>,
}

impl RenderBuilder for JsonBuilder {
    fn add_message(&mut self, message: &str) {
        self.object.insert(
            MESSAGE_KEY.to_owned(),
            serde_json::Value::String(message.to_owned()),
        );
    }

    fn add_field(&mut self, key: &str, value: &Value, diag: &Diagnostics<'_>) {
        let key = if key == MESSAGE_KEY {
            diag.warn(&format!(
                "key `{MESSAGE_KEY}` renamed to `{CUSTOM_MESSAGE_KEY}` to avoid \
                 overriding the message field."
            ));
            CUSTOM_MESSAGE_KEY
        } else {
            key
        };
        self.object.insert(key.to_owned(), json_value(value));
    }

    fn end(self: Box<Self>) -> String {
        serde_json::Value::Object(self.object).to_string()
    }
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::String(value) => serde_json::Value::String(value.clone()),
        Value::Bool(value) => serde_json::Value::Bool(*value),
        Value::I64(value) => serde_json::Value::Number((*value).into()),
        Value::F64(value) => match serde_json::Number::from_f64(*value) {
            Some(number) => serde_json::Value::Number(number),
            // Non-finite numbers have no JSON form.
            None => serde_json::Value::String(value.to_string()),
        },
        Value::Null => serde_json::Value::Null,
    }
}
