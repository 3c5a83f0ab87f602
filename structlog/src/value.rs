//! Field and value types for structured log output.
//!
//! A log line is a message followed by an ordered sequence of [`Field`]s.
//! Each field carries a [`Value`], a closed set of scalar types so that
//! renderers with typed output (JSON) can preserve numbers, booleans and
//! nulls natively instead of stringifying everything.
//!
//! # Examples
//!
//! ```rust
//! use structlog::{Field, Value};
//!
//! let port = Field::new("port", 8080);
//! let host = Field::new("host", "localhost");
//! let ready = Field::new("ready", true);
//! let load = Field::new("load", 0.75);
//! ```

use std::fmt;

/// A scalar value carried by one structured-log field.
///
/// # Examples
///
/// ```rust
/// use structlog::Value;
///
/// let text = Value::String("hello".into());
/// let number = Value::I64(42);
/// let flag = Value::Bool(true);
/// let rating = Value::F64(4.5);
/// let missing = Value::Null;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A text value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    I64(i64),
    /// A 64-bit floating-point number.
    F64(f64),
    /// An explicit null, preserved as-is by renderers that can express one.
    Null,
}

impl Value {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::I64(_) => "i64",
            Value::F64(_) => "f64",
            Value::Null => "null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Strings print raw; the renderer decides whether quoting is needed.
            Value::String(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::F64(value) => write!(f, "{value}"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::I64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

/// One key/value pair destined for structured output.
///
/// Keys must be non-empty and whitespace-free to survive validation; a field
/// with an invalid key is dropped with a diagnostic before rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// The field key.
    pub key: String,
    /// The field value.
    pub value: Value,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structlog::Field;
    ///
    /// let attempts = Field::new("attempts", 3);
    /// ```
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
