//! The argument grammar of logging and context calls.
//!
//! Every variadic argument passed to the facade is one [`Param`]: a scalar
//! (candidate key or value), a mapping, an object exposing its own fields, or
//! an error payload. Classifying arguments into this closed set up front is
//! what lets the normalizer dispatch on a tag instead of probing runtime
//! types mid-scan.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::loggable::Loggable;
use crate::value::Value;

/// A single argument to a logging or context call.
///
/// Scalars are usually created through `From` conversions (directly or via
/// the [`params!`][crate::params] macro); maps convert from the standard map
/// types; loggables and errors have explicit constructors.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use structlog::{Param, params};
///
/// let flat = params!["port", 8080, "host", "localhost"];
///
/// let mut map = BTreeMap::new();
/// map.insert("env", "staging");
/// let mapped = params![map];
///
/// let error = std::io::Error::other("disk full");
/// let failed = params![Param::error(error)];
/// ```
#[derive(Clone)]
pub enum Param {
    /// A plain scalar: a candidate key or a value, depending on position.
    Scalar(Value),
    /// A mapping expanded into one field per entry.
    Map(Vec<(String, Value)>),
    /// An object supplying its own alternating key/value field list.
    Loggable(Arc<dyn Loggable + Send + Sync>),
    /// An error payload, extracted and forwarded to the backend.
    Error(Arc<dyn Error + Send + Sync>),
}

impl Param {
    /// Wraps an error so it can be passed as a log argument.
    ///
    /// The first error in a call is forwarded to the backend alongside the
    /// rendered line; every error argument additionally contributes an
    /// `errorMessage` field carrying its root-cause message.
    pub fn error(error: impl Error + Send + Sync + 'static) -> Self {
        Param::Error(Arc::new(error))
    }

    /// Wraps a [`Loggable`] so it can be passed as a log argument.
    pub fn loggable(loggable: impl Loggable + Send + Sync + 'static) -> Self {
        Param::Loggable(Arc::new(loggable))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Param::Scalar(value) => value.kind(),
            Param::Map(_) => "map",
            Param::Loggable(_) => "loggable",
            Param::Error(_) => "error",
        }
    }

    /// Converts a param consumed in a value slot into a renderable value.
    ///
    /// Non-scalar params fall back to their string form.
    pub(crate) fn into_value(self) -> Value {
        match self {
            Param::Scalar(value) => value,
            Param::Map(_) => Value::String(self.to_string()),
            Param::Loggable(loggable) => Value::String(loggable.name().to_owned()),
            Param::Error(error) => Value::String(error.to_string()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Scalar(value) => write!(f, "{value}"),
            Param::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Param::Loggable(loggable) => f.write_str(loggable.name()),
            Param::Error(error) => write!(f, "{error}"),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Param::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Param::Loggable(loggable) => f.debug_tuple("Loggable").field(&loggable.name()).finish(),
            Param::Error(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Scalar(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Scalar(value.into())
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Scalar(value.into())
    }
}

impl<K, V> From<BTreeMap<K, V>> for Param
where
    K: Into<String> + Ord,
    V: Into<Value>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        Param::Map(
            map.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> From<HashMap<K, V>> for Param
where
    K: Into<String> + Eq + Hash,
    V: Into<Value>,
{
    fn from(map: HashMap<K, V>) -> Self {
        Param::Map(
            map.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::Param;
    use crate::value::Value;

    #[test]
    fn map_param_displays_like_a_map() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(Param::from(map).to_string(), "{a=1, b=2}");
    }

    #[test]
    fn value_slot_conversion_stringifies_errors() {
        let param = Param::error(std::io::Error::other("disk full"));

        assert_eq!(param.into_value(), Value::String("disk full".to_owned()));
    }
}
