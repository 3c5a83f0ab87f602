//! The [`Loggable`] capability: objects that describe their own log fields.

use crate::param::Param;

/// Capability allowing an arbitrary object to supply its own field sequence
/// for logging.
///
/// `fields` returns an alternating key/value list using the same grammar as
/// positional call arguments: keys at even indices, values at odd indices.
/// A trailing unpaired element is dropped with a diagnostic, and each key is
/// validated before rendering. Returning `None` is tolerated; the loggable is
/// skipped with a warn diagnostic.
///
/// # Examples
///
/// ```rust
/// use structlog::{Loggable, Param, params};
///
/// struct Request {
///     id: String,
///     attempts: i64,
/// }
///
/// impl Loggable for Request {
///     fn fields(&self) -> Option<Vec<Param>> {
///         Some(params!["requestId", self.id.clone(), "attempts", self.attempts])
///     }
///
///     fn name(&self) -> &str {
///         "Request"
///     }
/// }
/// ```
pub trait Loggable {
    /// Returns the alternating key/value field list for this object.
    fn fields(&self) -> Option<Vec<Param>>;

    /// A short name identifying this loggable in diagnostics.
    fn name(&self) -> &str {
        "loggable"
    }
}

/// A ready-made [`Loggable`] over a stored argument list.
///
/// Useful for binding ad-hoc context without defining a type, and as the
/// carrier for global context supplied as a flat list or a map.
///
/// # Examples
///
/// ```rust
/// use structlog::{GenericLoggable, params};
///
/// let context = GenericLoggable::new(params!["env", "staging", "region", "eu-west-1"]);
/// structlog::config::set_global_context(context);
/// # structlog::config::reset();
/// ```
#[derive(Clone, Debug, Default)]
pub struct GenericLoggable {
    params: Vec<Param>,
}

impl GenericLoggable {
    /// Creates a loggable over the given alternating key/value list.
    pub fn new(params: Vec<Param>) -> Self {
        Self { params }
    }
}

impl Loggable for GenericLoggable {
    fn fields(&self) -> Option<Vec<Param>> {
        Some(self.params.clone())
    }

    fn name(&self) -> &str {
        "GenericLoggable"
    }
}

impl From<Vec<Param>> for GenericLoggable {
    fn from(params: Vec<Param>) -> Self {
        Self::new(params)
    }
}

impl<K, V> From<std::collections::BTreeMap<K, V>> for GenericLoggable
where
    K: Into<String> + Ord,
    V: Into<crate::value::Value>,
{
    fn from(map: std::collections::BTreeMap<K, V>) -> Self {
        let mut params = Vec::with_capacity(map.len() * 2);
        for (key, value) in map {
            params.push(Param::Scalar(crate::value::Value::String(key.into())));
            params.push(Param::Scalar(value.into()));
        }
        Self::new(params)
    }
}
