//! Convenience macro for building argument lists.

/// Builds a `Vec<`[`Param`][crate::Param]`>` from a heterogeneous argument
/// list.
///
/// Each element is converted through `Param::from`, so scalars, maps and
/// already-constructed params mix freely.
///
/// # Examples
///
/// ```rust
/// use structlog::{Param, params};
///
/// let empty: Vec<Param> = params![];
/// let flat = params!["port", 8080, "ready", true];
/// let failed = params![Param::error(std::io::Error::other("boom"))];
/// ```
#[macro_export]
macro_rules! params {
    ($($param:expr),* $(,)?) => {
        ::std::vec![$($crate::Param::from($param)),*]
    };
}
