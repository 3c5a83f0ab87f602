//! # `structlog`
//!
//! A structured-logging facade over a leveled backend.
//!
//! Logging calls take a message plus a loosely structured argument list:
//! flat key/value pairs, maps, objects exposing their own fields, and
//! errors. The facade normalizes those arguments into an ordered field
//! sequence, merges in instance-bound and global context with defined
//! precedence, renders the result through a pluggable formatter, and hands
//! the final line to the backend (the [`log`] crate by default).
//!
//! Malformed input never fails a call: invalid keys, unpaired values and
//! similar problems degrade to dropped fields plus warn-level diagnostics,
//! and the pipeline as a whole can never crash the caller.
//!
//! ## Basic usage
//!
//! ```rust
//! use structlog::{Logger, params};
//!
//! let log = Logger::new("app::server");
//! log.info("server started", params!["port", 8080, "version", "1.0.0"]);
//! ```
//!
//! ## Context
//!
//! Context bound to a logger instance is rendered after call-site fields on
//! every subsequent call; global context is rendered last and wins key
//! collisions:
//!
//! ```rust
//! use structlog::{GenericLoggable, Logger, params};
//!
//! structlog::config::set_global_context(GenericLoggable::new(params![
//!     "service", "billing",
//! ]));
//!
//! let mut log = Logger::new("app::orders");
//! log.bind(params!["orderId", "o-193"]);
//! log.info("order accepted", params!["items", 3]);
//! // => "order accepted, items=3, orderId=o-193, service=billing"
//! # structlog::config::reset();
//! ```
//!
//! ## Output formats
//!
//! The renderer is configured process-wide; key-value lines are the
//! default, JSON and YAML renderers ship in [`render`], and custom formats
//! implement the [`render::Render`] contract.

mod backend;
pub mod config;
mod loggable;
mod logger;
mod macros;
mod normalize;
mod param;
pub mod render;
mod test_backend;
mod value;

pub use backend::{Backend, Diagnostics, Level, LogBackend};
pub use loggable::{GenericLoggable, Loggable};
pub use logger::Logger;
pub use param::Param;
#[doc(hidden)]
pub use test_backend::{TestBackend, TestEntry};
pub use value::{Field, Value};
