#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns structured log calls into formatted lines and hands them
//! to a [`Sink`](logging_sink::Sink) together with a verbosity rank. A call
//! names a severity level (one of the eight built-ins or any custom name),
//! a message that may carry `{key}` placeholders, and a [`Context`] of
//! key/value pairs.
//!
//! # Design
//!
//! - [`LevelRegistry`] maps case-insensitive level names to
//!   [`Verbosity`](logging_sink::Verbosity) ranks. Built-ins are seeded on
//!   construction; custom levels can be added at any time and unknown levels
//!   resolve to `NORMAL`.
//! - [`LineFormatter`] renders a printf-style line template over six slots:
//!   date, level, message, context dump, exception dump and unix timestamp.
//!   ERROR and WARNING lines are wrapped in `<error>` and `<warning>` tags.
//! - [`Dispatcher`] ties both together: it substitutes placeholders with
//!   [`interpolate`], renders the line, resolves the level's rank and writes
//!   to its sink. [`SyncDispatcher`] shares one across threads.
//!
//! # Invariants
//!
//! - Every built-in level has a rank, even after [`LevelRegistry::remove`].
//! - Templates are never validated on assignment; errors surface when a line
//!   is rendered and nothing reaches the sink in that case.
//! - Placeholder substitution is single-pass: substituted values are never
//!   rescanned.
//!
//! # Errors
//!
//! Fallible operations return [`LogError`]. Non-integer verbosities fail with
//! `Verbosity must be an integer`; template problems and sink I/O failures
//! are reported through their own variants. Nothing is logged internally.
//!
//! # Examples
//!
//! ```
//! use logging::{Dispatcher, Exception, context};
//! use logging_sink::{Verbosity, WriterSink};
//!
//! let sink = WriterSink::with_threshold(Vec::new(), Verbosity::VERBOSE);
//! let mut dispatcher = Dispatcher::new(sink);
//! dispatcher.set_line_template("[%2$s] %3$s");
//! dispatcher.set_verbosity("audit", Verbosity::QUIET)?;
//!
//! dispatcher.warning("{count} retries left", context! { "count" => 2 })?;
//! dispatcher.debug("hidden below the threshold", context! {})?;
//! dispatcher.log_at("audit", "login by {user}")?;
//! dispatcher.error(
//!     "sync failed",
//!     context! { "exception" => Exception::new("connection reset") },
//! )?;
//!
//! let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
//! assert_eq!(
//!     output,
//!     "<warning>[WARNING] 2 retries left</warning>\n\
//!      [AUDIT] login by {user}\n\
//!      <error>[ERROR] sync failed</error>\n"
//! );
//! # Ok::<(), logging::LogError>(())
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the sink contract and the stock sinks.
//! - `tracing_bridge` (feature `tracing`) to route `tracing` events through a
//!   [`SyncDispatcher`].

mod config;
mod context;
mod dispatcher;
mod error;
mod exception;
mod formatter;
mod interpolate;
mod levels;
mod registry;
mod sync;
mod template;

#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use config::LoggerConfig;
pub use context::{Context, ContextValue, EXCEPTION_KEY};
pub use dispatcher::{Dispatcher, LogArgs};
pub use error::{LogError, TemplateError};
pub use exception::{Exception, ExceptionLike};
pub use formatter::{
    DEFAULT_DATETIME_TEMPLATE, DEFAULT_LINE_TEMPLATE, LINE_TEMPLATE_SLOTS, LineFormatter,
};
pub use interpolate::interpolate;
pub use levels::{SeverityLevel, canonicalize, registry_key};
pub use registry::{LevelRegistry, RawVerbosity, VerbosityMap};
pub use sync::SyncDispatcher;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{DispatcherLayer, init_tracing, init_tracing_with_filter};
