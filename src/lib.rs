#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `sevlog` is a severity-aware logging adapter. Log calls name a level, a
//! message with optional `{key}` placeholders and a context map; each call is
//! rendered into one formatted line and written to a single sink at the
//! verbosity registered for its level. Whether the line is shown is up to
//! the sink.
//!
//! This crate re-exports the two workspace crates that do the work:
//!
//! - [`logging`] owns levels, rendering and dispatch.
//! - [`logging_sink`] defines the [`Sink`] contract, [`Verbosity`] ranks and
//!   the stock [`WriterSink`] and [`MemorySink`].
//!
//! # Examples
//!
//! ```
//! use sevlog::{Dispatcher, Verbosity, WriterSink, context};
//!
//! let sink = WriterSink::with_threshold(Vec::new(), Verbosity::from_verbose_count(2));
//! let mut dispatcher = Dispatcher::new(sink);
//! dispatcher.set_line_template("%2$s: %3$s");
//!
//! dispatcher.info("copied {count} files", context! { "count" => 3 })?;
//! dispatcher.debug("cache statistics", context! {})?;
//!
//! let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
//! assert_eq!(output, "INFO: copied 3 files\n");
//! # Ok::<(), sevlog::LogError>(())
//! ```

pub use logging;
pub use logging_sink;

pub use logging::{
    Context, ContextValue, DEFAULT_DATETIME_TEMPLATE, DEFAULT_LINE_TEMPLATE, Dispatcher,
    EXCEPTION_KEY, Exception, ExceptionLike, LevelRegistry, LineFormatter, LogArgs, LogError,
    LoggerConfig, RawVerbosity, SeverityLevel, SyncDispatcher, TemplateError, VerbosityMap,
    context, interpolate,
};
pub use logging_sink::{LineMode, MemorySink, Sink, SinkEntry, Verbosity, WriterSink};

#[cfg(feature = "tracing")]
pub use logging::{DispatcherLayer, init_tracing, init_tracing_with_filter};
