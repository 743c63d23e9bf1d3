#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` defines the boundary between the sevlog dispatcher and
//! whatever ultimately displays a log line. The dispatcher renders a line,
//! resolves a [`Verbosity`] rank for it, and hands both to a [`Sink`] together
//! with a [`LineMode`]. The sink alone decides whether the line is shown.
//!
//! # Design
//!
//! - [`Verbosity`] is an ordinal rank: `quiet < normal < verbose <
//!   very-verbose < debug`, with arbitrary integers allowed in between.
//! - [`WriterSink`] is the stock implementation: it streams into any
//!   [`std::io::Write`] and drops lines ranked above its threshold.
//! - [`MemorySink`] keeps every line it receives, which makes it the sink of
//!   choice for tests.
//!
//! # Errors
//!
//! Sinks surface [`std::io::Error`] values from their writers. Nothing is
//! retried; the dispatcher forwards the error to its caller.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LineMode, Sink, Verbosity, WriterSink};
//!
//! let mut sink = WriterSink::with_threshold(Vec::new(), Verbosity::from_verbose_count(1));
//! sink.write("[WARN] disk almost full", LineMode::WithNewline, Verbosity::VERBOSE)?;
//! sink.write("[DEBUG] cache hit", LineMode::WithNewline, Verbosity::DEBUG)?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "[WARN] disk almost full\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod line_mode;
mod sink;
mod verbosity;

pub use line_mode::LineMode;
pub use sink::{MemorySink, Sink, SinkEntry, WriterSink};
pub use verbosity::{ParseVerbosityError, Verbosity};
