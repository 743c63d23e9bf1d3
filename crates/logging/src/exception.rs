//! crates/logging/src/exception.rs
//! Exception-like values carried under the reserved context key.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

/// Capability shared by values the formatter renders into the exception slot.
///
/// Anything with a message and a stack trace qualifies. Plain strings and
/// maps stored under the reserved key do not.
pub trait ExceptionLike: Send + Sync {
    /// Short name of the exception's type.
    fn kind(&self) -> &str;

    /// Human-readable description.
    fn message(&self) -> &str;

    /// Stack frames, innermost first. May be empty when no trace was captured.
    fn stack_trace(&self) -> &[String];

    /// The exception that caused this one, if any.
    fn previous(&self) -> Option<&dyn ExceptionLike> {
        None
    }
}

/// Owned exception record.
///
/// # Examples
///
/// ```
/// use logging::{Exception, ExceptionLike};
///
/// let cause = Exception::new("connection reset").with_kind("IoError");
/// let error = Exception::new("sync failed").with_previous(cause);
///
/// assert_eq!(error.kind(), "Exception");
/// assert_eq!(error.previous().map(|e| e.message()), Some("connection reset"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Exception {
    kind: String,
    message: String,
    trace: Vec<String>,
    previous: Option<Box<Exception>>,
}

impl Exception {
    /// Creates an exception of kind `Exception` with an empty trace.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: String::from("Exception"),
            message: message.into(),
            trace: Vec::new(),
            previous: None,
        }
    }

    /// Creates an exception and records the current stack.
    ///
    /// The trace is captured unconditionally, regardless of `RUST_BACKTRACE`.
    #[must_use]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::new(message).with_trace(backtrace_frames(&Backtrace::force_capture()))
    }

    /// Converts an error and its `source()` chain into nested exceptions.
    ///
    /// The outermost exception is named after `E` and carries a backtrace when
    /// backtraces are enabled for the process; causes are recorded as
    /// `previous` links of kind `Error`.
    #[must_use]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(Self::new(cause.to_string()).with_kind("Error"));
            source = cause.source();
        }

        let previous = causes.into_iter().rev().fold(None, |inner, mut cause: Self| {
            cause.previous = inner.map(Box::new);
            Some(cause)
        });

        let mut exception = Self::new(error.to_string())
            .with_kind(short_type_name(std::any::type_name::<E>()))
            .with_trace(backtrace_frames(&Backtrace::capture()));
        exception.previous = previous.map(Box::new);
        exception
    }

    /// Replaces the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Replaces the stack trace.
    #[must_use]
    pub fn with_trace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trace = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches the exception that caused this one.
    #[must_use]
    pub fn with_previous(mut self, previous: Self) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }
}

impl ExceptionLike for Exception {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn stack_trace(&self) -> &[String] {
        &self.trace
    }

    fn previous(&self) -> Option<&dyn ExceptionLike> {
        self.previous.as_deref().map(|previous| previous as &dyn ExceptionLike)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Structural rendering of an exception-like value.
///
/// Always opens with `Exception {` so an exception reads differently from a
/// plain map in a dump, whatever its concrete type.
pub(crate) struct ExceptionDump<'a>(pub(crate) &'a dyn ExceptionLike);

impl fmt::Debug for ExceptionDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exception = self.0;
        f.debug_struct("Exception")
            .field("kind", &exception.kind())
            .field("message", &exception.message())
            .field("trace", &exception.stack_trace())
            .field("previous", &exception.previous().map(ExceptionDump))
            .finish()
    }
}

fn backtrace_frames(backtrace: &Backtrace) -> Vec<String> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    backtrace
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
