//! crates/logging/src/sync.rs
//! Mutex-guarded dispatcher shared across threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use logging_sink::{Sink, Verbosity};

use crate::context::Context;
use crate::dispatcher::{Dispatcher, LogArgs};
use crate::error::LogError;
use crate::registry::RawVerbosity;

/// A [`Dispatcher`] that can be shared by reference between threads.
///
/// Every call takes the internal lock for its whole duration, so lines from
/// concurrent callers never interleave inside the sink. A lock poisoned by a
/// panicking caller is recovered; the guarded state is plain configuration
/// and stays consistent between calls.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use logging::SyncDispatcher;
/// use logging_sink::MemorySink;
///
/// let shared = Arc::new(SyncDispatcher::new(MemorySink::new()));
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || shared.log_at("info", format!("worker {worker}")))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap()?;
/// }
/// assert_eq!(shared.with(|dispatcher| dispatcher.sink().len()), 4);
/// # Ok::<(), logging::LogError>(())
/// ```
#[derive(Debug)]
pub struct SyncDispatcher<S> {
    inner: Mutex<Dispatcher<S>>,
}

impl<S: Sink> SyncDispatcher<S> {
    /// Creates a shared dispatcher with default levels and templates.
    pub fn new(sink: S) -> Self {
        Self::from(Dispatcher::new(sink))
    }

    /// See [`Dispatcher::log`].
    pub fn log(&self, level: &str, message: &str, context: &Context) -> Result<(), LogError> {
        self.lock().log(level, message, context)
    }

    /// See [`Dispatcher::log_at`].
    pub fn log_at(&self, level: &str, args: impl Into<LogArgs>) -> Result<(), LogError> {
        self.lock().log_at(level, args)
    }
}

impl<S> SyncDispatcher<S> {
    /// See [`Dispatcher::set_verbosity`].
    pub fn set_verbosity(
        &self,
        level: &str,
        verbosity: impl Into<RawVerbosity>,
    ) -> Result<(), LogError> {
        self.lock().set_verbosity(level, verbosity)
    }

    /// See [`Dispatcher::resolve_verbosity`].
    pub fn resolve_verbosity(&self, level: &str) -> Verbosity {
        self.lock().resolve_verbosity(level)
    }

    /// See [`Dispatcher::set_line_template`].
    pub fn set_line_template(&self, template: impl Into<String>) {
        self.lock().set_line_template(template);
    }

    /// See [`Dispatcher::set_datetime_template`].
    pub fn set_datetime_template(&self, template: impl Into<String>) {
        self.lock().set_datetime_template(template);
    }

    /// Runs `f` with exclusive access to the dispatcher.
    pub fn with<R>(&self, f: impl FnOnce(&mut Dispatcher<S>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the wrapper, returning the dispatcher.
    pub fn into_inner(self) -> Dispatcher<S> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Dispatcher<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> From<Dispatcher<S>> for SyncDispatcher<S> {
    fn from(dispatcher: Dispatcher<S>) -> Self {
        Self {
            inner: Mutex::new(dispatcher),
        }
    }
}
