//! crates/logging/src/tracing_bridge.rs
//! Routes `tracing` events through a [`SyncDispatcher`].
//!
//! # Architecture
//!
//! - [`DispatcherLayer`]: a tracing-subscriber layer that turns each event
//!   into one dispatcher call
//! - The event level picks a built-in severity; its fields become context and
//!   the `message` field becomes the message
//! - Events on this crate's own `sevlog::` targets are skipped so that
//!   configuration diagnostics never re-enter the dispatcher
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{SyncDispatcher, init_tracing};
//! use logging_sink::WriterSink;
//!
//! let dispatcher = Arc::new(SyncDispatcher::new(WriterSink::new(std::io::stderr())));
//! init_tracing(Arc::clone(&dispatcher));
//!
//! tracing::warn!(path = "/tmp/x", "disk almost full");
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use logging_sink::Sink;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::context::{Context, ContextValue};
use crate::exception::Exception;
use crate::levels::SeverityLevel;
use crate::sync::SyncDispatcher;

/// Target prefix of events emitted by this crate.
pub const INTERNAL_TARGET_PREFIX: &str = "sevlog";

/// A tracing layer that forwards events to a shared dispatcher.
pub struct DispatcherLayer<S> {
    dispatcher: Arc<SyncDispatcher<S>>,
}

impl<S> DispatcherLayer<S> {
    /// Creates a layer writing through `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Arc<SyncDispatcher<S>>) -> Self {
        Self { dispatcher }
    }

    /// Returns the dispatcher events are forwarded to.
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<SyncDispatcher<S>> {
        &self.dispatcher
    }

    /// Map a tracing level to a built-in severity.
    const fn severity_for(level: &Level) -> SeverityLevel {
        match *level {
            Level::ERROR => SeverityLevel::Error,
            Level::WARN => SeverityLevel::Warning,
            Level::INFO => SeverityLevel::Info,
            Level::DEBUG | Level::TRACE => SeverityLevel::Debug,
        }
    }

    fn is_internal(target: &str) -> bool {
        target
            .strip_prefix(INTERNAL_TARGET_PREFIX)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl<S> fmt::Debug for DispatcherLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherLayer").finish_non_exhaustive()
    }
}

impl<S, Sub> Layer<Sub> for DispatcherLayer<S>
where
    S: Sink + Send + 'static,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, Sub>) {
        let metadata = event.metadata();
        if Self::is_internal(metadata.target()) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let severity = Self::severity_for(metadata.level());
        let message = visitor.message.unwrap_or_default();
        if let Err(error) = self
            .dispatcher
            .log(severity.name(), &message, &visitor.context)
        {
            eprintln!("sevlog: failed to dispatch tracing event: {error}");
        }
    }
}

/// Visitor collecting the message and every other field of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    context: Context,
}

impl FieldVisitor {
    fn record(&mut self, field: &Field, value: ContextValue) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.context.insert(field.name(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, ContextValue::Float(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, ContextValue::Integer(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let value = i64::try_from(value)
            .map_or_else(|_| ContextValue::String(value.to_string()), ContextValue::Integer);
        self.record(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, ContextValue::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, ContextValue::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.record(field, ContextValue::from(Exception::from_error(value)));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, ContextValue::String(format!("{value:?}")));
    }
}

/// Install a global subscriber that routes every event through `dispatcher`.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing<S>(dispatcher: Arc<SyncDispatcher<S>>)
where
    S: Sink + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(DispatcherLayer::new(dispatcher))
        .init();
}

/// Like [`init_tracing`], with an extra filter layer in front of the bridge.
///
/// # Example
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(dispatcher, EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<S, F>(dispatcher: Arc<SyncDispatcher<S>>, filter: F)
where
    S: Sink + Send + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(DispatcherLayer::new(dispatcher))
        .init();
}
