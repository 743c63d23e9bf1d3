//! crates/logging/src/dispatcher.rs
//! Log call entry point: interpolate, render, resolve verbosity, write.

use logging_sink::{LineMode, Sink, Verbosity};

use crate::context::Context;
use crate::error::LogError;
use crate::formatter::LineFormatter;
use crate::interpolate::interpolate;
use crate::levels::SeverityLevel;
use crate::registry::{LevelRegistry, RawVerbosity, VerbosityMap};

/// Message and context of a call made through [`Dispatcher::log_at`].
///
/// Missing parts default to an empty message and an empty context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogArgs {
    /// Message, possibly containing `{key}` placeholders.
    pub message: String,
    /// Context used for placeholders and the dump slots.
    pub context: Context,
}

impl From<()> for LogArgs {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<&str> for LogArgs {
    fn from(message: &str) -> Self {
        Self::from(message.to_owned())
    }
}

impl From<String> for LogArgs {
    fn from(message: String) -> Self {
        Self {
            message,
            context: Context::new(),
        }
    }
}

impl<M> From<(M, Context)> for LogArgs
where
    M: Into<String>,
{
    fn from((message, context): (M, Context)) -> Self {
        Self {
            message: message.into(),
            context,
        }
    }
}

/// Severity-aware logger writing formatted lines to a single [`Sink`].
///
/// Owns the level registry and the formatter. Every call renders one line and
/// hands it to the sink together with the verbosity registered for its level;
/// whether the line is shown is the sink's decision.
///
/// # Examples
///
/// ```
/// use logging::{Dispatcher, context};
/// use logging_sink::{MemorySink, Verbosity};
///
/// let mut dispatcher = Dispatcher::new(MemorySink::new());
/// dispatcher.set_line_template("[%2$s] %3$s");
///
/// dispatcher.info("user {name} logged in", context! { "name" => "ada" })?;
/// dispatcher.log_at("audit", "checkpoint")?;
///
/// let sink = dispatcher.into_sink();
/// assert_eq!(
///     sink.lines().collect::<Vec<_>>(),
///     ["[INFO] user ada logged in", "[AUDIT] checkpoint"]
/// );
/// assert_eq!(sink.entries()[0].verbosity, Verbosity::VERY_VERBOSE);
/// assert_eq!(sink.entries()[1].verbosity, Verbosity::NORMAL);
/// # Ok::<(), logging::LogError>(())
/// ```
#[derive(Debug)]
pub struct Dispatcher<S> {
    sink: S,
    registry: LevelRegistry,
    formatter: LineFormatter,
}

impl<S: Sink> Dispatcher<S> {
    /// Creates a dispatcher with default levels and templates.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            registry: LevelRegistry::new(),
            formatter: LineFormatter::new(),
        }
    }

    /// Logs `message` at `level`.
    ///
    /// `level` may be any string; unknown levels are upper-cased for display
    /// and written at [`Verbosity::NORMAL`] unless registered.
    pub fn log(&mut self, level: &str, message: &str, context: &Context) -> Result<(), LogError> {
        let message = interpolate(message, context);
        let line = self.formatter.render(level, &message, context)?;
        let verbosity = self.registry.resolve_verbosity(level);
        self.sink.write(&line, LineMode::WithNewline, verbosity)?;
        Ok(())
    }

    /// Logs at an arbitrary level named at run time.
    ///
    /// ```
    /// use logging::{Dispatcher, context};
    /// use logging_sink::MemorySink;
    ///
    /// let mut dispatcher = Dispatcher::new(MemorySink::new());
    /// dispatcher.set_line_template("%2$s:%3$s");
    /// dispatcher.log_at("trace", ())?;
    /// dispatcher.log_at("trace", ("x={x}", context! { "x" => 1 }))?;
    /// assert_eq!(dispatcher.sink().lines().collect::<Vec<_>>(), ["TRACE:", "TRACE:x=1"]);
    /// # Ok::<(), logging::LogError>(())
    /// ```
    pub fn log_at(&mut self, level: &str, args: impl Into<LogArgs>) -> Result<(), LogError> {
        let LogArgs { message, context } = args.into();
        self.log(level, &message, &context)
    }

    fn log_builtin(
        &mut self,
        level: SeverityLevel,
        message: &str,
        context: &Context,
    ) -> Result<(), LogError> {
        self.log(level.name(), message, context)
    }

    /// Logs at EMERGENCY.
    pub fn emergency(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Emergency, message, &context)
    }

    /// Logs at ALERT.
    pub fn alert(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Alert, message, &context)
    }

    /// Logs at CRITICAL.
    pub fn critical(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Critical, message, &context)
    }

    /// Logs at ERROR. The line is wrapped in `<error>` tags.
    pub fn error(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Error, message, &context)
    }

    /// Logs at WARNING. The line is wrapped in `<warning>` tags.
    pub fn warning(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Warning, message, &context)
    }

    /// Logs at NOTICE.
    pub fn notice(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Notice, message, &context)
    }

    /// Logs at INFO.
    pub fn info(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Info, message, &context)
    }

    /// Logs at DEBUG.
    pub fn debug(&mut self, message: &str, context: Context) -> Result<(), LogError> {
        self.log_builtin(SeverityLevel::Debug, message, &context)
    }
}

impl<S> Dispatcher<S> {
    /// Registers or overrides the verbosity of `level`.
    pub fn set_verbosity(
        &mut self,
        level: &str,
        verbosity: impl Into<RawVerbosity>,
    ) -> Result<(), LogError> {
        self.registry.set_verbosity(level, verbosity)
    }

    /// Returns the verbosity lines at `level` are written with.
    #[must_use]
    pub fn resolve_verbosity(&self, level: &str) -> Verbosity {
        self.registry.resolve_verbosity(level)
    }

    /// Returns the current level → verbosity mapping.
    #[must_use]
    pub fn verbosity_map(&self) -> &VerbosityMap {
        self.registry.snapshot()
    }

    /// Replaces the line template. Not validated until the next log call.
    pub fn set_line_template(&mut self, template: impl Into<String>) {
        self.formatter.set_line_template(template);
    }

    /// Replaces the datetime template. Not validated until the next log call.
    pub fn set_datetime_template(&mut self, template: impl Into<String>) {
        self.formatter.set_datetime_template(template);
    }

    /// Returns the datetime template.
    #[must_use]
    pub fn datetime_template(&self) -> &str {
        self.formatter.datetime_template()
    }

    /// Returns the formatter.
    #[must_use]
    pub const fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// Returns the level registry.
    #[must_use]
    pub const fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Returns a shared reference to the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the dispatcher, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: Sink + Default> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use crate::exception::Exception;
    use logging_sink::{MemorySink, WriterSink};
    use std::io;

    fn dispatcher() -> Dispatcher<MemorySink> {
        let mut dispatcher = Dispatcher::new(MemorySink::new());
        dispatcher.set_line_template("[%2$s] %3$s");
        dispatcher
    }

    #[test]
    fn builtin_wrappers_use_their_level() {
        let mut dispatcher = dispatcher();
        dispatcher.emergency("m", Context::new()).unwrap();
        dispatcher.alert("m", Context::new()).unwrap();
        dispatcher.critical("m", Context::new()).unwrap();
        dispatcher.error("m", Context::new()).unwrap();
        dispatcher.warning("m", Context::new()).unwrap();
        dispatcher.notice("m", Context::new()).unwrap();
        dispatcher.info("m", Context::new()).unwrap();
        dispatcher.debug("m", Context::new()).unwrap();

        let sink = dispatcher.into_sink();
        assert_eq!(
            sink.lines().collect::<Vec<_>>(),
            [
                "[EMERGENCY] m",
                "[ALERT] m",
                "[CRITICAL] m",
                "<error>[ERROR] m</error>",
                "<warning>[WARNING] m</warning>",
                "[NOTICE] m",
                "[INFO] m",
                "[DEBUG] m",
            ]
        );
        let verbosities: Vec<_> = sink.entries().iter().map(|entry| entry.verbosity).collect();
        assert_eq!(
            verbosities,
            [
                Verbosity::NORMAL,
                Verbosity::NORMAL,
                Verbosity::NORMAL,
                Verbosity::NORMAL,
                Verbosity::VERBOSE,
                Verbosity::VERBOSE,
                Verbosity::VERY_VERBOSE,
                Verbosity::DEBUG,
            ]
        );
    }

    #[test]
    fn lines_are_written_with_newline() {
        let mut dispatcher = dispatcher();
        dispatcher.log("info", "x", &Context::new()).unwrap();
        let entry = dispatcher.sink().last().expect("entry recorded");
        assert_eq!(entry.line_mode, LineMode::WithNewline);
    }

    #[test]
    fn custom_levels_use_registered_verbosity() {
        let mut dispatcher = dispatcher();
        dispatcher.set_verbosity("paranoia", 1234).unwrap();
        dispatcher.log_at("PaRaNoIa", "deep").unwrap();
        let entry = dispatcher.sink().last().expect("entry recorded");
        assert_eq!(entry.line, "[PARANOIA] deep");
        assert_eq!(entry.verbosity, Verbosity::new(1234));
    }

    #[test]
    fn unknown_levels_default_to_normal() {
        let mut dispatcher = dispatcher();
        dispatcher.log_at("whatever", ()).unwrap();
        let entry = dispatcher.sink().last().expect("entry recorded");
        assert_eq!(entry.line, "[WHATEVER] ");
        assert_eq!(entry.verbosity, Verbosity::NORMAL);
    }

    #[test]
    fn overridden_builtin_changes_wrapper_verbosity() {
        let mut dispatcher = dispatcher();
        dispatcher.set_verbosity("DEBUG", Verbosity::QUIET).unwrap();
        dispatcher.debug("now visible", Context::new()).unwrap();
        assert_eq!(
            dispatcher.sink().last().map(|entry| entry.verbosity),
            Some(Verbosity::QUIET)
        );
        assert_eq!(dispatcher.verbosity_map().get("DEBUG"), Some(Verbosity::QUIET));
    }

    #[test]
    fn invalid_verbosity_leaves_map_untouched() {
        let mut dispatcher = dispatcher();
        let before = dispatcher.verbosity_map().clone();
        assert!(matches!(
            dispatcher.set_verbosity("info", "4"),
            Err(LogError::InvalidVerbosity)
        ));
        assert_eq!(dispatcher.verbosity_map(), &before);
    }

    #[test]
    fn placeholders_are_substituted_before_rendering() {
        let mut dispatcher = dispatcher();
        dispatcher
            .info("{a} and {b} but not {c}", context! { "a" => 1, "b" => "two" })
            .unwrap();
        assert_eq!(
            dispatcher.sink().lines().collect::<Vec<_>>(),
            ["[INFO] 1 and two but not {c}"]
        );
    }

    #[test]
    fn exception_slot_is_filled_from_context() {
        let mut dispatcher = dispatcher();
        dispatcher.set_line_template("%3$s|%5$s");
        dispatcher
            .critical("failed", context! { "exception" => Exception::new("disk full") })
            .unwrap();
        let line = dispatcher.sink().last().map(|entry| entry.line.as_str()).unwrap_or_default();
        assert!(line.starts_with("failed|Exception {"), "{line}");
        assert!(line.contains("disk full"));
    }

    #[test]
    fn template_errors_do_not_reach_the_sink() {
        let mut dispatcher = dispatcher();
        dispatcher.set_line_template("%9$s");
        assert!(matches!(
            dispatcher.info("x", Context::new()),
            Err(LogError::Template(_))
        ));
        assert!(dispatcher.sink().is_empty());
    }

    #[test]
    fn datetime_template_passthrough() {
        let mut dispatcher = dispatcher();
        dispatcher.set_datetime_template("[year]");
        assert_eq!(dispatcher.datetime_template(), "[year]");
        assert_eq!(dispatcher.formatter().datetime_template(), "[year]");
        assert_eq!(dispatcher.formatter().line_template(), "[%2$s] %3$s");
    }

    #[test]
    fn writer_sink_filters_by_threshold() {
        let mut dispatcher = Dispatcher::new(WriterSink::new(Vec::new()));
        dispatcher.set_line_template("%2$s");
        dispatcher.error("e", Context::new()).unwrap();
        dispatcher.warning("w", Context::new()).unwrap();
        dispatcher.debug("d", Context::new()).unwrap();

        let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
        assert_eq!(output, "<error>ERROR</error>\n");
    }

    #[test]
    fn sink_failures_propagate() {
        struct Broken;

        impl Sink for Broken {
            fn write(&mut self, _: &str, _: LineMode, _: Verbosity) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let mut dispatcher = Dispatcher::new(Broken);
        let error = dispatcher.info("x", Context::new()).unwrap_err();
        assert!(matches!(error, LogError::Sink(ref source) if source.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn sink_mut_reaches_the_sink() {
        let mut dispatcher = dispatcher();
        dispatcher.info("x", Context::new()).unwrap();
        assert_eq!(dispatcher.sink_mut().drain().len(), 1);
        assert!(dispatcher.sink().is_empty());
    }
}
