//! crates/logging/src/config.rs
//! Declarative dispatcher configuration.

use std::collections::BTreeMap;

use logging_sink::Sink;

use crate::dispatcher::Dispatcher;
use crate::error::LogError;
use crate::formatter::{DEFAULT_DATETIME_TEMPLATE, DEFAULT_LINE_TEMPLATE};
use crate::registry::RawVerbosity;

/// Templates and level ranks applied to a [`Dispatcher`] in one step.
///
/// Level ranks are kept raw so that a configuration file carrying `2.5` or
/// `"3"` fails exactly like a direct [`Dispatcher::set_verbosity`] call.
///
/// # Examples
///
/// ```
/// use logging::{Dispatcher, LoggerConfig};
/// use logging_sink::{MemorySink, Verbosity};
///
/// let config = LoggerConfig::default()
///     .with_line_template("%2$s %3$s")
///     .with_level("audit", 1);
///
/// let dispatcher = Dispatcher::from_config(MemorySink::new(), &config)?;
/// assert_eq!(dispatcher.resolve_verbosity("AUDIT"), Verbosity::QUIET);
/// assert_eq!(dispatcher.formatter().line_template(), "%2$s %3$s");
/// # Ok::<(), logging::LogError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LoggerConfig {
    /// Line template, see [`DEFAULT_LINE_TEMPLATE`].
    pub line_template: String,
    /// Datetime template, see [`DEFAULT_DATETIME_TEMPLATE`].
    pub datetime_template: String,
    /// Level name → verbosity overrides, applied in key order.
    pub levels: BTreeMap<String, RawVerbosity>,
}

impl LoggerConfig {
    /// Replaces the line template.
    #[must_use]
    pub fn with_line_template(mut self, template: impl Into<String>) -> Self {
        self.line_template = template.into();
        self
    }

    /// Replaces the datetime template.
    #[must_use]
    pub fn with_datetime_template(mut self, template: impl Into<String>) -> Self {
        self.datetime_template = template.into();
        self
    }

    /// Adds or replaces a level override.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>, verbosity: impl Into<RawVerbosity>) -> Self {
        self.levels.insert(level.into(), verbosity.into());
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            line_template: DEFAULT_LINE_TEMPLATE.to_owned(),
            datetime_template: DEFAULT_DATETIME_TEMPLATE.to_owned(),
            levels: BTreeMap::new(),
        }
    }
}

impl<S> Dispatcher<S> {
    /// Applies `config` on top of the current state.
    ///
    /// Every level rank is validated before anything changes, so a rejected
    /// configuration leaves the dispatcher untouched.
    pub fn apply_config(&mut self, config: &LoggerConfig) -> Result<(), LogError> {
        let levels = config
            .levels
            .iter()
            .map(|(level, raw)| raw.to_verbosity().map(|verbosity| (level, verbosity)))
            .collect::<Result<Vec<_>, _>>()?;

        for (level, verbosity) in levels {
            self.set_verbosity(level, verbosity)?;
        }
        self.set_line_template(config.line_template.as_str());
        self.set_datetime_template(config.datetime_template.as_str());
        Ok(())
    }
}

impl<S: Sink> Dispatcher<S> {
    /// Creates a dispatcher and applies `config` to it.
    pub fn from_config(sink: S, config: &LoggerConfig) -> Result<Self, LogError> {
        let mut dispatcher = Self::new(sink);
        dispatcher.apply_config(config)?;
        Ok(dispatcher)
    }
}
