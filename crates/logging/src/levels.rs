//! crates/logging/src/levels.rs
//! Built-in severity levels, their short codes and emphasis tags.

use std::fmt;

use logging_sink::Verbosity;

/// The eight standard severity levels, most urgent first.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SeverityLevel {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information.
    Debug,
}

impl SeverityLevel {
    /// Every built-in level, most urgent first.
    pub const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Full upper-case name of the level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emergency => "EMERGENCY",
            Self::Alert => "ALERT",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Canonical short code, used as the level's key in the verbosity map.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Emergency => "EMERG",
            Self::Warning => "WARN",
            other => other.name(),
        }
    }

    /// Verbosity rank the level starts out with.
    #[must_use]
    pub const fn default_verbosity(self) -> Verbosity {
        match self {
            Self::Emergency | Self::Alert | Self::Critical | Self::Error => Verbosity::NORMAL,
            Self::Warning | Self::Notice => Verbosity::VERBOSE,
            Self::Info => Verbosity::VERY_VERBOSE,
            Self::Debug => Verbosity::DEBUG,
        }
    }

    /// Name of the tag that wraps lines logged at this level, if any.
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("error"),
            Self::Warning => Some("warning"),
            _ => None,
        }
    }

    /// Recognises a built-in level by full name or short code, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::SeverityLevel;
    ///
    /// assert_eq!(SeverityLevel::from_name("warning"), Some(SeverityLevel::Warning));
    /// assert_eq!(SeverityLevel::from_name("WARN"), Some(SeverityLevel::Warning));
    /// assert_eq!(SeverityLevel::from_name("paranoia"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = canonicalize(name);
        Self::ALL
            .into_iter()
            .find(|level| level.name() == canonical || level.code() == canonical)
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upper-cases a level name into its canonical form.
#[must_use]
pub fn canonicalize(level: &str) -> String {
    level.to_uppercase()
}

/// Returns the key a level name occupies in the verbosity map.
///
/// Built-in levels collapse onto their short code so that `"warning"`,
/// `"Warning"` and `"WARN"` all address the same entry; any other name is
/// simply upper-cased.
#[must_use]
pub fn registry_key(level: &str) -> String {
    SeverityLevel::from_name(level).map_or_else(
        || canonicalize(level),
        |builtin| builtin.code().to_owned(),
    )
}
