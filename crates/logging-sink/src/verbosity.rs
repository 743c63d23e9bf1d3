//! crates/logging-sink/src/verbosity.rs
//! Ordinal verbosity ranks shared by the dispatcher and its sinks.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Verbosity rank attached to every dispatched line.
///
/// Lower ranks are more important and shown more often; a sink displays a line
/// when its rank does not exceed the sink's configured threshold. The five
/// named ranks form the standard scale, but any integer is a valid rank so
/// callers can slot custom levels between (or beyond) them.
///
/// # Examples
///
/// ```
/// use logging_sink::Verbosity;
///
/// assert!(Verbosity::QUIET < Verbosity::NORMAL);
/// assert!(Verbosity::VERY_VERBOSE < Verbosity::DEBUG);
/// assert_eq!(Verbosity::new(1234).get(), 1234);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Verbosity(i64);

impl Verbosity {
    /// Only shown when the sink is quiet as well.
    pub const QUIET: Self = Self(1);
    /// Shown by default.
    pub const NORMAL: Self = Self(2);
    /// Shown with a single `-v`.
    pub const VERBOSE: Self = Self(4);
    /// Shown with `-vv`.
    pub const VERY_VERBOSE: Self = Self(8);
    /// Shown with `-vvv`.
    pub const DEBUG: Self = Self(16);

    /// The five named ranks, least verbose first.
    pub const NAMED: [Self; 5] = [
        Self::QUIET,
        Self::NORMAL,
        Self::VERBOSE,
        Self::VERY_VERBOSE,
        Self::DEBUG,
    ];

    /// Wraps an arbitrary integer rank.
    #[must_use]
    pub const fn new(rank: i64) -> Self {
        Self(rank)
    }

    /// Returns the raw integer rank.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Maps a count of `-v` flags onto a sink threshold.
    ///
    /// Zero flags keep the default [`NORMAL`](Self::NORMAL) threshold, each
    /// additional flag unlocks the next named rank, and three or more flags
    /// show everything up to [`DEBUG`](Self::DEBUG).
    #[must_use]
    pub const fn from_verbose_count(count: u8) -> Self {
        match count {
            0 => Self::NORMAL,
            1 => Self::VERBOSE,
            2 => Self::VERY_VERBOSE,
            _ => Self::DEBUG,
        }
    }

    /// Returns the name of the rank when it is one of the five named ranks.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("quiet"),
            2 => Some("normal"),
            4 => Some("verbose"),
            8 => Some("very-verbose"),
            16 => Some("debug"),
            _ => None,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<i64> for Verbosity {
    fn from(rank: i64) -> Self {
        Self(rank)
    }
}

impl From<Verbosity> for i64 {
    fn from(verbosity: Verbosity) -> Self {
        verbosity.0
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Error returned when a string names neither a known rank nor an integer.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown verbosity rank '{input}'; expected quiet, normal, verbose, very-verbose, debug or an integer")]
pub struct ParseVerbosityError {
    input: String,
}

impl ParseVerbosityError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::QUIET),
            "normal" => Ok(Self::NORMAL),
            "verbose" => Ok(Self::VERBOSE),
            "very-verbose" | "very_verbose" => Ok(Self::VERY_VERBOSE),
            "debug" => Ok(Self::DEBUG),
            other => other.parse::<i64>().map(Self).map_err(|_| ParseVerbosityError {
                input: s.to_owned(),
            }),
        }
    }
}
