//! crates/logging/src/registry.rs
//! Level name to verbosity rank mapping.

use std::collections::BTreeMap;
use std::collections::btree_map;

use logging_sink::Verbosity;

use crate::error::LogError;
use crate::levels::{SeverityLevel, registry_key};

/// Untyped verbosity input, validated by [`LevelRegistry::set_verbosity`].
///
/// Configuration files and dynamic callers may hand over anything that looks
/// like a number. Only [`RawVerbosity::Integer`] is accepted; floats and
/// strings (numeric or not) are rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawVerbosity {
    /// A true integer.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// Text, including numeric strings such as `"3"`.
    Text(String),
}

impl RawVerbosity {
    /// Returns the rank when the value is a true integer.
    pub fn to_verbosity(&self) -> Result<Verbosity, LogError> {
        match self {
            Self::Integer(rank) => Ok(Verbosity::new(*rank)),
            Self::Float(_) | Self::Text(_) => Err(LogError::InvalidVerbosity),
        }
    }
}

impl From<Verbosity> for RawVerbosity {
    fn from(verbosity: Verbosity) -> Self {
        Self::Integer(verbosity.get())
    }
}

macro_rules! raw_verbosity_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawVerbosity {
                fn from(rank: $ty) -> Self {
                    Self::Integer(i64::from(rank))
                }
            }
        )*
    };
}

raw_verbosity_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for RawVerbosity {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for RawVerbosity {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawVerbosity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawVerbosity {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Read-only view of the registered level ranks, keyed canonically.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VerbosityMap {
    entries: BTreeMap<String, Verbosity>,
}

impl VerbosityMap {
    /// Looks up a canonical key (a built-in short code or an upper-cased name).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Verbosity> {
        self.entries.get(key).copied()
    }

    /// Reports whether a canonical key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over `(key, rank)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Verbosity)> {
        self.entries.iter().map(|(key, rank)| (key.as_str(), *rank))
    }

    /// Number of registered levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no level is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a VerbosityMap {
    type Item = (&'a String, &'a Verbosity);
    type IntoIter = btree_map::Iter<'a, String, Verbosity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Owns the level → verbosity mapping.
///
/// Level names are case-insensitive. Built-in levels can be addressed by
/// their full name or short code; every other name is a custom level and is
/// stored upper-cased. Looking up a level that was never registered yields
/// [`Verbosity::NORMAL`].
///
/// # Examples
///
/// ```
/// use logging::LevelRegistry;
/// use logging_sink::Verbosity;
///
/// let mut registry = LevelRegistry::new();
/// assert_eq!(registry.resolve_verbosity("debug"), Verbosity::DEBUG);
/// assert_eq!(registry.resolve_verbosity("paranoia"), Verbosity::NORMAL);
///
/// registry.set_verbosity("paranoia", 1234)?;
/// assert_eq!(registry.resolve_verbosity("PARANOIA"), Verbosity::new(1234));
///
/// assert!(registry.set_verbosity("debug", 2.5).is_err());
/// # Ok::<(), logging::LogError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelRegistry {
    map: VerbosityMap,
}

impl LevelRegistry {
    /// Creates a registry seeded with the eight built-in levels.
    #[must_use]
    pub fn new() -> Self {
        let entries = SeverityLevel::ALL
            .into_iter()
            .map(|level| (level.code().to_owned(), level.default_verbosity()))
            .collect();
        Self {
            map: VerbosityMap { entries },
        }
    }

    /// Returns the rank registered for `level`, or [`Verbosity::NORMAL`].
    #[must_use]
    pub fn resolve_verbosity(&self, level: &str) -> Verbosity {
        self.map
            .get(&registry_key(level))
            .unwrap_or(Verbosity::NORMAL)
    }

    /// Registers or overrides the rank for `level`.
    ///
    /// Built-in levels may be overridden; nothing protects them.
    pub fn set_verbosity(
        &mut self,
        level: &str,
        verbosity: impl Into<RawVerbosity>,
    ) -> Result<(), LogError> {
        let verbosity = verbosity.into().to_verbosity()?;
        if let Some(builtin) = SeverityLevel::from_name(level) {
            trace_builtin_override(builtin, verbosity);
        }
        self.map.entries.insert(registry_key(level), verbosity);
        Ok(())
    }

    /// Reports whether `level` has an explicit entry.
    #[must_use]
    pub fn is_registered(&self, level: &str) -> bool {
        self.map.contains_key(&registry_key(level))
    }

    /// Drops a custom level, or resets a built-in one to its default rank.
    ///
    /// Returns the rank that was registered before the call.
    pub fn remove(&mut self, level: &str) -> Option<Verbosity> {
        match SeverityLevel::from_name(level) {
            Some(builtin) => self
                .map
                .entries
                .insert(builtin.code().to_owned(), builtin.default_verbosity()),
            None => self.map.entries.remove(&registry_key(level)),
        }
    }

    /// Iterates over `(key, rank)` pairs in key order.
    pub fn levels(&self) -> impl Iterator<Item = (&str, Verbosity)> {
        self.map.iter()
    }

    /// Returns a read-only view of the whole mapping.
    #[must_use]
    pub fn snapshot(&self) -> &VerbosityMap {
        &self.map
    }
}

#[cfg(feature = "tracing")]
fn trace_builtin_override(builtin: SeverityLevel, verbosity: Verbosity) {
    tracing::debug!(
        target: "sevlog::levels",
        level = builtin.name(),
        default = %builtin.default_verbosity(),
        verbosity = %verbosity,
        "overriding built-in level verbosity"
    );
}

#[cfg(not(feature = "tracing"))]
const fn trace_builtin_override(_builtin: SeverityLevel, _verbosity: Verbosity) {}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
