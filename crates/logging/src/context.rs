//! crates/logging/src/context.rs
//! Structured key/value payload attached to a log call.

use std::fmt;
use std::sync::Arc;

use crate::exception::{Exception, ExceptionDump, ExceptionLike};

/// Context key whose value is rendered into the exception slot.
pub const EXCEPTION_KEY: &str = "exception";

/// A single context value.
#[derive(Clone)]
pub enum ContextValue {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// An ordered sequence.
    List(Vec<ContextValue>),
    /// A nested map.
    Map(Context),
    /// An exception-like value.
    Exception(Arc<dyn ExceptionLike>),
}

impl ContextValue {
    /// Returns the exception when this value is exception-like.
    #[must_use]
    pub fn as_exception(&self) -> Option<&dyn ExceptionLike> {
        match self {
            Self::Exception(exception) => Some(exception.as_ref()),
            _ => None,
        }
    }

    /// Reports whether the value is [`ContextValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl PartialEq for ContextValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Exception(a), Self::Exception(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Structural form used by context dumps: strings quoted, null spelled out,
/// exceptions labelled as such.
impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => fmt::Debug::fmt(value, f),
            Self::Integer(value) => fmt::Debug::fmt(value, f),
            Self::Float(value) => fmt::Debug::fmt(value, f),
            Self::String(value) => fmt::Debug::fmt(value, f),
            Self::List(values) => f.debug_list().entries(values).finish(),
            Self::Map(context) => fmt::Debug::fmt(context, f),
            Self::Exception(exception) => fmt::Debug::fmt(&ExceptionDump(exception.as_ref()), f),
        }
    }
}

/// String form substituted into `{key}` message placeholders.
impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Integer(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::String(value) => f.write_str(value),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Self::Map(context) => fmt::Display::fmt(context, f),
            Self::Exception(exception) => f.write_str(exception.message()),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! context_value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ContextValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

context_value_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for ContextValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T> From<Vec<T>> for ContextValue
where
    T: Into<Self>,
{
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for ContextValue
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Context> for ContextValue {
    fn from(context: Context) -> Self {
        Self::Map(context)
    }
}

impl From<Exception> for ContextValue {
    fn from(exception: Exception) -> Self {
        Self::Exception(Arc::new(exception))
    }
}

impl From<Arc<dyn ExceptionLike>> for ContextValue {
    fn from(exception: Arc<dyn ExceptionLike>) -> Self {
        Self::Exception(exception)
    }
}

/// Ordered mapping from string keys to [`ContextValue`]s.
///
/// Insertion order is preserved; inserting an existing key replaces its value
/// in place. An empty context renders as an empty string in the context slot.
///
/// # Examples
///
/// ```
/// use logging::{Context, ContextValue, context};
///
/// let context = context! { "user" => "ada", "attempts" => 3 };
/// assert_eq!(context.get("attempts"), Some(&ContextValue::Integer(3)));
/// assert_eq!(context.keys().collect::<Vec<_>>(), ["user", "attempts"]);
/// assert!(Context::new().is_empty());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Option<ContextValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the exception stored under [`EXCEPTION_KEY`], when it is one.
    #[must_use]
    pub fn exception(&self) -> Option<&dyn ExceptionLike> {
        self.get(EXCEPTION_KEY).and_then(ContextValue::as_exception)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the context holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Context {
    type Item = (String, ContextValue);
    type IntoIter = std::vec::IntoIter<(String, ContextValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builds a [`Context`] from `key => value` pairs.
///
/// Keys convert with `Into<String>`, values with `Into<ContextValue>`.
///
/// ```
/// use logging::context;
///
/// let context = context! { "path" => "/tmp/a", "retries" => 2 };
/// assert_eq!(context.len(), 2);
/// assert!(context!{}.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut context = $crate::Context::new();
        $(
            context.insert($key, $value);
        )+
        context
    }};
}
