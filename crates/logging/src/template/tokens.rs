//! Token definitions backing line template parsing and rendering.

/// Parsed representation of a line template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LineTemplate {
    tokens: Vec<TemplateToken>,
}

impl LineTemplate {
    /// Constructs a new [`LineTemplate`] from parsed tokens.
    pub(super) const fn new(tokens: Vec<TemplateToken>) -> Self {
        Self { tokens }
    }

    /// Returns an iterator over the parsed tokens.
    pub(super) fn tokens(&self) -> impl Iterator<Item = &TemplateToken> {
        self.tokens.iter()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum TemplateToken {
    Literal(String),
    Directive(Directive),
}

/// A single `%` directive with its slot already resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Directive {
    /// One-based slot index.
    pub(super) slot: usize,
    pub(super) conversion: Conversion,
}

/// Conversions accepted after `%` or `%N$`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Conversion {
    /// `s`: the slot's text form.
    Text,
    /// `d`: the slot as a decimal integer.
    Integer,
}

impl Conversion {
    pub(super) const fn from_char(ch: char) -> Option<Self> {
        match ch {
            's' => Some(Self::Text),
            'd' => Some(Self::Integer),
            _ => None,
        }
    }
}

/// Value supplied for one template slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum SlotValue<'a> {
    Text(std::borrow::Cow<'a, str>),
    Integer(i64),
}

impl<'a> From<&'a str> for SlotValue<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(std::borrow::Cow::Borrowed(text))
    }
}

impl From<String> for SlotValue<'_> {
    fn from(text: String) -> Self {
        Self::Text(std::borrow::Cow::Owned(text))
    }
}

impl From<i64> for SlotValue<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}
