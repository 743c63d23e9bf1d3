/// Controls whether a [`Sink`](crate::Sink) terminates a rendered line with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after the rendered line.
    #[default]
    WithNewline,
    /// Emit the rendered line as-is.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    ///
    /// The dispatcher always hands lines over with [`LineMode::WithNewline`];
    /// sinks that batch partial output (progress bars, prompts) can still be
    /// driven with [`LineMode::WithoutNewline`] directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

impl From<bool> for LineMode {
    /// Maps an append-newline flag onto a [`LineMode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert_eq!(LineMode::from(true), LineMode::WithNewline);
    /// assert_eq!(LineMode::from(false), LineMode::WithoutNewline);
    /// ```
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}

#[cfg(test)]
mod tests {
    use super::LineMode;

    #[test]
    fn default_appends_newline() {
        assert_eq!(LineMode::default(), LineMode::WithNewline);
    }

    #[test]
    fn bool_conversions_agree() {
        for flag in [true, false] {
            let mode = LineMode::from(flag);
            let back: bool = mode.into();
            assert_eq!(back, flag);
        }
    }
}
