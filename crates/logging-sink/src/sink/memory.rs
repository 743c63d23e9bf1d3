use std::io;

use super::Sink;
use crate::line_mode::LineMode;
use crate::verbosity::Verbosity;

/// A line captured by [`MemorySink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SinkEntry {
    /// The rendered line, without any newline terminator.
    pub line: String,
    /// Line mode requested by the caller.
    pub line_mode: LineMode,
    /// Verbosity rank the line was dispatched at.
    pub verbosity: Verbosity,
}

/// Sink that records every line it receives, unfiltered.
///
/// Useful for inspecting exactly what a dispatcher hands to its sink,
/// including the verbosity rank that a real sink would filter on.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    entries: Vec<SinkEntry>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[SinkEntry] {
        &self.entries
    }

    /// Returns the most recently recorded entry.
    #[must_use]
    pub fn last(&self) -> Option<&SinkEntry> {
        self.entries.last()
    }

    /// Returns the recorded lines in arrival order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.line.as_str())
    }

    /// Removes and returns every recorded entry.
    pub fn drain(&mut self) -> Vec<SinkEntry> {
        self.entries.drain(..).collect()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, line: &str, line_mode: LineMode, verbosity: Verbosity) -> io::Result<()> {
        self.entries.push(SinkEntry {
            line: line.to_owned(),
            line_mode,
            verbosity,
        });
        Ok(())
    }
}
