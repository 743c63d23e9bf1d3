use std::fmt;
use std::io::{self, Write};

use super::Sink;
use crate::line_mode::LineMode;
use crate::verbosity::Verbosity;

/// Sink that streams lines into an [`io::Write`] target, filtered by verbosity.
///
/// A line is written when its rank is at most the sink's threshold, so a
/// [`Verbosity::NORMAL`] threshold shows quiet and normal lines while hiding
/// verbose and debug output. Filtered lines are dropped without touching the
/// writer.
///
/// # Examples
///
/// ```
/// use logging_sink::{LineMode, Sink, Verbosity, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write("shown", LineMode::WithNewline, Verbosity::NORMAL)?;
/// sink.write("hidden", LineMode::WithNewline, Verbosity::DEBUG)?;
///
/// assert_eq!(sink.into_inner(), b"shown\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct WriterSink<W> {
    writer: W,
    threshold: Verbosity,
}

impl<W> WriterSink<W> {
    /// Creates a sink with the default [`Verbosity::NORMAL`] threshold.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_threshold(writer, Verbosity::NORMAL)
    }

    /// Creates a sink that shows every line ranked at or below `threshold`.
    #[must_use]
    pub fn with_threshold(writer: W, threshold: Verbosity) -> Self {
        Self { writer, threshold }
    }

    /// Returns the current threshold.
    #[must_use]
    pub const fn threshold(&self) -> Verbosity {
        self.threshold
    }

    /// Updates the threshold used for subsequent writes.
    pub fn set_threshold(&mut self, threshold: Verbosity) {
        self.threshold = threshold;
    }

    /// Reports whether a line of the given rank would be written.
    #[must_use]
    pub fn shows(&self, verbosity: Verbosity) -> bool {
        verbosity <= self.threshold
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Default for WriterSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write,
{
    fn write(&mut self, line: &str, line_mode: LineMode, verbosity: Verbosity) -> io::Result<()> {
        if !self.shows(verbosity) {
            return Ok(());
        }

        self.writer.write_all(line.as_bytes())?;
        if line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: WriterSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).expect("utf-8")
    }

    #[test]
    fn default_threshold_hides_verbose_lines() {
        let mut sink = WriterSink::new(Vec::new());
        for rank in Verbosity::NAMED {
            sink.write(&rank.to_string(), LineMode::WithNewline, rank)
                .expect("write succeeds");
        }
        assert_eq!(output(sink), "quiet\nnormal\n");
    }

    #[test]
    fn debug_threshold_shows_everything_named() {
        let mut sink = WriterSink::with_threshold(Vec::new(), Verbosity::DEBUG);
        for rank in Verbosity::NAMED {
            sink.write("x", LineMode::WithNewline, rank)
                .expect("write succeeds");
        }
        assert_eq!(output(sink).lines().count(), Verbosity::NAMED.len());
    }

    #[test]
    fn quiet_threshold_drops_normal_lines() {
        let mut sink = WriterSink::with_threshold(Vec::new(), Verbosity::QUIET);
        sink.write("error", LineMode::WithNewline, Verbosity::NORMAL)
            .expect("write succeeds");
        assert!(sink.get_ref().is_empty());
    }

    #[test]
    fn without_newline_mode_concatenates() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write("a", LineMode::WithoutNewline, Verbosity::NORMAL)
            .expect("write succeeds");
        sink.write("b", LineMode::WithNewline, Verbosity::NORMAL)
            .expect("write succeeds");
        assert_eq!(output(sink), "ab\n");
    }

    #[test]
    fn custom_ranks_compare_numerically() {
        let mut sink = WriterSink::with_threshold(Vec::new(), Verbosity::new(100));
        sink.write("69", LineMode::WithNewline, Verbosity::new(69))
            .expect("write succeeds");
        sink.write("1234", LineMode::WithNewline, Verbosity::new(1234))
            .expect("write succeeds");
        assert_eq!(output(sink), "69\n");
    }

    #[test]
    fn debug_output_omits_writer() {
        let sink = WriterSink::new(Vec::<u8>::new());
        let rendered = format!("{sink:?}");
        assert!(rendered.contains("WriterSink"));
        assert!(rendered.contains("threshold"));
    }
}
