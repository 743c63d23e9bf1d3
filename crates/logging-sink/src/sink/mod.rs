use std::io;

use crate::line_mode::LineMode;
use crate::verbosity::Verbosity;

mod memory;
mod writer;

pub use memory::{MemorySink, SinkEntry};
pub use writer::WriterSink;

/// Destination for rendered log lines.
///
/// A sink receives one fully rendered line per call together with the line's
/// verbosity rank and decides on its own whether (and where) to display it.
/// The dispatcher never inspects what the sink did with the line; any error
/// returned here is propagated to the caller of the logging call unchanged.
pub trait Sink {
    /// Accepts a rendered line.
    fn write(&mut self, line: &str, line_mode: LineMode, verbosity: Verbosity) -> io::Result<()>;

    /// Flushes buffered output, if any.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S> Sink for &mut S
where
    S: Sink + ?Sized,
{
    fn write(&mut self, line: &str, line_mode: LineMode, verbosity: Verbosity) -> io::Result<()> {
        (**self).write(line, line_mode, verbosity)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S> Sink for Box<S>
where
    S: Sink + ?Sized,
{
    fn write(&mut self, line: &str, line_mode: LineMode, verbosity: Verbosity) -> io::Result<()> {
        (**self).write(line, line_mode, verbosity)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
