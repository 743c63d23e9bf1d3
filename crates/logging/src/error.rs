//! crates/logging/src/error.rs
//! Error taxonomy for configuration, rendering and dispatch.

use std::io;

use thiserror::Error;

/// Errors surfaced by the registry, the formatter and the dispatcher.
///
/// None of these are logged internally; they are returned to the caller as-is.
#[derive(Debug, Error)]
pub enum LogError {
    /// A verbosity value was not a true integer.
    #[error("Verbosity must be an integer")]
    InvalidVerbosity,
    /// The line template could not be interpolated.
    #[error("invalid line template: {0}")]
    Template(#[from] TemplateError),
    /// The datetime template is not a valid format description.
    #[error("invalid datetime template: {0}")]
    DateTimeTemplate(#[from] time::error::InvalidFormatDescription),
    /// The timestamp could not be rendered with the datetime template.
    #[error("failed to format timestamp: {0}")]
    DateTimeFormat(#[from] time::error::Format),
    /// The sink rejected the rendered line.
    #[error("sink failed: {0}")]
    Sink(#[from] io::Error),
}

/// Problems found while interpolating a line template.
///
/// Templates are never validated when assigned, so these only show up when a
/// line is rendered.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TemplateError {
    /// The template ends in the middle of a `%` directive.
    #[error("template ends with an incomplete '%' directive at byte {offset}")]
    TrailingPercent {
        /// Byte offset of the dangling `%`.
        offset: usize,
    },
    /// A directive uses a conversion other than `s` or `d`.
    #[error("unsupported conversion '{conversion}' at byte {offset}")]
    UnsupportedConversion {
        /// Byte offset of the directive's `%`.
        offset: usize,
        /// The offending conversion character.
        conversion: char,
    },
    /// A directive references a slot with no value.
    #[error("slot {slot} has no value; line templates provide slots 1 to {available}")]
    MissingSlot {
        /// The requested one-based slot.
        slot: usize,
        /// Number of slots the formatter supplies.
        available: usize,
    },
    /// A `d` conversion was applied to a slot that is not an integer.
    #[error("slot {slot} is not numeric and cannot be rendered with '%d'")]
    NotNumeric {
        /// The requested one-based slot.
        slot: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_verbosity_message_is_exact() {
        assert_eq!(
            LogError::InvalidVerbosity.to_string(),
            "Verbosity must be an integer"
        );
    }

    #[test]
    fn template_errors_convert_into_log_errors() {
        let error: LogError = TemplateError::MissingSlot {
            slot: 7,
            available: 6,
        }
        .into();
        assert!(matches!(
            error,
            LogError::Template(TemplateError::MissingSlot { slot: 7, .. })
        ));
        assert!(error.to_string().contains("slot 7"));
    }

    #[test]
    fn sink_errors_keep_their_source() {
        let error: LogError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        let source = std::error::Error::source(&error).expect("source retained");
        assert!(source.to_string().contains("gone"));
    }
}
