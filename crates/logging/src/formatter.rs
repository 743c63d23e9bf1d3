//! crates/logging/src/formatter.rs
//! Renders one log line from a line template, a timestamp, a level, a
//! message and a context.

use time::OffsetDateTime;
use time::format_description;

use crate::context::Context;
use crate::error::LogError;
use crate::exception::ExceptionDump;
use crate::levels::{SeverityLevel, canonicalize};
use crate::template::{SlotValue, parse_line_template};

/// Line template used until [`LineFormatter::set_line_template`] is called.
///
/// Slots: `1` date, `2` level, `3` message, `4` context dump, `5` exception
/// dump, `6` unix timestamp.
pub const DEFAULT_LINE_TEMPLATE: &str = "<%1$s> [%2$s] %3$s";

/// Datetime template used until [`LineFormatter::set_datetime_template`] is
/// called: `day.month.year hour:minute:second`.
pub const DEFAULT_DATETIME_TEMPLATE: &str = "[day].[month].[year] [hour]:[minute]:[second]";

/// Number of slots a line template can reference.
pub const LINE_TEMPLATE_SLOTS: usize = 6;

/// Owns the line and datetime templates and renders lines from them.
///
/// Neither template is validated on assignment; a broken template surfaces
/// as an error from [`render`](Self::render).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineFormatter {
    line_template: String,
    datetime_template: String,
}

impl LineFormatter {
    /// Creates a formatter with the default templates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_template: DEFAULT_LINE_TEMPLATE.to_owned(),
            datetime_template: DEFAULT_DATETIME_TEMPLATE.to_owned(),
        }
    }

    /// Returns the line template.
    #[must_use]
    pub fn line_template(&self) -> &str {
        &self.line_template
    }

    /// Replaces the line template.
    pub fn set_line_template(&mut self, template: impl Into<String>) {
        self.line_template = template.into();
    }

    /// Returns the datetime template.
    #[must_use]
    pub fn datetime_template(&self) -> &str {
        &self.datetime_template
    }

    /// Replaces the datetime template.
    pub fn set_datetime_template(&mut self, template: impl Into<String>) {
        self.datetime_template = template.into();
    }

    /// Renders a line stamped with the current local time.
    ///
    /// Falls back to UTC when the local offset cannot be determined.
    pub fn render(
        &self,
        level: &str,
        message: &str,
        context: &Context,
    ) -> Result<String, LogError> {
        self.render_at(current_time(), level, message, context)
    }

    /// Renders a line stamped with `now`.
    ///
    /// `message` is used verbatim; `{key}` placeholders are substituted
    /// beforehand by the dispatcher. Lines for tagged levels come back
    /// wrapped in `<tag>…</tag>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Context, LineFormatter};
    /// use time::macros::datetime;
    ///
    /// let formatter = LineFormatter::new();
    /// let now = datetime!(2024-03-09 07:05:01 UTC);
    ///
    /// let line = formatter.render_at(now, "info", "ready", &Context::new())?;
    /// assert_eq!(line, "<09.03.2024 07:05:01> [INFO] ready");
    ///
    /// let line = formatter.render_at(now, "error", "failed", &Context::new())?;
    /// assert_eq!(line, "<error><09.03.2024 07:05:01> [ERROR] failed</error>");
    /// # Ok::<(), logging::LogError>(())
    /// ```
    pub fn render_at(
        &self,
        now: OffsetDateTime,
        level: &str,
        message: &str,
        context: &Context,
    ) -> Result<String, LogError> {
        let level = canonicalize(level);
        let description = format_description::parse_borrowed::<1>(&self.datetime_template)?;
        let date = now.format(&description)?;

        let context_dump = if context.is_empty() {
            String::new()
        } else {
            format!("{context:#?}")
        };
        let exception_dump = context
            .exception()
            .map(|exception| format!("{:#?}", ExceptionDump(exception)))
            .unwrap_or_default();

        let slots: [SlotValue<'_>; LINE_TEMPLATE_SLOTS] = [
            SlotValue::from(date),
            SlotValue::from(level.as_str()),
            SlotValue::from(message),
            SlotValue::from(context_dump),
            SlotValue::from(exception_dump),
            SlotValue::from(now.unix_timestamp()),
        ];
        let line = parse_line_template(&self.line_template)?.render(&slots)?;

        Ok(match SeverityLevel::from_name(&level).and_then(SeverityLevel::tag) {
            Some(tag) => format!("<{tag}>{line}</{tag}>"),
            None => line,
        })
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use crate::error::TemplateError;
    use crate::exception::Exception;
    use proptest::prelude::*;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2015-10-21 16:29:00 UTC);

    fn render(formatter: &LineFormatter, level: &str, message: &str, context: &Context) -> String {
        formatter
            .render_at(NOW, level, message, context)
            .expect("line renders")
    }

    #[test]
    fn defaults_are_exposed() {
        let formatter = LineFormatter::default();
        assert_eq!(formatter.line_template(), DEFAULT_LINE_TEMPLATE);
        assert_eq!(formatter.datetime_template(), DEFAULT_DATETIME_TEMPLATE);
    }

    #[test]
    fn default_line_layout() {
        let formatter = LineFormatter::new();
        assert_eq!(
            render(&formatter, "notice", "hello", &Context::new()),
            "<21.10.2015 16:29:00> [NOTICE] hello"
        );
        assert_eq!(
            render(&formatter, "warning", "hello", &Context::new()),
            "<warning><21.10.2015 16:29:00> [WARNING] hello</warning>"
        );
    }

    #[test]
    fn custom_levels_are_upper_cased_and_untagged() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%2$s");
        assert_eq!(render(&formatter, "paranoia", "", &Context::new()), "PARANOIA");
    }

    #[test]
    fn tags_follow_builtin_resolution() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%3$s");
        let empty = Context::new();
        assert_eq!(render(&formatter, "error", "x", &empty), "<error>x</error>");
        assert_eq!(render(&formatter, "Warning", "x", &empty), "<warning>x</warning>");
        assert_eq!(render(&formatter, "warn", "x", &empty), "<warning>x</warning>");
        assert_eq!(render(&formatter, "critical", "x", &empty), "x");
    }

    #[test]
    fn datetime_template_controls_slot_one() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%1$s");
        formatter.set_datetime_template("[year]-[month]-[day]");
        assert_eq!(render(&formatter, "info", "", &Context::new()), "2015-10-21");
    }

    #[test]
    fn timestamp_slot_is_unix_seconds() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%6$d|%6$s");
        assert_eq!(
            render(&formatter, "info", "", &Context::new()),
            "1445444940|1445444940"
        );
    }

    #[test]
    fn empty_context_renders_empty_dumps() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("[%4$s][%5$s]");
        assert_eq!(render(&formatter, "info", "", &Context::new()), "[][]");
    }

    #[test]
    fn context_dump_includes_every_key() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%4$s");
        let context = context! {
            "test1" => vec!["test2", "test3"],
            "exception" => "not really",
        };
        let dump = render(&formatter, "info", "", &context);
        assert_eq!(dump, format!("{context:#?}"));
        assert!(dump.contains("\"test3\""));
        assert!(dump.contains("\"exception\""));
    }

    #[test]
    fn exception_slot_requires_exception_value() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%5$s");

        let fake = context! { "exception" => "I am not an exception" };
        assert_eq!(render(&formatter, "info", "", &fake), "");

        let misplaced = context! { "notException" => Exception::new("boom") };
        assert_eq!(render(&formatter, "info", "", &misplaced), "");

        let real = context! { "exception" => Exception::new("boom").with_trace(["frame"]) };
        let dump = render(&formatter, "info", "", &real);
        assert!(dump.starts_with("Exception {"), "{dump}");
        assert!(dump.contains("\"boom\""));
        assert!(dump.contains("\"frame\""));
    }

    #[test]
    fn exception_also_appears_in_context_dump() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%4$s");
        let context = context! { "exception" => Exception::new("boom") };
        assert!(render(&formatter, "info", "", &context).contains("Exception {"));
    }

    #[test]
    fn broken_line_templates_fail_at_render() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%7$s");
        let error = formatter
            .render_at(NOW, "info", "", &Context::new())
            .unwrap_err();
        assert!(matches!(
            error,
            LogError::Template(TemplateError::MissingSlot {
                slot: 7,
                available: LINE_TEMPLATE_SLOTS
            })
        ));

        formatter.set_line_template("%2$d");
        let error = formatter
            .render_at(NOW, "info", "", &Context::new())
            .unwrap_err();
        assert!(matches!(
            error,
            LogError::Template(TemplateError::NotNumeric { slot: 2 })
        ));
    }

    #[test]
    fn broken_datetime_templates_fail_at_render() {
        let mut formatter = LineFormatter::new();
        formatter.set_datetime_template("[not-a-component]");
        let error = formatter
            .render_at(NOW, "info", "", &Context::new())
            .unwrap_err();
        assert!(matches!(error, LogError::DateTimeTemplate(_)));
    }

    #[test]
    fn render_uses_a_real_clock() {
        let mut formatter = LineFormatter::new();
        formatter.set_line_template("%6$d");
        let line = formatter
            .render("info", "", &Context::new())
            .expect("line renders");
        let stamp: i64 = line.parse().expect("numeric timestamp");
        assert!(stamp > NOW.unix_timestamp());
    }

    proptest! {
        #[test]
        fn templates_round_trip_unvalidated(line in ".*", datetime in ".*") {
            let mut formatter = LineFormatter::new();
            formatter.set_line_template(line.as_str());
            formatter.set_datetime_template(datetime.as_str());
            prop_assert_eq!(formatter.line_template(), line.as_str());
            prop_assert_eq!(formatter.datetime_template(), datetime.as_str());
        }
    }
}
