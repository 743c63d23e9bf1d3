//! crates/logging/src/interpolate.rs
//! `{key}` placeholder substitution in log messages.

use crate::context::Context;

/// Replaces every `{key}` token in `message` with the string form of the
/// matching context value.
///
/// The message is scanned once from left to right; substituted text is never
/// rescanned, so a value that itself contains `{other}` stays as-is. Tokens
/// naming a missing key are left untouched and keys without a token are
/// ignored. When several keys match at the same position the longest wins.
///
/// # Examples
///
/// ```
/// use logging::{context, interpolate};
///
/// let context = context! { "user" => "ada", "count" => 3 };
/// assert_eq!(
///     interpolate("{user} retried {count} times, {unknown}", &context),
///     "ada retried 3 times, {unknown}"
/// );
/// ```
#[must_use]
pub fn interpolate(message: &str, context: &Context) -> String {
    if context.is_empty() || !message.contains('{') {
        return message.to_owned();
    }

    let mut rendered = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let matched = context
            .iter()
            .filter(|(key, _)| {
                after_brace
                    .strip_prefix(key)
                    .is_some_and(|tail| tail.starts_with('}'))
            })
            .max_by_key(|(key, _)| key.len());

        match matched {
            Some((key, value)) => {
                rendered.push_str(&value.to_string());
                rest = &after_brace[key.len() + 1..];
            }
            None => {
                rendered.push('{');
                rest = after_brace;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}
