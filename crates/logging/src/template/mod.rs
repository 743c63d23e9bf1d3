//! Line template engine: `%N$s`-style directives over a fixed slot list.

mod parser;
mod tokens;

use crate::error::TemplateError;

pub(crate) use parser::parse_line_template;
pub(crate) use tokens::SlotValue;

use tokens::{Conversion, LineTemplate, TemplateToken};

impl LineTemplate {
    /// Substitutes `slots` into the template.
    ///
    /// Slot `N` of a directive maps to `slots[N - 1]`.
    pub(crate) fn render(&self, slots: &[SlotValue<'_>]) -> Result<String, TemplateError> {
        let mut rendered = String::new();
        for token in self.tokens() {
            match token {
                TemplateToken::Literal(text) => rendered.push_str(text),
                TemplateToken::Directive(directive) => {
                    let value = directive
                        .slot
                        .checked_sub(1)
                        .and_then(|index| slots.get(index))
                        .ok_or(TemplateError::MissingSlot {
                            slot: directive.slot,
                            available: slots.len(),
                        })?;
                    match (directive.conversion, value) {
                        (Conversion::Text, SlotValue::Text(text)) => rendered.push_str(text),
                        (_, SlotValue::Integer(number)) => {
                            rendered.push_str(&number.to_string());
                        }
                        (Conversion::Integer, SlotValue::Text(text)) => {
                            let number = text.trim().parse::<i64>().map_err(|_| {
                                TemplateError::NotNumeric {
                                    slot: directive.slot,
                                }
                            })?;
                            rendered.push_str(&number.to_string());
                        }
                    }
                }
            }
        }
        Ok(rendered)
    }
}
