//! Parser for printf-style line templates.

use crate::error::TemplateError;

use super::tokens::{Conversion, Directive, LineTemplate, TemplateToken};

/// Parses a line template into literal runs and slot directives.
///
/// Recognised directives are `%%`, `%s`, `%d`, `%N$s` and `%N$d`. Sequential
/// directives consume slots 1, 2, … independently of positional ones. Slot
/// bounds are checked when rendering, not here.
pub(crate) fn parse_line_template(text: &str) -> Result<LineTemplate, TemplateError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut next_sequential = 1_usize;
    let mut chars = text.char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }

        let Some((_, next)) = chars.next() else {
            return Err(TemplateError::TrailingPercent { offset });
        };

        let directive = match next {
            '%' => {
                literal.push('%');
                continue;
            }
            '0'..='9' => {
                let mut slot = digit_value(next);
                let mut terminator = None;
                for (_, ch) in chars.by_ref() {
                    if ch.is_ascii_digit() {
                        slot = slot.saturating_mul(10).saturating_add(digit_value(ch));
                    } else {
                        terminator = Some(ch);
                        break;
                    }
                }
                match terminator {
                    None => return Err(TemplateError::TrailingPercent { offset }),
                    Some('$') => {}
                    Some(_) => {
                        return Err(TemplateError::UnsupportedConversion {
                            offset,
                            conversion: next,
                        });
                    }
                }
                let Some((_, conversion)) = chars.next() else {
                    return Err(TemplateError::TrailingPercent { offset });
                };
                Directive {
                    slot,
                    conversion: conversion_for(conversion, offset)?,
                }
            }
            other => {
                let conversion = conversion_for(other, offset)?;
                let slot = next_sequential;
                next_sequential += 1;
                Directive { slot, conversion }
            }
        };

        if !literal.is_empty() {
            tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(TemplateToken::Directive(directive));
    }

    if !literal.is_empty() {
        tokens.push(TemplateToken::Literal(literal));
    }

    Ok(LineTemplate::new(tokens))
}

fn conversion_for(ch: char, offset: usize) -> Result<Conversion, TemplateError> {
    Conversion::from_char(ch).ok_or(TemplateError::UnsupportedConversion {
        offset,
        conversion: ch,
    })
}

fn digit_value(ch: char) -> usize {
    ch.to_digit(10).map_or(0, |digit| digit as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(text: &str) -> Vec<(usize, Conversion)> {
        parse_line_template(text)
            .expect("template parses")
            .tokens()
            .filter_map(|token| match token {
                TemplateToken::Directive(directive) => {
                    Some((directive.slot, directive.conversion))
                }
                TemplateToken::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn positional_directives_resolve_their_slot() {
        assert_eq!(
            directives("<%1$s> [%2$s] %3$s %6$d"),
            [
                (1, Conversion::Text),
                (2, Conversion::Text),
                (3, Conversion::Text),
                (6, Conversion::Integer),
            ]
        );
    }

    #[test]
    fn sequential_directives_count_from_one() {
        assert_eq!(
            directives("%s %3$s %s %d"),
            [
                (1, Conversion::Text),
                (3, Conversion::Text),
                (2, Conversion::Text),
                (3, Conversion::Integer),
            ]
        );
    }

    #[test]
    fn double_percent_is_literal() {
        let template = parse_line_template("100%% done").expect("template parses");
        let tokens: Vec<_> = template.tokens().cloned().collect();
        assert_eq!(tokens, [TemplateToken::Literal(String::from("100% done"))]);
    }

    #[test]
    fn multi_digit_slots_parse() {
        assert_eq!(directives("%12$s"), [(12, Conversion::Text)]);
    }

    #[test]
    fn trailing_percent_is_rejected() {
        assert_eq!(
            parse_line_template("abc%"),
            Err(TemplateError::TrailingPercent { offset: 3 })
        );
        assert_eq!(
            parse_line_template("%1$"),
            Err(TemplateError::TrailingPercent { offset: 0 })
        );
        assert_eq!(
            parse_line_template("%12"),
            Err(TemplateError::TrailingPercent { offset: 0 })
        );
    }

    #[test]
    fn unknown_conversions_are_rejected() {
        assert_eq!(
            parse_line_template("x %q"),
            Err(TemplateError::UnsupportedConversion {
                offset: 2,
                conversion: 'q'
            })
        );
        assert_eq!(
            parse_line_template("%1$f"),
            Err(TemplateError::UnsupportedConversion {
                offset: 0,
                conversion: 'f'
            })
        );
        assert_eq!(
            parse_line_template("%5s"),
            Err(TemplateError::UnsupportedConversion {
                offset: 0,
                conversion: '5'
            })
        );
    }

    #[test]
    fn multibyte_offsets_are_bytes() {
        assert_eq!(
            parse_line_template("é%"),
            Err(TemplateError::TrailingPercent { offset: 2 })
        );
    }
}
