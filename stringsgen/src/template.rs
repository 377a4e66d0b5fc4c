//! Lexer for the value template micro-syntax.
//!
//! - `{name}` is a parameter, `{#name}` marks the key parameter used to pick
//!   a plural category.
//! - `{{` and `}}` are literal braces.
//!
//! The scanner is a small state machine over code points. Offsets in errors
//! are 0-based character positions, not byte positions.

use thiserror::Error;

use crate::{
    key::ParameterName,
    types::{TemplateComponent, Value},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error(
        "unexpected '}}' at position {offset} of '{text}'. Either you forgot a '{{' before it to start a parameter or you should escape the '}}' using '}}}}'"
    )]
    UnexpectedClosingBrace { offset: usize, text: String },

    #[error(
        "unexpected '{{' at position {offset} of '{text}'. Either you forgot a '}}' before it to end a parameter or you should escape the first '{{' using '{{{{'"
    )]
    UnexpectedOpeningBrace { offset: usize, text: String },

    #[error(
        "missing parameter name at position {offset} of '{text}'. Either you forgot the parameter name or you should escape the '{{}}' using '{{{{}}}}'"
    )]
    MissingParameterName { offset: usize, text: String },

    #[error(
        "unterminated parameter at position {offset} of '{text}'. Either you forgot a '}}' to end the parameter or you should escape the '{{' using '{{{{'"
    )]
    UnterminatedParameter { offset: usize, text: String },

    #[error(
        "conflicting key parameters '{first}' and '{second}' at position {offset} of '{text}'. Only one parameter may be marked with '#'"
    )]
    ConflictingKeyParameters {
        first: String,
        second: String,
        offset: usize,
        text: String,
    },
}

impl TemplateError {
    /// Character offset at which the rule was violated.
    pub fn offset(&self) -> usize {
        match self {
            TemplateError::UnexpectedClosingBrace { offset, .. }
            | TemplateError::UnexpectedOpeningBrace { offset, .. }
            | TemplateError::MissingParameterName { offset, .. }
            | TemplateError::UnterminatedParameter { offset, .. }
            | TemplateError::ConflictingKeyParameters { offset, .. } => *offset,
        }
    }

    /// The full text that was being scanned.
    pub fn text(&self) -> &str {
        match self {
            TemplateError::UnexpectedClosingBrace { text, .. }
            | TemplateError::UnexpectedOpeningBrace { text, .. }
            | TemplateError::MissingParameterName { text, .. }
            | TemplateError::UnterminatedParameter { text, .. }
            | TemplateError::ConflictingKeyParameters { text, .. } => text,
        }
    }
}

/// Result of scanning one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedValue {
    pub value: Value,
    /// The `#`-marked parameter, if any.
    pub key_parameter: Option<ParameterName>,
}

struct Lexer<'a> {
    text: &'a str,
    components: Vec<TemplateComponent>,
    current_constant: String,
    current_parameter: String,
    is_parsing_parameter: bool,
    is_awaiting_closing_brace: bool,
    is_key_parameter: bool,
    parameter_start: usize,
    closing_brace_start: usize,
    key_parameter: Option<ParameterName>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Lexer {
            text,
            components: Vec::new(),
            current_constant: String::new(),
            current_parameter: String::new(),
            is_parsing_parameter: false,
            is_awaiting_closing_brace: false,
            is_key_parameter: false,
            parameter_start: 0,
            closing_brace_start: 0,
            key_parameter: None,
        }
    }

    fn run(mut self) -> Result<ParsedValue, TemplateError> {
        for (offset, character) in self.text.chars().enumerate() {
            self.step(offset, character)?;
        }

        if self.is_parsing_parameter {
            return Err(TemplateError::UnterminatedParameter {
                offset: self.parameter_start,
                text: self.text.to_string(),
            });
        }
        if self.is_awaiting_closing_brace {
            return Err(TemplateError::UnexpectedClosingBrace {
                offset: self.closing_brace_start,
                text: self.text.to_string(),
            });
        }

        if self.components.is_empty() {
            return Ok(ParsedValue {
                value: Value::Constant(self.current_constant),
                key_parameter: None,
            });
        }

        self.flush_constant();
        Ok(ParsedValue {
            value: Value::Template(self.components),
            key_parameter: self.key_parameter,
        })
    }

    fn step(&mut self, offset: usize, character: char) -> Result<(), TemplateError> {
        if self.is_awaiting_closing_brace && character != '}' {
            return Err(TemplateError::UnexpectedClosingBrace {
                offset: self.closing_brace_start,
                text: self.text.to_string(),
            });
        }

        match character {
            '{' if self.is_parsing_parameter => {
                if !self.current_parameter.is_empty() || self.is_key_parameter {
                    return Err(TemplateError::UnexpectedOpeningBrace {
                        offset,
                        text: self.text.to_string(),
                    });
                }
                // `{{`
                self.is_parsing_parameter = false;
                self.current_constant.push('{');
            }
            '{' => {
                self.is_parsing_parameter = true;
                self.parameter_start = offset;
            }
            '}' if self.is_parsing_parameter => self.finish_parameter()?,
            '}' if self.is_awaiting_closing_brace => {
                self.is_awaiting_closing_brace = false;
            }
            '}' => {
                self.current_constant.push('}');
                self.is_awaiting_closing_brace = true;
                self.closing_brace_start = offset;
            }
            '#' if self.is_parsing_parameter
                && self.current_parameter.is_empty()
                && !self.is_key_parameter =>
            {
                self.is_key_parameter = true;
            }
            _ if self.is_parsing_parameter => self.current_parameter.push(character),
            _ => self.current_constant.push(character),
        }

        Ok(())
    }

    fn finish_parameter(&mut self) -> Result<(), TemplateError> {
        if self.current_parameter.is_empty() {
            return Err(TemplateError::MissingParameterName {
                offset: self.parameter_start,
                text: self.text.to_string(),
            });
        }

        let name = ParameterName::new(std::mem::take(&mut self.current_parameter));
        if self.is_key_parameter {
            match &self.key_parameter {
                Some(existing) if existing != &name => {
                    return Err(TemplateError::ConflictingKeyParameters {
                        first: existing.to_string(),
                        second: name.to_string(),
                        offset: self.parameter_start,
                        text: self.text.to_string(),
                    });
                }
                Some(_) => {}
                None => self.key_parameter = Some(name.clone()),
            }
        }

        self.flush_constant();
        self.components.push(TemplateComponent::Parameter(name));
        self.is_parsing_parameter = false;
        self.is_key_parameter = false;
        Ok(())
    }

    fn flush_constant(&mut self) {
        if !self.current_constant.is_empty() {
            self.components.push(TemplateComponent::Constant(std::mem::take(
                &mut self.current_constant,
            )));
        }
    }
}

/// Scans a raw value into a [`Value`].
///
/// ```rust
/// use stringsgen::template::parse_value;
/// use stringsgen::types::Value;
///
/// let parsed = parse_value("{{literal}}").unwrap();
/// assert_eq!(parsed.value, Value::Constant("{literal}".to_string()));
/// ```
pub fn parse_value(text: &str) -> Result<ParsedValue, TemplateError> {
    Lexer::new(text).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(text: &str) -> TemplateComponent {
        TemplateComponent::Constant(text.to_string())
    }

    fn parameter(name: &str) -> TemplateComponent {
        TemplateComponent::Parameter(ParameterName::new(name))
    }

    #[test]
    fn test_plain_text_is_constant() {
        let parsed = parse_value("Hello, world!").unwrap();
        assert_eq!(parsed.value, Value::Constant("Hello, world!".to_string()));
        assert_eq!(parsed.key_parameter, None);
    }

    #[test]
    fn test_empty_text_is_empty_constant() {
        let parsed = parse_value("").unwrap();
        assert_eq!(parsed.value, Value::Constant(String::new()));
    }

    #[test]
    fn test_escaped_braces_resolve_to_constant() {
        let parsed = parse_value("{{literal}}").unwrap();
        assert_eq!(parsed.value, Value::Constant("{literal}".to_string()));

        let parsed = parse_value("a {{ b }} c").unwrap();
        assert_eq!(parsed.value, Value::Constant("a { b } c".to_string()));
    }

    #[test]
    fn test_template_components_in_order() {
        let parsed = parse_value("Hello {name}, you have {count} items").unwrap();
        assert_eq!(
            parsed.value,
            Value::Template(vec![
                constant("Hello "),
                parameter("name"),
                constant(", you have "),
                parameter("count"),
                constant(" items"),
            ])
        );
        assert_eq!(parsed.key_parameter, None);
    }

    #[test]
    fn test_adjacent_parameters_and_escapes() {
        let parsed = parse_value("{a}{b}{{{c}}}").unwrap();
        assert_eq!(
            parsed.value,
            Value::Template(vec![
                parameter("a"),
                parameter("b"),
                constant("{"),
                parameter("c"),
                constant("}"),
            ])
        );
    }

    #[test]
    fn test_key_parameter_marker() {
        let parsed = parse_value("{#count} items").unwrap();
        assert_eq!(
            parsed.value,
            Value::Template(vec![parameter("count"), constant(" items")])
        );
        assert_eq!(parsed.key_parameter, Some(ParameterName::new("count")));
    }

    #[test]
    fn test_same_key_parameter_twice_is_accepted() {
        let parsed = parse_value("{#n} of {#n}").unwrap();
        assert_eq!(parsed.key_parameter, Some(ParameterName::new("n")));
    }

    #[test]
    fn test_hash_inside_name_is_literal() {
        let parsed = parse_value("{a#b}").unwrap();
        assert_eq!(parsed.value, Value::Template(vec![parameter("a#b")]));
        assert_eq!(parsed.key_parameter, None);
    }

    #[test]
    fn test_conflicting_key_parameters() {
        let error = parse_value("{#n} and {#m}").unwrap_err();
        assert_eq!(
            error,
            TemplateError::ConflictingKeyParameters {
                first: "n".to_string(),
                second: "m".to_string(),
                offset: 9,
                text: "{#n} and {#m}".to_string(),
            }
        );
    }

    #[test]
    fn test_unterminated_parameter_reports_opening_brace() {
        let error = parse_value("{name").unwrap_err();
        assert!(matches!(
            error,
            TemplateError::UnterminatedParameter { offset: 0, .. }
        ));
        assert_eq!(error.text(), "{name");

        let error = parse_value("abc {name").unwrap_err();
        assert_eq!(error.offset(), 4);
    }

    #[test]
    fn test_missing_parameter_name() {
        let error = parse_value("a{}").unwrap_err();
        assert!(matches!(
            error,
            TemplateError::MissingParameterName { offset: 1, .. }
        ));

        let error = parse_value("{#}").unwrap_err();
        assert!(matches!(error, TemplateError::MissingParameterName { .. }));
    }

    #[test]
    fn test_lone_closing_brace() {
        let error = parse_value("a } b").unwrap_err();
        assert!(matches!(
            error,
            TemplateError::UnexpectedClosingBrace { offset: 2, .. }
        ));

        let error = parse_value("trailing }").unwrap_err();
        assert_eq!(error.offset(), 9);

        let error = parse_value("{a}}").unwrap_err();
        assert!(matches!(
            error,
            TemplateError::UnexpectedClosingBrace { offset: 3, .. }
        ));
    }

    #[test]
    fn test_opening_brace_inside_parameter() {
        let error = parse_value("{na{me}").unwrap_err();
        assert!(matches!(
            error,
            TemplateError::UnexpectedOpeningBrace { offset: 3, .. }
        ));
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        let error = parse_value("héllo }").unwrap_err();
        assert_eq!(error.offset(), 6);
    }

    #[test]
    fn test_error_message_mentions_escape() {
        let error = parse_value("}").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("unexpected '}'"));
        assert!(message.contains("'}}'"));
        assert!(message.contains("position 0 of '}'"));
    }
}
