//! Template text tokenizer
//!
//! Turns template text into an ordered sequence of [`Section`]s in a single
//! left-to-right pass. Placeholders are written `{{key}}` or `{{ key }}`; the
//! key is trimmed and otherwise kept verbatim.

use crate::error::{Error, Result};
use crate::types::Section;

/// Number of characters of template text quoted in parse errors
const EXCERPT_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InsideKey,
}

/// Where the placeholder currently being read was opened
#[derive(Debug, Clone, Copy)]
struct KeyStart {
    line: usize,
    column: usize,
}

pub struct Parser<'a> {
    text: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Tokenize the whole text
    ///
    /// Fails when a `{{` is still open at the end of the input. Lines and
    /// columns are tracked for the error message and for the indent of each
    /// placeholder; they do not influence tokenization.
    pub fn parse(&self) -> Result<Vec<Section>> {
        let mut sections = Vec::new();
        let mut buffer = String::new();
        let mut state = State::Outside;
        let mut key_start = KeyStart { line: 1, column: 1 };

        let mut line = 1;
        let mut column = 1;
        let mut chars = self.text.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '{' && chars.peek() == Some(&'{') {
                chars.next();
                if state == State::InsideKey {
                    // the earlier opening is never closed, keep it as text
                    buffer.insert_str(0, "{{");
                }
                if !buffer.is_empty() {
                    sections.push(Section::Static(std::mem::take(&mut buffer)));
                }
                state = State::InsideKey;
                key_start = KeyStart { line, column };
                column += 2;
                continue;
            }

            if state == State::InsideKey && c == '}' && chars.peek() == Some(&'}') {
                chars.next();
                sections.push(Section::Dynamic {
                    key: buffer.trim().to_string(),
                    indent: key_start.column - 1,
                });
                buffer.clear();
                state = State::Outside;
                column += 2;
                continue;
            }

            buffer.push(c);
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        if state == State::InsideKey {
            return Err(self.unterminated(key_start));
        }
        if !buffer.is_empty() {
            sections.push(Section::Static(buffer));
        }

        Ok(sections)
    }

    fn unterminated(&self, start: KeyStart) -> Error {
        let mut excerpt: String = self.text.chars().take(EXCERPT_LENGTH).collect();
        if self.text.chars().nth(EXCERPT_LENGTH).is_some() {
            excerpt.push_str("...");
        }
        Error::parse_owned(format!(
            "unterminated placeholder in template starting with \"{}\" at line {} and column {}",
            excerpt, start.line, start.column
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic(key: &str, indent: usize) -> Section {
        Section::Dynamic {
            key: key.to_string(),
            indent,
        }
    }

    fn text(content: &str) -> Section {
        Section::Static(content.to_string())
    }

    #[test]
    fn test_parse_plain_text() {
        let sections = Parser::new("no placeholders here").parse().unwrap();
        assert_eq!(sections, vec![text("no placeholders here")]);
    }

    #[test]
    fn test_parse_placeholders_in_order() {
        let sections = Parser::new("Hello {{name}}, you are {{ age }}!").parse().unwrap();
        assert_eq!(
            sections,
            vec![
                text("Hello "),
                dynamic("name", 6),
                text(", you are "),
                dynamic("age", 24),
                text("!"),
            ]
        );
    }

    #[test]
    fn test_parse_key_case_preserved() {
        let sections = Parser::new("{{  UserName\t}}").parse().unwrap();
        assert_eq!(sections, vec![dynamic("UserName", 0)]);
    }

    #[test]
    fn test_parse_tracks_columns_per_line() {
        let sections = Parser::new("<ul>\n    {{items}}\n</ul>").parse().unwrap();
        assert_eq!(
            sections,
            vec![text("<ul>\n    "), dynamic("items", 4), text("\n</ul>")]
        );
    }

    #[test]
    fn test_parse_adjacent_placeholders() {
        let sections = Parser::new("{{a}}{{b}} {{c}}").parse().unwrap();
        assert_eq!(
            sections,
            vec![dynamic("a", 0), dynamic("b", 5), text(" "), dynamic("c", 11)]
        );
    }

    #[test]
    fn test_parse_stray_closing_braces_are_text() {
        let sections = Parser::new("a }} b").parse().unwrap();
        assert_eq!(sections, vec![text("a }} b")]);
    }

    #[test]
    fn test_parse_single_braces_are_text() {
        let sections = Parser::new("fn main() { {{body}} }").parse().unwrap();
        assert_eq!(
            sections,
            vec![text("fn main() { "), dynamic("body", 12), text(" }")]
        );
    }

    #[test]
    fn test_parse_reopened_placeholder_keeps_text() {
        let sections = Parser::new("{{a {{b}}").parse().unwrap();
        assert_eq!(sections, vec![text("{{a "), dynamic("b", 4)]);
    }

    #[test]
    fn test_parse_unterminated_placeholder() {
        let err = Parser::new("Hello {{name").parse().unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
        let message = err.to_string();
        assert!(message.contains("\"Hello {{na...\""), "{}", message);
        assert!(message.contains("line 1 and column 7"), "{}", message);
    }

    #[test]
    fn test_parse_unterminated_at_end_of_input() {
        let err = Parser::new("line one\nand {{").parse().unwrap_err();
        assert!(err.to_string().contains("line 2 and column 5"));
    }

    #[test]
    fn test_parse_short_template_excerpt_has_no_ellipsis() {
        let err = Parser::new("{{x").parse().unwrap_err();
        assert!(err.to_string().contains("\"{{x\""));
    }

    #[test]
    fn test_parse_multibyte_columns() {
        let sections = Parser::new("héllo {{name}}").parse().unwrap();
        assert_eq!(sections[1], dynamic("name", 6));
    }
}
