//! Decoder for Apple `.strings` files.
//!
//! A `.strings` file is an old-style property-list dictionary of string
//! values:
//!
//! ```text
//! /* Title of the home screen */
//! "home.title" = "Welcome";
//! apples$one = "{#n} apple";
//! ```
//!
//! The outer braces are optional, keys and values may be quoted or bare, and
//! both comment styles are accepted anywhere whitespace is.

use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use tracing::warn;

use crate::{error::Error, traits::Parser};

/// The flat key-value content of one `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Raw values by raw key, duplicates resolved last-wins.
    pub entries: BTreeMap<String, String>,
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(Error::Io)?;

        let entries = Scanner::new(&content).parse_dictionary()?;
        Ok(Format { entries })
    }

    /// Override default file reading to support BOM-aware decoding (e.g., UTF-16 Apple .strings)
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // A BOM selects UTF-16; anything else is read as UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

impl From<Format> for BTreeMap<String, String> {
    fn from(value: Format) -> Self {
        value.entries
    }
}

fn is_bare_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | ':' | '/' | '-' | '+')
}

struct Scanner {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Scanner {
    fn new(content: &str) -> Self {
        Scanner {
            chars: content.trim_start_matches('\u{feff}').chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl std::fmt::Display) -> Error {
        Error::decode_error(format!(
            "line {}, column {}: {}",
            self.line, self.column, message
        ))
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let opening = self.error("unterminated comment");
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(opening),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_dictionary(&mut self) -> Result<BTreeMap<String, String>, Error> {
        let mut entries = BTreeMap::new();

        self.skip_trivia()?;
        let braced = self.peek() == Some('{');
        if braced {
            self.bump();
        }

        loop {
            self.skip_trivia()?;
            match self.peek() {
                None if braced => return Err(self.error("missing closing '}'")),
                None => break,
                Some('}') if braced => {
                    self.bump();
                    self.skip_trivia()?;
                    if let Some(c) = self.peek() {
                        return Err(self.error(format!("unexpected '{c}' after dictionary")));
                    }
                    break;
                }
                Some(_) => {
                    let (key, value) = self.parse_entry()?;
                    if let Some(previous) = entries.insert(key.clone(), value) {
                        warn!(key = %key, previous = %previous, "duplicate key, keeping the last value");
                    }
                }
            }
        }

        Ok(entries)
    }

    fn parse_entry(&mut self) -> Result<(String, String), Error> {
        let key = self.parse_string()?;
        self.skip_trivia()?;

        // `"key";` is shorthand for `"key" = "key";`
        if self.peek() == Some(';') {
            self.bump();
            return Ok((key.clone(), key));
        }

        self.expect('=')?;
        self.skip_trivia()?;
        if matches!(self.peek(), Some('{' | '(' | '<')) {
            return Err(self.error(format!("value of '{key}' is not a string")));
        }
        let value = self.parse_string()?;
        self.skip_trivia()?;
        self.expect(';')?;

        Ok((key, value))
    }

    fn parse_string(&mut self) -> Result<String, Error> {
        match self.peek() {
            Some('"') => self.parse_quoted(),
            Some(c) if is_bare_character(c) => {
                let mut result = String::new();
                while let Some(c) = self.peek().filter(|c| is_bare_character(*c)) {
                    result.push(c);
                    self.bump();
                }
                Ok(result)
            }
            Some(c) => Err(self.error(format!("unexpected '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_quoted(&mut self) -> Result<String, Error> {
        let opening = self.error("unterminated string");
        self.bump();

        let mut result = String::new();
        loop {
            match self.bump() {
                None => return Err(opening),
                Some('"') => return Ok(result),
                Some('\\') => self.parse_escape(&mut result)?,
                Some(c) => result.push(c),
            }
        }
    }

    fn parse_escape(&mut self, result: &mut String) -> Result<(), Error> {
        match self.bump() {
            Some('a') => result.push('\u{7}'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('v') => result.push('\u{b}'),
            Some(c @ '0'..='7') => {
                let code = self.parse_digits(c.to_digit(8).unwrap_or(0), 8, 2);
                result.push(
                    char::from_u32(code).ok_or_else(|| self.error("invalid octal escape"))?,
                );
            }
            Some('u' | 'U') => {
                let unit = self.parse_code_unit()?;
                let c = if (0xD800..0xDC00).contains(&unit) {
                    let high = unit;
                    let low = match (self.bump(), self.bump()) {
                        (Some('\\'), Some('u' | 'U')) => self.parse_code_unit()?,
                        _ => return Err(self.error("unpaired surrogate in unicode escape")),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("unpaired surrogate in unicode escape"));
                    }
                    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                } else {
                    char::from_u32(unit)
                };
                result.push(c.ok_or_else(|| self.error("invalid unicode escape"))?);
            }
            // `\"`, `\\`, `\'` and any other character stand for themselves.
            Some(c) => result.push(c),
            None => return Err(self.error("unterminated escape sequence")),
        }
        Ok(())
    }

    /// Consumes up to `max` further digits in `radix`, accumulating onto `value`.
    fn parse_digits(&mut self, mut value: u32, radix: u32, max: usize) -> u32 {
        for _ in 0..max {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(radix)) else {
                break;
            };
            self.bump();
            value = value * radix + digit;
        }
        value
    }

    /// One to four hex digits after `\U`.
    fn parse_code_unit(&mut self) -> Result<u32, Error> {
        let first = self
            .peek()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| self.error("invalid unicode escape"))?;
        self.bump();
        Ok(self.parse_digits(first, 16, 3))
    }
}
