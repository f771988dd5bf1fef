//! `Key="Value"` attribute lists.
//!
//! Grammar, whitespace or commas between pairs:
//!
//! ```text
//! list  := (pair (sep pair)*)?
//! pair  := name ws* '=' ws* quoted
//! name  := [A-Za-z_:] [A-Za-z0-9_.:-]*
//! quoted := '"' ... '"' | '\'' ... '\''   (\" \' \\ escapes)
//! ```
//!
//! Values are taken literally; nothing is evaluated.

use crate::error::AttrParseError;
use indexmap::IndexMap;

pub fn parse_attributes(input: &str) -> Result<IndexMap<String, String>, AttrParseError> {
    let mut scanner = Scanner {
        chars: input.char_indices().collect(),
        pos: 0,
        len: input.len(),
    };
    let mut out = IndexMap::new();
    loop {
        scanner.skip_separators();
        if scanner.at_end() {
            return Ok(out);
        }
        let name = scanner.name()?;
        scanner.skip_whitespace();
        if !scanner.eat('=') {
            return Err(AttrParseError::ExpectedEquals {
                name,
                offset: scanner.offset(),
            });
        }
        scanner.skip_whitespace();
        let value = scanner.quoted(&name)?;
        if out.contains_key(&name) {
            return Err(AttrParseError::Duplicate(name));
        }
        out.insert(name, value);
    }
}

/// Render attributes in the format [`parse_attributes`] accepts.
pub fn format_attributes(attributes: &IndexMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(k, v)| {
            let escaped = v.replace('\\', "\\\\").replace('"', "\\\"");
            format!("{}=\"{}\"", k, escaped)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

struct Scanner {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Scanner {
    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    /// Byte offset of the current position.
    fn offset(&self) -> usize {
        self.chars.get(self.pos).map(|&(i, _)| i).unwrap_or(self.len)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace() || c == ',') {
            self.pos += 1;
        }
    }

    fn name(&mut self) -> Result<String, AttrParseError> {
        let start = self.offset();
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
            _ => return Err(AttrParseError::ExpectedName(start)),
        }
        let mut name = String::new();
        while let Some(c) = self
            .peek()
            .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-'))
        {
            name.push(c);
            self.pos += 1;
        }
        Ok(name)
    }

    fn quoted(&mut self, name: &str) -> Result<String, AttrParseError> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(AttrParseError::ExpectedValue {
                    name: name.to_string(),
                    offset: self.offset(),
                });
            }
        };
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(AttrParseError::Unterminated(name.to_string())),
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some('\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(c @ ('"' | '\'' | '\\')) => {
                            value.push(c);
                            self.pos += 1;
                        }
                        // Unknown escapes are kept verbatim.
                        _ => value.push('\\'),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }
}
