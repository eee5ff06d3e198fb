//! OpenStep (old-style ASCII) property list parser
//!
//! `project.pbxproj` files use the NeXTSTEP text format: dictionaries in
//! `{ key = value; }`, arrays in `( a, b, )`, strings bare or quoted, and
//! binary data in `<hex>`. Comments (`//` and `/* */`) are discarded; the
//! writer regenerates the ones Xcode expects.
//!
//! Every scalar is kept as [`Value::String`]: the format has no typed numbers
//! and Xcode round-trips `objectVersion = 56;` as text.

use crate::{Error, Result};
use plist::{Dictionary, Value};

/// Parse a complete property list document.
///
/// # Errors
///
/// Returns [`Error::Parse`] with the 1-based line and column of the first
/// offending character.
pub fn parse(text: &str) -> Result<Value> {
    let mut parser = Parser::new(text);
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("Unexpected '{}' after root object", c)));
    }
    Ok(value)
}

/// Characters allowed in an unquoted string
pub(crate) fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("Expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("Expected '{}', found end of file", expected))),
        }
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_next(), Some('/') | Some('*'))
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(Error::Parse {
                                    line,
                                    column,
                                    message: "Unterminated comment".into(),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some('{') => self.parse_dictionary().map(Value::Dictionary),
            Some('(') => self.parse_array().map(Value::Array),
            Some('<') => self.parse_data().map(Value::Data),
            Some('"') | Some('\'') => self.parse_quoted().map(Value::String),
            Some(c) if is_unquoted_char(c) => Ok(Value::String(self.parse_unquoted())),
            Some(c) => Err(self.error(format!("Unexpected '{}'", c))),
            None => Err(self.error("Unexpected end of file")),
        }
    }

    fn parse_dictionary(&mut self) -> Result<Dictionary> {
        self.expect('{')?;
        let mut dict = Dictionary::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(dict);
            }
            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            self.skip_trivia()?;
            self.expect(';')?;
            dict.insert(key, value);
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_quoted(),
            Some(c) if is_unquoted_char(c) => Ok(self.parse_unquoted()),
            Some(c) => Err(self.error(format!("Expected dictionary key, found '{}'", c))),
            None => Err(self.error("Unterminated dictionary")),
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Value>> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.bump();
                return Ok(items);
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {}
                Some(c) => return Err(self.error(format!("Expected ',' or ')', found '{}'", c))),
                None => return Err(self.error("Unterminated array")),
            }
        }
    }

    fn parse_data(&mut self) -> Result<Vec<u8>> {
        self.expect('<')?;
        let mut digits = Vec::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some(c) if c.is_whitespace() => {}
                Some(c) => match c.to_digit(16) {
                    Some(d) => digits.push(d as u8),
                    None => return Err(self.error(format!("Invalid hex digit '{}' in data", c))),
                },
                None => return Err(self.error("Unterminated data")),
            }
        }
        if digits.len() % 2 != 0 {
            return Err(self.error("Odd number of hex digits in data"));
        }
        Ok(digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect())
    }

    fn parse_unquoted(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !is_unquoted_char(c) || self.at_comment() {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn parse_quoted(&mut self) -> Result<String> {
        let (line, column) = (self.line, self.column);
        let quote = match self.bump() {
            Some(q) => q,
            None => return Err(self.error("Expected string")),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some(c) => out.push(c),
                None => {
                    return Err(Error::Parse {
                        line,
                        column,
                        message: "Unterminated string".into(),
                    });
                }
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("Unterminated escape sequence"))?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            'U' | 'u' => {
                let code = self.read_digits(16, 4);
                char::from_u32(code).ok_or_else(|| self.error("Invalid unicode escape"))?
            }
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or_else(|| self.error("Invalid octal escape"))?
            }
            other => other,
        };
        Ok(decoded)
    }

    fn read_digits(&mut self, radix: u32, max: usize) -> u32 {
        let mut code = 0;
        for _ in 0..max {
            match self.peek().and_then(|d| d.to_digit(radix)) {
                Some(d) => {
                    code = code * radix + d;
                    self.bump();
                }
                None => break,
            }
        }
        code
    }
}
