//! Character-level scanning over an expression string.

use super::ParseError;

/// Position in the input plus a nesting guard.
pub(super) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn restore(&mut self, position: usize) {
        self.pos = position;
    }

    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(super) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    pub(super) fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest().is_empty()
    }

    /// Consumes `expected` after optional whitespace.
    pub(super) fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.eat_raw(expected)
    }

    /// Consumes `expected` only if it is the very next character.
    pub(super) fn eat_raw(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            let found = self.peek().map_or("end of input".to_string(), |c| format!("'{}'", c));
            Err(self.error(format!("Expected '{}' but found {}", expected, found)))
        }
    }

    pub(super) fn peek_identifier(&self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let end = chars
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map_or(rest.len(), |(index, _)| index);
        Some(&rest[..end])
    }

    pub(super) fn identifier(&mut self) -> Option<&'a str> {
        let word = self.peek_identifier()?;
        self.pos += word.len();
        Some(word)
    }

    pub(super) fn expect_identifier(&mut self) -> Result<&'a str, ParseError> {
        self.skip_whitespace();
        self.identifier().ok_or_else(|| self.error("Expected a name"))
    }

    /// Consumes `keyword` after optional whitespace if it appears as a whole word.
    pub(super) fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        if self.peek_identifier() == Some(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    pub(super) fn peek_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        self.peek_identifier() == Some(keyword)
    }

    /// Reads `-?digits[.digits][(e|E)[+-]digits]`.
    pub(super) fn number(&mut self) -> Option<&'a str> {
        let start = self.pos;
        self.eat_raw('-');
        if !self.skip_digits() {
            self.pos = start;
            return None;
        }
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.skip_digits();
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let exponent_start = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if !self.skip_digits() {
                self.pos = exponent_start;
            }
        }
        Some(&self.input[start..self.pos])
    }

    fn skip_digits(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        self.pos > start
    }

    /// Reads a single- or double-quoted string, returning its contents with
    /// backslash escapes resolved.
    pub(super) fn quoted(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.error("Expected a quoted string")),
        };
        let start = self.pos;
        self.bump();
        let mut content = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(content),
                Some('\\') => match self.bump() {
                    Some(escaped) => content.push(escaped),
                    None => break,
                },
                Some(c) => content.push(c),
                None => break,
            }
        }
        self.pos = start;
        Err(self.error("Unterminated string"))
    }

    /// Whether the next non-blank character is `expected`.
    pub(super) fn peek_is(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.peek() == Some(expected)
    }

    /// Whether `word` comes next as a bare name rather than a functor.
    pub(super) fn peek_bare_word(&mut self, word: &str) -> bool {
        self.skip_whitespace();
        self.peek_identifier() == Some(word) && !self.rest()[word.len()..].starts_with('(')
    }

    pub(super) fn peek_is_quote(&mut self) -> bool {
        self.skip_whitespace();
        matches!(self.peek(), Some('"' | '\''))
    }

    /// Consumes raw text up to (not including) the `)` closing the current argument list.
    pub(super) fn raw_until_close(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let mut open = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '(' => open += 1,
                ')' if open == 0 => return Ok(self.input[start..self.pos].trim()),
                ')' => open -= 1,
                _ => {}
            }
            self.bump();
        }
        Err(self.error("Expected ')' but found end of input"))
    }

    pub(super) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep(self.max_depth));
        }
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            position: self.pos,
            input: self.input.to_string(),
        }
    }
}
