//! Free text inside the expression notation.

use std::fmt;

/// Text rendered as a quoted literal. Backslashes and the quote character
/// are escaped with a backslash.
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a> {
    text: &'a str,
    quote: char,
}

impl<'a> Quoted<'a> {
    pub fn double(text: &'a str) -> Self {
        Self { text, quote: '"' }
    }

    pub fn single(text: &'a str) -> Self {
        Self { text, quote: '\'' }
    }
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quote)?;
        for c in self.text.chars() {
            if c == self.quote || c == '\\' {
                write!(f, "\\")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "{}", self.quote)
    }
}

/// Text rendered bare when it reads back as a single name, quoted otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Word<'a>(pub &'a str);

impl Word<'_> {
    fn is_plain_name(&self) -> bool {
        let mut chars = self.0.chars();
        chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
    }
}

impl fmt::Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain_name() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}", Quoted::double(self.0))
        }
    }
}
