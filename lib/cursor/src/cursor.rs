use std::{
    fmt::{Debug, Formatter},
    str::Chars,
};

use derive_more::Display;

/// 1-based source line.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub usize);

/// 1-based column, counted in characters and reset after every newline.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Col(pub usize);

/// Character iterator over a source string that keeps track of the line and
/// column of the next character it will yield.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
    line: Line,
    col: Col,
}

impl<'a> Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Printing source and chars is usually to verbose, so by default
        // we only print line/col
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("col", &self.col)
                .field("rest", &self.chars.as_str())
                .finish()
        } else {
            f.debug_struct("Cursor").field("line", &self.line).field("col", &self.col).finish()
        }
    }
}

impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        (self.source, self.chars.as_str()) == (other.source, other.chars.as_str())
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars(), line: Line(1), col: Col(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn col(&self) -> Col {
        self.col
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Consumes the next character if it equals `expected`.
    pub fn next_if_eq(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as `pred` holds for the next one.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.next();
        }
    }

    /// Source text between `self` and `end`, where `end` is a clone of `self`
    /// that has been advanced further.
    pub fn slice_until(&self, end: &Cursor<'a>) -> &'a str {
        assert!(self.source == end.source);
        &self.source[(self.source.len() - self.chars.as_str().len())
            ..(self.source.len() - end.chars.as_str().len())]
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line.0 += 1;
            self.col = Col(1);
        } else {
            self.col.0 += 1;
        }
        Some(c)
    }
}
