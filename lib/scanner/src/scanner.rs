use std::fmt::Display;

use cursor::{Col, Cursor, Line};
use errors::GoxError;
use itertools::Itertools;
use log::{debug, trace};

pub mod token;
pub use token::{Token, TokenKind};
use TokenKind::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string \"{0}\".")]
    UnterminatedString(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}, col {col}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
    pub col: Col,
}

impl ScanError {
    pub fn new(error: ScanErrorType, line: Line, col: Col) -> Self {
        Self { error, line, col }
    }
}

impl From<ScanError> for GoxError {
    fn from(e: ScanError) -> Self {
        GoxError::new(e.line, Some(e.col), format!("Error: {}", e.error))
    }
}

#[derive(thiserror::Error, Debug, Default, Clone, PartialEq)]
pub struct ScanErrors(pub Vec<ScanError>);

impl ScanErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for ScanErrors {
    type Item = ScanError;
    type IntoIter = std::vec::IntoIter<ScanError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for ScanErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Tokenizes `source`, returning every token it could recognize (always
/// terminated by `Eof`) together with every lexical error it hit.
pub fn tokenize(source: &str) -> (Vec<Token>, ScanErrors) {
    Scanner::new(source).scan_tokens()
}

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    errors: ScanErrors,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: source.into(), tokens: Vec::new(), errors: ScanErrors::default() }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, ScanErrors) {
        loop {
            let start = self.cursor.clone();
            match self.cursor.next() {
                Some(c) => self.scan_token(c, start),
                None => break,
            }
        }
        self.tokens.push(Token::eof(self.cursor.line()));

        debug!("Scanned {} tokens, {} errors", self.tokens.len(), self.errors.len());
        (self.tokens, self.errors)
    }

    fn scan_token(&mut self, c: char, start: Cursor<'a>) {
        match c {
            // The cursor already bumped the line counter.
            '\n' => (),
            c if c.is_whitespace() => (),

            '(' => self.add_token(LeftParen, &start),
            ')' => self.add_token(RightParen, &start),
            '{' => self.add_token(LeftBrace, &start),
            '}' => self.add_token(RightBrace, &start),
            ',' => self.add_token(Comma, &start),
            '.' => self.add_token(Dot, &start),
            '-' => self.add_token(Minus, &start),
            '+' => self.add_token(Plus, &start),
            ';' => self.add_token(Semicolon, &start),
            '*' => self.add_token(Star, &start),

            '!' => self.add_one_or_two_char_token(Bang, BangEqual, &start),
            '=' => self.add_one_or_two_char_token(Equal, EqualEqual, &start),
            '>' => self.add_one_or_two_char_token(Greater, GreaterEqual, &start),
            '<' => self.add_one_or_two_char_token(Less, LessEqual, &start),

            '/' => {
                if self.cursor.next_if_eq('/') {
                    // Comment
                    self.cursor.eat_while(|c| c != '\n');
                } else {
                    self.add_token(Slash, &start)
                }
            }

            '"' => self.string(&start),

            d if d.is_ascii_digit() => self.number(&start),

            c if c.is_alphabetic() => self.identifier(&start),

            c => self.error(ScanErrorType::UnexpectedCharacter(c), start.line(), start.col()),
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: &Cursor<'a>) {
        let token = Token::new(kind, start.slice_until(&self.cursor), start.line());
        trace!("Scanned {:?} {:?} at line {}", token.kind, token.lexeme, token.line);
        self.tokens.push(token);
    }

    fn add_one_or_two_char_token(
        &mut self,
        single: TokenKind,
        double: TokenKind,
        start: &Cursor<'a>,
    ) {
        let kind = if self.cursor.next_if_eq('=') { double } else { single };
        self.add_token(kind, start)
    }

    fn error(&mut self, error: ScanErrorType, line: Line, col: Col) {
        trace!("Scan error at line {line}, col {col}: {error}");
        self.errors.0.push(ScanError::new(error, line, col));
    }

    fn string(&mut self, start: &Cursor<'a>) {
        let content_start = self.cursor.clone();
        loop {
            match self.cursor.peek() {
                Some('"') => break,
                Some('\\') => {
                    // Whatever follows the backslash can't close the literal.
                    self.cursor.next();
                    self.cursor.next();
                }
                Some(_) => {
                    self.cursor.next();
                }
                None => {
                    let content = content_start.slice_until(&self.cursor).to_string();
                    self.error(
                        ScanErrorType::UnterminatedString(content),
                        self.cursor.line(),
                        start.col(),
                    );
                    return;
                }
            }
        }

        let content = content_start.slice_until(&self.cursor);
        self.cursor.next(); // closing quote
        let token = Token::new(Str, content, start.line());
        trace!("Scanned {:?} {:?} at line {}", token.kind, token.lexeme, token.line);
        self.tokens.push(token);
    }

    fn number(&mut self, start: &Cursor<'a>) {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next(); // '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        self.add_token(Number, start)
    }

    fn identifier(&mut self, start: &Cursor<'a>) {
        self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
        let kind = TokenKind::keyword(start.slice_until(&self.cursor)).unwrap_or(Identifier);
        self.add_token(kind, start)
    }
}
