mod expr;
mod value;

use std::{fmt::Display, iter::Peekable, vec};

use cursor::Line;
use errors::GoxError;
use log::trace;
use scanner::{Token, TokenKind};

pub use expr::Expr;
pub use value::Value;

use TokenKind::*;

pub type Result<T> = std::result::Result<T, ParserError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedPrimaryExpression,
    #[error("Expect ')' after expression.")]
    MissingRightParen,
    #[error("Expect end of expression.")]
    ExpectedEndOfInput,
    #[error("Invalid number literal.")]
    InvalidNumberLiteral,
    #[error("Expression nested too deeply.")]
    TooDeeplyNested,
}

/// Grammar violation, together with the token it was detected at.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub struct ParserError {
    pub error: ParserErrorType,
    pub token: Token,
}

impl ParserError {
    pub fn new(error: ParserErrorType, token: Token) -> Self {
        Self { error, token }
    }

    fn message(&self) -> String {
        match self.token.kind {
            Eof => format!("Error at end: {}", self.error),
            _ => format!("Error at '{}': {}", self.token.lexeme, self.error),
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.token.line, self.message())
    }
}

impl From<ParserError> for GoxError {
    fn from(error: ParserError) -> Self {
        GoxError::new(error.token.line, None, error.message())
    }
}

/// Optional extensions of the expression grammar. Everything is off by
/// default, in which case each binary precedence layer accepts at most one
/// operator and a parenthesized group may only contain a primary expression.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    /// Fold repeated operators of one precedence layer to the left, so that
    /// `1 + 2 + 3` parses as `((1 + 2) + 3)`.
    pub chain_operators: bool,
    /// Accept any expression between parentheses, not just a primary one.
    pub group_expressions: bool,
}

/// Deepest run of unary operators and parentheses a single expression may
/// contain.
pub const MAX_NESTING: usize = 128;

/// Parses `tokens` into a single expression using the default grammar.
pub fn parse(tokens: Vec<Token>) -> Result<Expr> {
    Parser::new(tokens).parse()
}

#[derive(Debug)]
pub struct Parser {
    tokens: Peekable<vec::IntoIter<Token>>,
    grammar: Grammar,
    line: Line,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_grammar(tokens, Grammar::default())
    }

    pub fn with_grammar(tokens: Vec<Token>, grammar: Grammar) -> Self {
        Self { tokens: tokens.into_iter().peekable(), grammar, line: Line(1), depth: 0 }
    }

    /// Parses exactly one expression followed by the end of input. The first
    /// grammar violation aborts the parse.
    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.expression()?;
        self.consume_or_error(Eof, ParserErrorType::ExpectedEndOfInput)?;
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        self.binary(&[EqualEqual, BangEqual], Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.binary(&[Greater, GreaterEqual, Less, LessEqual], Self::term)
    }

    fn term(&mut self) -> Result<Expr> {
        self.binary(&[Plus, Minus], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr> {
        self.binary(&[Star, Slash], Self::unary)
    }

    fn binary(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let mut expr = operand(self)?;

        while let Some(operator) = self.consume_any(operators) {
            trace!("Binary operator {} at line {}", operator.kind, operator.line);
            let right = operand(self)?;
            expr = Expr::binary(expr, operator.kind, right);

            if !self.grammar.chain_operators {
                break;
            }
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(operator) = self.consume_any(&[Minus, Bang]) {
            trace!("Unary operator {} at line {}", operator.kind, operator.line);
            let right = self.nested(&operator, Self::unary)?;
            return Ok(Expr::unary(operator.kind, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        let token = self.advance();
        trace!("Primary {:?} {:?}", token.kind, token.lexeme);
        match token.kind {
            False => Ok(Expr::literal(false)),
            True => Ok(Expr::literal(true)),
            Null => Ok(Expr::literal(Value::Null)),
            Number => match decode_number(&token.lexeme) {
                Some(n) => Ok(Expr::literal(n)),
                None => Err(ParserError::new(ParserErrorType::InvalidNumberLiteral, token)),
            },
            Str => Ok(Expr::literal(unescape(&token.lexeme))),
            LeftParen => {
                let inner = self.nested(&token, |p| {
                    if p.grammar.group_expressions { p.expression() } else { p.primary() }
                })?;
                self.consume_or_error(RightParen, ParserErrorType::MissingRightParen)?;
                Ok(Expr::group(inner))
            }
            _ => Err(ParserError::new(ParserErrorType::ExpectedPrimaryExpression, token)),
        }
    }
}

// Helpers
impl Parser {
    /// Next token. A token list that lacks the trailing `Eof` behaves as if
    /// it had one.
    fn advance(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.line = token.line;
                token
            }
            None => Token::eof(self.line),
        }
    }

    /// Runs `parse` one nesting level deeper, `at` being the token that opened
    /// the level.
    fn nested(
        &mut self,
        at: &Token,
        parse: impl FnOnce(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(ParserError::new(ParserErrorType::TooDeeplyNested, at.clone()));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn consume_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let token = self.tokens.next_if(|t| kinds.contains(&t.kind))?;
        self.line = token.line;
        Some(token)
    }

    fn consume_or_error(&mut self, kind: TokenKind, error: ParserErrorType) -> Result<Token> {
        match self.consume_any(&[kind]) {
            Some(token) => Ok(token),
            None if kind == Eof && self.tokens.peek().is_none() => Ok(Token::eof(self.line)),
            None => Err(ParserError::new(error, self.advance())),
        }
    }
}

fn decode_number(lexeme: &str) -> Option<f64> {
    if !lexeme.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    lexeme.parse().ok()
}

/// Resolves `\"`, `\\`, `\n` and `\t`; any other backslash pair is kept as is.
fn unescape(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => decoded.push('"'),
            Some('\\') => decoded.push('\\'),
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            }
            None => decoded.push('\\'),
        }
    }
    decoded
}
