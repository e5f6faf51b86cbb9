use std::fmt::{self, Display, Formatter};

use scanner::TokenKind;

use crate::Value;

/// Expression tree. Every child is exclusively owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// `operator` is `Minus` or `Bang` when built by the parser.
    Unary { operator: TokenKind, right: Box<Expr> },
    Binary { left: Box<Expr>, operator: TokenKind, right: Box<Expr> },
    /// Explicit parentheses. Transparent on evaluation, visible when printed.
    Group(Box<Expr>),
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn unary(operator: TokenKind, right: Expr) -> Self {
        Expr::Unary { operator, right: Box::new(right) }
    }

    pub fn binary(left: Expr, operator: TokenKind, right: Expr) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Unary { operator, right } => write!(f, "({}{})", operator, right),
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expr::Group(inner) => write!(f, "({})", inner),
        }
    }
}
