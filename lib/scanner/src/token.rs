use std::{collections::HashMap, fmt::Display, sync::LazyLock};

use cursor::Line;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: Line) -> Self {
        Self { kind, lexeme: lexeme.into(), line }
    }

    /// Token whose lexeme is the canonical text of `kind`.
    ///
    /// Literal kinds (`Identifier`, `Str`, `Number`) have no canonical text
    /// and get an empty lexeme.
    pub fn fixed(kind: TokenKind, line: Line) -> Self {
        Self::new(kind, kind.fixed_lexeme().unwrap_or_default(), line)
    }

    pub fn eof(line: Line) -> Self {
        Self::fixed(TokenKind::Eof, line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    Str,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Function,
    For,
    If,
    Null,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

use TokenKind::*;

static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    TokenKind::iter()
        .filter(|kind| kind.is_keyword())
        .filter_map(|kind| Some((kind.fixed_lexeme()?, kind)))
        .collect()
});

impl TokenKind {
    /// The text every token of this kind is spelled with, if it is fixed.
    pub fn fixed_lexeme(self) -> Option<&'static str> {
        Some(match self {
            LeftParen => "(",
            RightParen => ")",
            LeftBrace => "{",
            RightBrace => "}",
            Comma => ",",
            Dot => ".",
            Minus => "-",
            Plus => "+",
            Semicolon => ";",
            Slash => "/",
            Star => "*",
            Bang => "!",
            BangEqual => "!=",
            Equal => "=",
            EqualEqual => "==",
            Greater => ">",
            GreaterEqual => ">=",
            Less => "<",
            LessEqual => "<=",
            And => "and",
            Class => "class",
            Else => "else",
            False => "false",
            Function => "function",
            For => "for",
            If => "if",
            Null => "null",
            Or => "or",
            Print => "print",
            Return => "return",
            Super => "super",
            This => "this",
            True => "true",
            Var => "var",
            While => "while",
            Eof => "",
            Identifier | Str | Number => return None,
        })
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            And | Class
                | Else
                | False
                | Function
                | For
                | If
                | Null
                | Or
                | Print
                | Return
                | Super
                | This
                | True
                | Var
                | While
        )
    }

    /// Looks `word` up in the reserved keyword table.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS.get(word).copied()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier => write!(f, "identifier"),
            Str => write!(f, "string"),
            Number => write!(f, "number"),
            Eof => write!(f, "end"),
            kind => write!(f, "{}", kind.fixed_lexeme().unwrap_or_default()),
        }
    }
}
