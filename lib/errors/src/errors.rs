use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use cursor::{Col, Line};
use itertools::Itertools;

/// A rendered compile-time diagnostic, shared by the scanner and the parser.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub struct GoxError {
    pub line: Line,
    pub col: Option<Col>,
    pub message: String,
}

impl GoxError {
    pub fn new(line: Line, col: Option<Col>, message: impl ToString) -> Self {
        Self { line, col, message: message.to_string() }
    }
}

impl Display for GoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.col {
            Some(col) => write!(f, "[line {}, col {}] {}", self.line, col, self.message),
            None => write!(f, "[line {}] {}", self.line, self.message),
        }
    }
}

#[derive(thiserror::Error, Debug, Default, Clone, PartialEq)]
pub struct GoxErrors(pub Vec<GoxError>);

impl From<GoxError> for GoxErrors {
    fn from(e: GoxError) -> Self {
        Self(vec![e])
    }
}

impl FromIterator<GoxError> for GoxErrors {
    fn from_iter<T: IntoIterator<Item = GoxError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for GoxErrors {
    type Target = Vec<GoxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for GoxErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for GoxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_with_and_without_column() {
        let errors: GoxErrors = [
            GoxError::new(Line(1), Some(Col(5)), "Error: Unexpected character '@'."),
            GoxError::new(Line(2), None, "Error at end: Expect expression."),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            errors.to_string(),
            "[line 1, col 5] Error: Unexpected character '@'.\n[line 2] Error at end: Expect expression."
        );
        assert_eq!(errors.len(), 2);
    }
}
