use std::io::Write;

use errors::{GoxError, GoxErrors};
use log::debug;
use parser::Parser;

mod compute;
pub use compute::{Compute, RuntimeError};
pub use parser::{Expr, Grammar, Value};

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    /// Every lexical error of the source, followed by the grammar error if
    /// parsing failed.
    #[error("{0}")]
    CompileError(GoxErrors),
    #[error("{0}")]
    RuntimeError(#[from] RuntimeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InterpretError>;

/// Source → tokens → tree → value pipeline.
#[derive(Debug, Default, Clone)]
pub struct Interpreter {
    grammar: Grammar,
    print_tree: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Also write the parsed tree's canonical text before each value.
    pub fn with_tree_output(mut self, print_tree: bool) -> Self {
        self.print_tree = print_tree;
        self
    }

    pub fn parse_source(&self, source: &str) -> Result<Expr> {
        let (tokens, scan_errors) = scanner::tokenize(source);
        let mut errors: GoxErrors = scan_errors.into_iter().map(GoxError::from).collect();

        match Parser::with_grammar(tokens, self.grammar).parse() {
            Ok(expr) if errors.is_empty() => {
                debug!("Parsed {expr}");
                Ok(expr)
            }
            Ok(_) => Err(InterpretError::CompileError(errors)),
            Err(e) => {
                debug!("Parsing failed: {e}");
                errors.push(e.into());
                Err(InterpretError::CompileError(errors))
            }
        }
    }

    pub fn run_source(&self, source: &str, output: &mut impl Write) -> Result<()> {
        let expr = self.parse_source(source)?;
        if self.print_tree {
            writeln!(output, "{expr}")?;
        }

        let value = expr.compute()?;
        debug!("Computed {value:?}");
        writeln!(output, "{value}")?;
        Ok(())
    }
}
