use log::trace;
use parser::{Expr, Value};
use scanner::TokenKind::{self, *};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Operand must be a number, got {0}.")]
    UnaryOperandNotNumber(&'static str),
    #[error("Invalid operator '{0}' for unary numeric operation.")]
    InvalidUnaryOperator(TokenKind),
    #[error("Operands must be numbers, got {0} and {1}.")]
    BinaryOperandsNotNumbers(&'static str, &'static str),
    #[error("Invalid operator '{0}' for binary numeric operation.")]
    InvalidBinaryOperator(TokenKind),
}

/// Tree-walking evaluation. The first error met while walking the tree is
/// returned and nothing else is evaluated.
pub trait Compute {
    fn compute(&self) -> Result<Value, RuntimeError>;
}

impl Compute for Expr {
    fn compute(&self) -> Result<Value, RuntimeError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),

            Expr::Group(inner) => inner.compute(),

            Expr::Unary { operator, right } => {
                let right = right.compute()?;
                trace!("Computing {operator} {right:?}");
                match (operator, right) {
                    (Minus, Value::Number(n)) => Ok((-n).into()),
                    (op, Value::Number(_)) => Err(RuntimeError::InvalidUnaryOperator(*op)),
                    (_, v) => Err(RuntimeError::UnaryOperandNotNumber(v.type_name())),
                }
            }

            Expr::Binary { left, operator, right } => {
                let left = left.compute()?;
                let right = right.compute()?;
                trace!("Computing {left:?} {operator} {right:?}");
                match (&left, &right, operator) {
                    (Value::Number(l), Value::Number(r), Plus) => Ok((l + r).into()),
                    (Value::Number(l), Value::Number(r), Minus) => Ok((l - r).into()),
                    (Value::Number(l), Value::Number(r), Star) => Ok((l * r).into()),
                    (Value::Number(l), Value::Number(r), Slash) => Ok((l / r).into()),
                    (Value::Number(_), Value::Number(_), op) => {
                        Err(RuntimeError::InvalidBinaryOperator(*op))
                    }
                    _ => Err(RuntimeError::BinaryOperandsNotNumbers(
                        left.type_name(),
                        right.type_name(),
                    )),
                }
            }
        }
    }
}
