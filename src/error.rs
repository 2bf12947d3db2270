// error.rs

use thiserror::Error;

use crate::eval::EvalError;

/// Everything that can go wrong in a single calculation attempt.
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("operand is not a number")]
    Format,
    #[error("unknown operator `{0}`")]
    UnrecognizedOperation(String),
    #[error("division by zero")]
    DivideByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("{0}")]
    Unexpected(String),
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Syntax(msg) => CalcError::Syntax(msg),
            EvalError::Evaluation(msg) => CalcError::Evaluation(msg),
            EvalError::DivideByZero => CalcError::DivideByZero,
        }
    }
}

impl From<anyhow::Error> for CalcError {
    fn from(err: anyhow::Error) -> Self {
        CalcError::Unexpected(err.to_string())
    }
}
