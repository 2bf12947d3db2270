// eval/mod.rs

// `ExpressionEvaluator` is what the calculator depends on. `ArithmeticEvaluator`
// is the built-in one: tokenize, recursive-descent parse, then evaluate over f64.

mod lexer;
mod parser;

use thiserror::Error;

use parser::{BinOp, Expr};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("evaluation error: {0}")]
    Evaluation(String),
    #[error("division by zero")]
    DivideByZero,
}

/// Evaluates `+ - * / %` expressions with parentheses and the usual
/// precedence.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

impl<E: ExpressionEvaluator + ?Sized> ExpressionEvaluator for &E {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        (**self).evaluate(expression)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticEvaluator;

impl ExpressionEvaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let tokens = lexer::tokenize(expression)?;
        let ast = parser::parse(tokens)?;
        let value = eval(&ast)?;
        if !value.is_finite() {
            return Err(EvalError::Evaluation(format!("result `{}` is out of range", value)));
        }
        Ok(value)
    }
}

fn eval(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(text) => text
            .parse::<f64>()
            .map_err(|_| EvalError::Evaluation(format!("`{}` is not a valid number", text))),
        Expr::Neg(inner) => Ok(-eval(inner)?),
        Expr::Chain(first, rest) => {
            let mut acc = eval(first)?;
            for (op, rhs) in rest {
                acc = apply(*op, acc, eval(rhs)?)?;
            }
            Ok(acc)
        }
    }
}

fn apply(op: BinOp, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        BinOp::Add => Ok(a + b),
        BinOp::Sub => Ok(a - b),
        BinOp::Mul => Ok(a * b),
        BinOp::Div if b == 0.0 => Err(EvalError::DivideByZero),
        BinOp::Div => Ok(a / b),
        BinOp::Rem if b == 0.0 => Err(EvalError::DivideByZero),
        BinOp::Rem => Ok(a % b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_str(s: &str) -> Result<f64, EvalError> {
        ArithmeticEvaluator.evaluate(s)
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(eval_str("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval_str("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval_str("5 + 10 - 3 * 2"), Ok(9.0));
        assert_eq!(eval_str("7 % 3 + 4 * 2"), Ok(9.0));
        assert_eq!(eval_str("(10 + 5) * 2 / 3"), Ok(10.0));
    }

    #[test]
    fn left_associative_division() {
        assert_eq!(eval_str("100 / 10 / 5"), Ok(2.0));
        assert_eq!(eval_str("10 - 4 - 3"), Ok(3.0));
    }

    #[test]
    fn unary_signs_and_decimals() {
        assert_eq!(eval_str("-3 * -2"), Ok(6.0));
        assert_eq!(eval_str("-(2 + 3)"), Ok(-5.0));
        assert_eq!(eval_str("+.5 + 1.5"), Ok(2.0));
        assert_eq!(eval_str("1e2 / 4"), Ok(25.0));
        assert_eq!(eval_str("5 / 2"), Ok(2.5));
    }

    #[test]
    fn zero_divisor_is_reported() {
        assert_eq!(eval_str("5 / 0"), Err(EvalError::DivideByZero));
        assert_eq!(eval_str("5 % (3 - 3)"), Err(EvalError::DivideByZero));
        assert_eq!(eval_str("1 / -0"), Err(EvalError::DivideByZero));
    }

    #[test]
    fn syntax_is_checked_before_evaluation() {
        assert!(matches!(eval_str("5 / 0 +"), Err(EvalError::Syntax(_))));
        assert!(matches!(eval_str("abc"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn long_flat_expressions_do_not_recurse() {
        let sum = vec!["1"; 200_000].join("+");
        assert_eq!(eval_str(&sum), Ok(200_000.0));
        let product = vec!["1"; 200_000].join(" * ");
        assert_eq!(eval_str(&product), Ok(1.0));
    }

    #[test]
    fn evaluation_errors() {
        assert!(matches!(eval_str("1.2.3 + 1"), Err(EvalError::Evaluation(_))));
        assert!(matches!(eval_str("1e308 * 10"), Err(EvalError::Evaluation(_))));
    }
}
