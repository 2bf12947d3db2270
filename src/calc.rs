// calc.rs

use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;
use crate::eval::{ArithmeticEvaluator, ExpressionEvaluator};
use crate::history::{CalculationRecord, HistoryStore};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator { Add, Sub, Mul, Div, Rem }

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mul => Ok(a * b),
            Operator::Div if b == 0.0 => Err(CalcError::DivideByZero),
            Operator::Div => Ok(a / b),
            Operator::Rem if b == 0.0 => Err(CalcError::ModuloByZero),
            Operator::Rem => Ok(a % b),
        }
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            "%" => Ok(Operator::Rem),
            other => Err(CalcError::UnrecognizedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parses one operand as typed by the user. Only digit literals are
/// accepted, so words like `nan` or `inf` are rejected.
pub fn parse_operand(input: &str) -> Result<f64, CalcError> {
    let text = input.trim();
    if !text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')) {
        return Err(CalcError::Format);
    }
    text.parse::<f64>().map_err(|_| CalcError::Format)
}

/// Runs calculations and records the successful ones.
///
/// History is only touched after a calculation has fully succeeded.
pub struct Calculator<E = ArithmeticEvaluator> {
    evaluator: E,
}

impl Calculator<ArithmeticEvaluator> {
    pub fn new() -> Self {
        Self { evaluator: ArithmeticEvaluator }
    }
}

impl Default for Calculator<ArithmeticEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ExpressionEvaluator> Calculator<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// `num1 op num2`, where `op` is still the raw text the user typed.
    pub fn basic(
        &self,
        history: &mut HistoryStore,
        num1: f64,
        op: &str,
        num2: f64,
    ) -> Result<CalculationRecord, CalcError> {
        let operator: Operator = op.parse()?;
        let result = operator.apply(num1, num2)?;
        let record = CalculationRecord::new(format!("{} {} {} = {}", num1, operator, num2, result));
        log::info!("recorded `{}`", record);
        history.append(record.clone());
        Ok(record)
    }

    pub fn advanced(&self, history: &mut HistoryStore, expression: &str) -> Result<CalculationRecord, CalcError> {
        let result = self.evaluator.evaluate(expression)?;
        let record = CalculationRecord::new(format!("{} = {}", expression, result));
        log::info!("recorded `{}`", record);
        history.append(record.clone());
        Ok(record)
    }
}
