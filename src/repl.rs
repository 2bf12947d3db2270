// repl.rs

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Color;
use rustyline::DefaultEditor;

use crate::calc::{parse_operand, Calculator};
use crate::config::{Settings, CALC_FAILURE_LEVEL};
use crate::error::CalcError;
use crate::eval::{ArithmeticEvaluator, ExpressionEvaluator};
use crate::history::{CalculationRecord, HistoryStore};
use crate::input::LineSource;
use crate::menu::{MenuChoice, Step};
use crate::presenter::{Presenter, CONTINUE_PROMPT, EXIT_PROMPT, MENU_PROMPT};

pub fn start_repl(settings: Settings) -> Result<()> {
    let editor = DefaultEditor::with_config(settings.editor_config()).context("failed to create line editor")?;
    let presenter = Presenter::new(io::stdout(), settings);
    let mut session = Session::new(editor, presenter, Calculator::with_evaluator(ArithmeticEvaluator));
    session.run()
}

/// Why a calculation attempt stopped before producing a record.
enum Interrupt {
    Closed,
    Failed(CalcError),
}

impl From<CalcError> for Interrupt {
    fn from(err: CalcError) -> Self {
        Interrupt::Failed(err)
    }
}

/// The menu loop. Owns the history for the lifetime of the session.
pub struct Session<I, W: Write, E = ArithmeticEvaluator> {
    input: I,
    presenter: Presenter<W>,
    calculator: Calculator<E>,
    history: HistoryStore,
}

impl<I: LineSource, W: Write, E: ExpressionEvaluator> Session<I, W, E> {
    pub fn new(input: I, presenter: Presenter<W>, calculator: Calculator<E>) -> Self {
        Self { input, presenter, calculator, history: HistoryStore::new() }
    }

    #[cfg(test)]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn run(&mut self) -> Result<()> {
        let last = loop {
            self.presenter.main_menu()?;
            let prompt = self.presenter.prompt(MENU_PROMPT);
            let Some(line) = self.input.read_line(&prompt)? else {
                break Step::Closed;
            };
            let choice = MenuChoice::parse(&line);
            log::debug!("menu input {:?} -> {:?}", line, choice);
            let step = match choice {
                MenuChoice::BasicCalculation => self.basic_calculation()?,
                MenuChoice::AdvancedCalculation => self.advanced_calculation()?,
                MenuChoice::ShowHistory => self.show_history()?,
                MenuChoice::ClearHistory => self.clear_history()?,
                MenuChoice::Exit => Step::Exit,
                MenuChoice::Invalid => {
                    self.presenter.error("Invalid option. Please try again.")?;
                    self.acknowledge(CONTINUE_PROMPT)?
                }
            };
            if step != Step::Menu {
                break step;
            }
        };
        self.presenter.plain("")?;
        self.presenter.message("Thank you for using the calculator!", Color::Cyan)?;
        if last == Step::Exit {
            self.acknowledge(EXIT_PROMPT)?;
        }
        Ok(())
    }

    fn acknowledge(&mut self, text: &str) -> Result<Step> {
        self.presenter.plain("")?;
        let prompt = self.presenter.prompt(text);
        match self.input.read_line(&prompt)? {
            Some(_) => Ok(Step::Menu),
            None => Ok(Step::Closed),
        }
    }

    fn ask(&mut self, text: &str) -> Result<String, Interrupt> {
        let prompt = self.presenter.prompt(text);
        match self.input.read_line(&prompt) {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(Interrupt::Closed),
            Err(err) => Err(Interrupt::Failed(err.into())),
        }
    }

    /// Shows the outcome of one attempt, then waits for the user.
    fn finish(&mut self, outcome: Result<CalculationRecord, Interrupt>) -> Result<Step> {
        match outcome {
            Ok(record) => self.presenter.result(record.as_str())?,
            Err(Interrupt::Closed) => return Ok(Step::Closed),
            Err(Interrupt::Failed(err)) => {
                log::log!(CALC_FAILURE_LEVEL, "calculation failed: {}", err);
                self.presenter.calc_error(&err)?;
            }
        }
        self.acknowledge(CONTINUE_PROMPT)
    }

    fn basic_calculation(&mut self) -> Result<Step> {
        self.presenter.screen("BASIC CALCULATION")?;
        let outcome = self.basic_attempt();
        self.finish(outcome)
    }

    fn basic_attempt(&mut self) -> Result<CalculationRecord, Interrupt> {
        let num1 = parse_operand(&self.ask("Enter the first number: ")?)?;
        let op = self.ask("Enter an operation (+, -, *, /, %): ")?;
        let num2 = parse_operand(&self.ask("Enter the second number: ")?)?;
        Ok(self.calculator.basic(&mut self.history, num1, &op, num2)?)
    }

    fn advanced_calculation(&mut self) -> Result<Step> {
        self.presenter.screen("ADVANCED CALCULATION")?;
        self.presenter.expression_help()?;
        let outcome = match self.ask("Enter your expression: ") {
            Ok(expression) => self
                .calculator
                .advanced(&mut self.history, &expression)
                .map_err(Interrupt::from),
            Err(interrupt) => Err(interrupt),
        };
        self.finish(outcome)
    }

    fn show_history(&mut self) -> Result<Step> {
        self.presenter.screen("CALCULATION HISTORY")?;
        self.presenter.history(&self.history)?;
        self.acknowledge(CONTINUE_PROMPT)
    }

    fn clear_history(&mut self) -> Result<Step> {
        self.presenter.screen("CLEAR HISTORY")?;
        let prompt = self.presenter.prompt("Are you sure you want to clear the calculation history? (Y/N): ");
        let Some(answer) = self.input.read_line(&prompt)? else {
            return Ok(Step::Closed);
        };
        self.presenter.plain("")?;
        if answer.to_uppercase() == "Y" {
            if self.history.is_empty() {
                log::debug!("history already empty");
            } else {
                log::info!("clearing {} history entries", self.history.len());
            }
            self.history.clear();
            self.presenter.message("History has been cleared successfully!", Color::Green)?;
        } else {
            self.presenter.plain("Operation cancelled. History remains intact.")?;
        }
        self.acknowledge(CONTINUE_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;

    type TestSession = Session<ScriptedInput, Vec<u8>>;

    fn run_script(lines: &[&str]) -> (TestSession, String) {
        let presenter = Presenter::new(Vec::new(), Settings::plain());
        let mut session = Session::new(ScriptedInput::new(lines.iter().copied()), presenter, Calculator::new());
        session.run().unwrap();
        let out = String::from_utf8(session.presenter.writer().clone()).unwrap();
        (session, out)
    }

    /// Panel bodies with borders removed, so wrapped messages read whole.
    fn panel_text(out: &str) -> String {
        out.lines()
            .filter_map(|l| l.strip_prefix("│  "))
            .map(|l| l.strip_suffix('│').unwrap_or(l))
            .collect()
    }

    fn records(session: &TestSession) -> Vec<String> {
        session.history().numbered().map(|(_, r)| r.to_string()).collect()
    }

    #[test]
    fn basic_calculation_is_shown_and_recorded() {
        let (session, out) = run_script(&["1", "6", "*", "7", "", "3", "", "5", ""]);
        assert_eq!(records(&session), ["6 * 7 = 42"]);
        assert!(out.contains("RESULT"));
        assert!(out.contains("│  6 * 7 = 42"));
        assert!(out.contains("   1  |  6 * 7 = 42"));
        assert!(out.contains("Thank you for using the calculator!"));
        assert_eq!(session.input.remaining(), 0);
        assert_eq!(session.input.prompts.last().map(String::as_str), Some(EXIT_PROMPT));
    }

    #[test]
    fn invalid_choices_return_to_menu() {
        let (session, out) = run_script(&["9", "", "", "", "abc", "", "5", ""]);
        assert!(session.history().is_empty());
        assert_eq!(out.matches("Invalid option. Please try again.").count(), 3);
        assert_eq!(out.matches("MAIN MENU").count(), 4);
    }

    #[test]
    fn bad_first_operand_stops_early() {
        let (session, out) = run_script(&["1", "abc", "", "5", ""]);
        assert!(session.history().is_empty());
        assert!(out.contains("Please enter valid numbers."));
        assert!(!session.input.prompts.iter().any(|p| p.starts_with("Enter an operation")));
    }

    #[test]
    fn basic_errors_record_nothing() {
        let (session, out) = run_script(&[
            "1", "4", "/", "0", "",
            "1", "4", "%", "0", "",
            "1", "4", "^", "2", "",
            "1", "4", "+", "x", "",
            "5", "",
        ]);
        assert!(session.history().is_empty());
        assert!(out.contains("Cannot divide by zero!"));
        assert!(out.contains("Cannot perform modulo by zero!"));
        assert!(out.contains("Operation not recognized."));
        assert!(out.contains("Please enter valid numbers."));
    }

    #[test]
    fn advanced_calculations_keep_order() {
        let (session, out) = run_script(&["2", "2 + 3 * 4", "", "2", "(2 + 3) * 4", "", "5", ""]);
        assert_eq!(records(&session), ["2 + 3 * 4 = 14", "(2 + 3) * 4 = 20"]);
        assert!(out.contains("Examples:"));
    }

    #[test]
    fn advanced_errors_record_nothing() {
        let (session, out) = run_script(&["2", "5 / 0", "", "2", "2 +", "", "2", "1.2.3", "", "5", ""]);
        assert!(session.history().is_empty());
        let text = panel_text(&out);
        assert!(text.contains("Cannot divide by zero!"));
        assert!(text.contains("Invalid expression syntax. Please check your expression."));
        assert!(text.contains("Error evaluating the expression. Please check your numbers and operators."));
    }

    #[test]
    fn clear_requires_y() {
        let (session, out) = run_script(&[
            "1", "1", "+", "1", "",
            "4", "n", "",
            "4", "yes", "",
            "5", "",
        ]);
        assert_eq!(records(&session), ["1 + 1 = 2"]);
        assert_eq!(out.matches("Operation cancelled. History remains intact.").count(), 2);

        let (session, out) = run_script(&["1", "1", "+", "1", "", "4", "y", "", "3", "", "4", "Y", "", "5", ""]);
        assert!(session.history().is_empty());
        assert_eq!(out.matches("History has been cleared successfully!").count(), 2);
        assert!(out.contains("No calculations have been performed yet."));
    }

    #[test]
    fn closed_input_ends_session() {
        let (session, out) = run_script(&["1", "3"]);
        assert!(session.history().is_empty());
        assert!(out.contains("Thank you for using the calculator!"));
        assert_ne!(session.input.prompts.last().map(String::as_str), Some(EXIT_PROMPT));
    }

    struct FailingInput {
        calls: usize,
    }

    impl LineSource for FailingInput {
        fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            self.calls += 1;
            match self.calls {
                1 => Ok(Some("2".to_string())),
                2 => Err(anyhow::anyhow!("tty gone")),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn read_failure_during_calculation_is_reported() {
        let presenter = Presenter::new(Vec::new(), Settings::plain());
        let mut session = Session::new(FailingInput { calls: 0 }, presenter, Calculator::new());
        session.run().unwrap();
        let out = String::from_utf8(session.presenter.writer().clone()).unwrap();
        assert!(panel_text(&out).contains("An unexpected error occurred: tty gone"));
        assert!(session.history().is_empty());
    }
}
