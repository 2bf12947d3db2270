// presenter.rs

// Read-only rendering. Colours are applied after padding so column widths
// are the same with and without them.

use std::io::{self, Write};

use colored::{Color, Colorize};
use itertools::Itertools;

use crate::config::Settings;
use crate::error::CalcError;
use crate::history::HistoryStore;
use crate::util::{flush_ignore_broken_pipe, writeln_ignore_broken_pipe};

/// Columns between the two vertical borders.
const INNER_WIDTH: usize = 48;
/// Columns available for text inside a panel line.
pub const TEXT_WIDTH: usize = 46;
/// Longest record shown untruncated in the history table.
const HISTORY_CELL_WIDTH: usize = 50;
const ELLIPSIS: &str = "...";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub const MENU_PROMPT: &str = "Enter your choice (1-5): ";
pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";
pub const EXIT_PROMPT: &str = "Press Enter to exit.";

/// User-facing wording for each failure kind.
pub fn message_for(err: &CalcError) -> String {
    match err {
        CalcError::Format => "Please enter valid numbers.".to_string(),
        CalcError::UnrecognizedOperation(_) => "Operation not recognized.".to_string(),
        CalcError::DivideByZero => "Cannot divide by zero!".to_string(),
        CalcError::ModuloByZero => "Cannot perform modulo by zero!".to_string(),
        CalcError::Syntax(_) => "Invalid expression syntax. Please check your expression.".to_string(),
        CalcError::Evaluation(_) => {
            "Error evaluating the expression. Please check your numbers and operators.".to_string()
        }
        CalcError::Unexpected(msg) => format!("An unexpected error occurred: {}", msg),
    }
}

/// Fixed-size chunks of `text`, no word-boundary awareness.
pub fn wrap(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let chunks = text.chars().chunks(TEXT_WIDTH);
    let lines: Vec<String> = chunks.into_iter().map(|chunk| chunk.collect::<String>()).collect();
    lines
}

pub fn truncate_record(text: &str) -> String {
    if text.chars().count() > HISTORY_CELL_WIDTH {
        let head: String = text.chars().take(HISTORY_CELL_WIDTH - ELLIPSIS.len()).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        text.to_string()
    }
}

fn border(left: char, right: char) -> String {
    format!("{}{}{}", left, "─".repeat(INNER_WIDTH), right)
}

fn title_line(title: &str) -> String {
    format!("│{:^width$}│", title, width = INNER_WIDTH)
}

fn text_line(text: &str) -> String {
    format!("│  {:<width$}│", text, width = TEXT_WIDTH)
}

pub struct Presenter<W: Write> {
    out: W,
    settings: Settings,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, settings: Settings) -> Self {
        Self { out, settings }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.settings.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, s: impl AsRef<str>) -> io::Result<()> {
        writeln_ignore_broken_pipe(&mut self.out, s)
    }

    fn colored_line(&mut self, s: &str, color: Color) -> io::Result<()> {
        let painted = self.paint(s, color);
        self.line(painted)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        flush_ignore_broken_pipe(&mut self.out)
    }

    /// Styled prompt text, handed to the line editor.
    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.settings.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }

    fn header(&mut self) -> io::Result<()> {
        self.colored_line(&border('┌', '┐'), Color::Cyan)?;
        self.colored_line(&title_line("CONSOLE CALCULATOR"), Color::Cyan)?;
        self.colored_line(&border('├', '┤'), Color::Cyan)
    }

    pub fn main_menu(&mut self) -> io::Result<()> {
        self.clear_screen()?;
        self.header()?;
        self.line(title_line("MAIN MENU"))?;
        self.line(border('├', '┤'))?;
        for option in [
            "1. Basic Calculation (2 numbers)",
            "2. Advanced Calculation (multiple numbers)",
            "3. View Calculation History",
            "4. Clear History",
            "5. Exit",
        ] {
            self.line(text_line(option))?;
        }
        self.line(border('└', '┘'))?;
        self.line("")?;
        self.flush()
    }

    /// Clears the screen and draws the header with a section title.
    pub fn screen(&mut self, title: &str) -> io::Result<()> {
        self.clear_screen()?;
        self.header()?;
        self.line(title_line(title))?;
        self.line(border('└', '┘'))?;
        self.line("")?;
        self.flush()
    }

    pub fn expression_help(&mut self) -> io::Result<()> {
        self.line("Enter a mathematical expression with multiple numbers.")?;
        self.line("Examples:")?;
        self.line("  • 5 + 10 - 3 * 2")?;
        self.line("  • (10 + 5) * 2 / 3")?;
        self.line("  • 7 % 3 + 4 * 2")?;
        self.line("")?;
        self.flush()
    }

    fn panel(&mut self, title: &str, body: &str, color: Color) -> io::Result<()> {
        self.line("")?;
        self.line(border('┌', '┐'))?;
        self.line(title_line(title))?;
        self.line(border('├', '┤'))?;
        for chunk in wrap(body) {
            self.colored_line(&text_line(&chunk), color)?;
        }
        self.line(border('└', '┘'))?;
        self.flush()
    }

    pub fn result(&mut self, record: &str) -> io::Result<()> {
        self.panel("RESULT", record, Color::Green)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.panel("ERROR", message, Color::Red)
    }

    pub fn calc_error(&mut self, err: &CalcError) -> io::Result<()> {
        self.error(&message_for(err))
    }

    pub fn history(&mut self, history: &HistoryStore) -> io::Result<()> {
        if history.all().is_none() {
            self.line("No calculations have been performed yet.")?;
            return self.flush();
        }
        self.colored_line("   #  |  Calculation", Color::Yellow)?;
        self.colored_line(&format!("------+{}", "-".repeat(42)), Color::Yellow)?;
        for (index, record) in history.numbered() {
            self.line(format!("  {:>2}  |  {}", index, truncate_record(record.as_str())))?;
        }
        self.flush()
    }

    pub fn message(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.colored_line(text, color)?;
        self.flush()
    }

    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        self.line(text)?;
        self.flush()
    }
}
