// config.rs

use std::io::IsTerminal;

use log::Level;
use rustyline::config::{ColorMode, Config, EditMode};

/// Logger filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
/// Expected calculation failures are already shown in a panel, so they log
/// below the default filter and stay off the terminal.
pub const CALC_FAILURE_LEVEL: Level = Level::Debug;

/// Terminal-dependent behaviour, detected once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Emit ANSI colours.
    pub color: bool,
    /// Clear the screen before each menu and action screen.
    pub clear_screen: bool,
}

impl Settings {
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self { color: tty && !no_color, clear_screen: tty }
    }

    /// No colours and no screen clearing, for piped output and tests.
    pub fn plain() -> Self {
        Self { color: false, clear_screen: false }
    }

    pub fn editor_config(&self) -> Config {
        Config::builder()
            .edit_mode(EditMode::Emacs)
            .auto_add_history(false)
            .color_mode(if self.color { ColorMode::Enabled } else { ColorMode::Disabled })
            .build()
    }
}
