mod calc;
mod config;
mod error;
mod eval;
mod history;
mod input;
mod menu;
mod presenter;
mod repl;
mod util;

use config::Settings;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for them.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config::DEFAULT_LOG_FILTER)).init();

    let settings = Settings::detect();
    log::debug!("terminal settings: {:?}", settings);
    colored::control::set_override(settings.color);

    repl::start_repl(settings)
}
