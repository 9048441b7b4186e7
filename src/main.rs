use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;

use galactic_toast::{App, Settings, terminal as tty};

/// Diagnostics file; stdout belongs to the game screen
const LOG_FILE: &str = "debug.log";

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {}", LOG_FILE))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let settings = Settings::load()?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!(
        "Keyboard enhancement supported: {}",
        supports_keyboard_enhancement
    );

    tty::install_panic_hook(supports_keyboard_enhancement);
    if let Err(err) = tty::enter(supports_keyboard_enhancement) {
        let _ = tty::restore(supports_keyboard_enhancement);
        return Err(err).wrap_err("failed to set up the terminal");
    }

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = App::new(&settings, supports_keyboard_enhancement).run(&mut terminal);

    // Restore even when the game loop failed; its error takes precedence
    let restored = tty::restore(supports_keyboard_enhancement);
    result?;
    restored?;
    Ok(())
}
