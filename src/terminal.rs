use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stdout};

/// Put the terminal into game mode: raw input on the alternate screen, with
/// key release reporting when the terminal supports it
pub fn enter(keyboard_enhanced: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    Ok(())
}

/// Undo [`enter`]. Every step runs even if an earlier one fails; the first
/// failure is returned.
pub fn restore(keyboard_enhanced: bool) -> io::Result<()> {
    let mut stdout = stdout();
    let pop_flags = if keyboard_enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw_mode = disable_raw_mode();
    let screen = execute!(stdout, LeaveAlternateScreen, Show);
    first_error([pop_flags, raw_mode, screen])
}

/// Restore the terminal before the current panic hook prints its report
pub fn install_panic_hook(keyboard_enhanced: bool) {
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore(keyboard_enhanced);
        report(info);
    }));
}

fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}
