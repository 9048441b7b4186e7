use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::Direction;
use crate::round::TickInput;

/// Frames a key press counts as held when the terminal never reports releases.
/// Long enough to bridge the gap between auto-repeat events.
const REPEAT_HOLD_FRAMES: u8 = 6;

/// Hold state of a single movement key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Hold {
    #[default]
    Released,
    /// Held until a release event arrives
    Latched,
    /// Held for this many more frames
    Frames(u8),
}

impl Hold {
    fn is_held(self) -> bool {
        !matches!(self, Hold::Released)
    }

    /// Counts down one frame of a timed hold
    fn decay(self) -> Self {
        match self {
            Hold::Frames(n) if n > 1 => Hold::Frames(n - 1),
            Hold::Frames(_) => Hold::Released,
            other => other,
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: Hold,
    down: Hold,
}

/// Manages input polling and translates raw key events into a `TickInput`
pub struct InputManager {
    key_state: KeyState,
    /// Whether the terminal sends key release events (kitty keyboard protocol)
    reports_release: bool,
    fire: bool,
    confirm: bool,
    quit: bool,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            reports_release,
            fire: false,
            confirm: false,
            quit: false,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per frame before `take_input`.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, false),
            KeyEventKind::Repeat => self.handle_key_press(key_event, true),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, repeat: bool) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        let hold = if self.reports_release {
            Hold::Latched
        } else {
            Hold::Frames(REPEAT_HOLD_FRAMES)
        };

        match key_event.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = hold;
                self.key_state.down = Hold::Released;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = hold;
                self.key_state.up = Hold::Released;
            }
            // One-shot keys ignore auto-repeat
            KeyCode::Char(' ') if !repeat => self.fire = true,
            KeyCode::Enter if !repeat => self.confirm = true,
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = Hold::Released;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = Hold::Released;
            }
            _ => {}
        }
    }

    /// Returns the input for this frame and clears one-shot actions
    pub fn take_input(&mut self) -> TickInput {
        let direction = if self.key_state.up.is_held() {
            Some(Direction::Up)
        } else if self.key_state.down.is_held() {
            Some(Direction::Down)
        } else {
            None
        };

        self.key_state.up = self.key_state.up.decay();
        self.key_state.down = self.key_state.down.decay();

        TickInput {
            direction,
            fire: std::mem::take(&mut self.fire),
            confirm: std::mem::take(&mut self.confirm),
            quit: self.quit,
        }
    }
}
