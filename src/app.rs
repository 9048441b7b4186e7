use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};

use crate::audio::AudioManager;
use crate::clock::FrameClock;
use crate::consts::FPS;
use crate::input::InputManager;
use crate::renderer::{GameRenderer, RenderView};
use crate::session::Session;
use crate::settings::Settings;

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    session: Session,
    show_fps: bool,
    /// internal components
    clock: FrameClock,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new(settings: &Settings, reports_key_release: bool) -> Self {
        Self {
            running: true,
            session: Session::new(),
            show_fps: settings.show_fps,
            clock: FrameClock::new(FPS),
            input_manager: InputManager::new(reports_key_release),
            renderer: GameRenderer::new(settings),
            audio_manager: AudioManager::new(settings),
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut rng = rand::rng();
        self.audio_manager.start_music();
        log::info!("Round 1 started");

        while self.running {
            self.input_manager.poll_events()?;
            let input = self.input_manager.take_input();
            if input.quit {
                log::info!(
                    "Quit after {} rounds, best {} kills",
                    self.session.rounds_played,
                    self.session.best_kills
                );
                self.running = false;
                continue;
            }

            let cues = self.session.tick(&input, &mut rng);
            self.audio_manager.play_cues(&cues);

            let fps = self.show_fps.then(|| self.clock.fps());
            terminal.draw(|frame| {
                let view = RenderView {
                    session: &self.session,
                    area: frame.area(),
                    fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.clock.tick();
        }
        Ok(())
    }
}
