use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::session::Cue;
use crate::settings::Settings;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Loads and buffers a sound file so it can be replayed cheaply
fn load_sound(path: &Path) -> Result<Sound, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;
    Ok(source.buffered())
}

fn load_optional(settings: &Settings, name: &str) -> Option<Sound> {
    let path = settings.sound_path(name);
    match load_sound(&path) {
        Ok(sound) => Some(sound),
        Err(err) => {
            log::warn!("Failed to load {}: {}", path.display(), err);
            None
        }
    }
}

/// Audio manager for sound effects and background music.
///
/// Every sound is optional: a missing device or file leaves that sound silent
/// instead of stopping the game.
pub struct AudioManager {
    /// Keeps the output device open; `None` when no device was available
    output: Option<(OutputStream, OutputStreamHandle)>,
    fire_sound: Option<Sound>,
    hit_sound: Option<Sound>,
    game_over_sound: Option<Sound>,
    music: Option<Sound>,
    /// Sink currently looping the background music
    music_sink: Option<Sink>,
    music_volume: f32,
    effects_volume: f32,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every sound
    pub fn new(settings: &Settings) -> Self {
        if settings.muted {
            log::info!("Audio muted by settings");
            return Self::silent();
        }

        let output = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("Failed to open audio output, continuing without audio: {}", err);
                return Self::silent();
            }
        };

        Self {
            output: Some(output),
            fire_sound: load_optional(settings, "fire.wav"),
            hit_sound: load_optional(settings, "hit.wav"),
            game_over_sound: load_optional(settings, "game_over.wav"),
            music: load_optional(settings, "background_music.mp3"),
            music_sink: None,
            music_volume: settings.music_volume,
            effects_volume: settings.effects_volume,
        }
    }

    /// Audio manager that plays nothing
    pub fn silent() -> Self {
        Self {
            output: None,
            fire_sound: None,
            hit_sound: None,
            game_over_sound: None,
            music: None,
            music_sink: None,
            music_volume: 0.0,
            effects_volume: 0.0,
        }
    }

    /// Plays whatever the session asked for this frame
    pub fn play_cues(&mut self, cues: &[Cue]) {
        for cue in cues {
            match cue {
                Cue::Fire => self.play_effect(self.fire_sound.as_ref()),
                Cue::Hit => self.play_effect(self.hit_sound.as_ref()),
                Cue::GameOver => {
                    self.pause_music();
                    self.play_effect(self.game_over_sound.as_ref());
                }
                Cue::RoundStart => self.start_music(),
            }
        }
    }

    /// Fire-and-forget playback on a detached sink
    fn play_effect(&self, sound: Option<&Sound>) {
        let (Some((_, handle)), Some(sound)) = (&self.output, sound) else {
            return;
        };

        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(self.effects_volume);
            // Clone the buffered source (fast - just clones references)
            sink.append(sound.clone());
            sink.detach();
        }
    }

    /// Starts the background music loop from the beginning
    pub fn start_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }

        let (Some((_, handle)), Some(music)) = (&self.output, &self.music) else {
            return;
        };

        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.music_volume);
                sink.append(music.clone().repeat_infinite());
                self.music_sink = Some(sink);
            }
            Err(err) => log::warn!("Failed to start background music: {}", err),
        }
    }

    pub fn pause_music(&self) {
        if let Some(sink) = &self.music_sink {
            sink.pause();
        }
    }
}
