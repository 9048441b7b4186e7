//! Player preferences
//!
//! Read from an optional JSON file; every field falls back to its default, so
//! a file only needs the keys it wants to change. Gameplay constants are not
//! configurable here.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "galactic_toast.json";
/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "GALACTIC_TOAST_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `img/` and `sounds/`
    pub assets_dir: PathBuf,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effect volume (0.0 - 1.0)
    pub effects_volume: f32,
    /// Silence all audio
    pub muted: bool,
    /// Show the measured frame rate in the HUD
    pub show_fps: bool,
    /// Draw the background picture instead of the starfield
    pub background_image: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            music_volume: 0.8,
            effects_volume: 0.5,
            muted: false,
            show_fps: false,
            background_image: true,
        }
    }
}

impl Settings {
    /// Loads settings from `GALACTIC_TOAST_SETTINGS` or the default file,
    /// falling back to defaults when neither exists
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .wrap_err_with(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    fn clamped(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.effects_volume = self.effects_volume.clamp(0.0, 1.0);
        self
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.assets_dir.join("img").join(name)
    }

    pub fn sound_path(&self, name: &str) -> PathBuf {
        self.assets_dir.join("sounds").join(name)
    }
}
