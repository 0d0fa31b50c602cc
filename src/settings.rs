//! Game settings loaded from an optional TOML file.
//!
//! ```toml
//! field_width = 640
//! field_height = 480
//! game_tick_ms = 30
//! enemy_fire_ms = 3000
//! enemy_animation_ms = 100
//! ```
//!
//! Every key is optional; missing ones fall back to the defaults above.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SettingsError;
use crate::scheduler::Timings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Play-field width in field units.
    pub field_width: f64,
    /// Play-field height in field units.
    pub field_height: f64,
    /// Main tick interval.
    pub game_tick_ms: u64,
    /// How often a random enemy fires.
    pub enemy_fire_ms: u64,
    /// Frame toggle interval for animated enemies.
    pub enemy_animation_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 640.0,
            field_height: 480.0,
            game_tick_ms: 30,
            enemy_fire_ms: 3000,
            enemy_animation_ms: 100,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Field dimensions are checked when the game manager is built; only the
    /// timer intervals are checked here.
    fn validate(&self) -> Result<(), SettingsError> {
        let intervals = [
            ("game tick", self.game_tick_ms),
            ("enemy fire", self.enemy_fire_ms),
            ("enemy animation", self.enemy_animation_ms),
        ];
        for (name, ms) in intervals {
            if ms == 0 {
                return Err(SettingsError::Interval { name });
            }
        }
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            game_tick: Duration::from_millis(self.game_tick_ms),
            enemy_fire: Duration::from_millis(self.enemy_fire_ms),
            enemy_animation: Duration::from_millis(self.enemy_animation_ms),
        }
    }
}
