//! Player settings, stored as `settings.json` in the data directory.

use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, DOUBLE_JUMP_ENABLED};
use crate::core::difficulty::Difficulty;
use crate::modes::GameMode;
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use uuid::Uuid;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Empty until a guest id is assigned on first load.
    pub user_id: String,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub double_jump_enabled: bool,
    /// Fixed rng seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            game_mode: GameMode::default(),
            difficulty: Difficulty::default(),
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            double_jump_enabled: DOUBLE_JUMP_ENABLED,
            seed: None,
        }
    }
}

pub fn guest_id() -> String {
    format!("guest_{}", Uuid::new_v4().simple())
}

impl Settings {
    /// Loads settings, assigning and saving a guest id the first time.
    pub fn load() -> Self {
        let mut settings: Settings = load_json_or_default(SETTINGS_FILE);
        if settings.ensure_user_id() {
            if let Err(e) = settings.save() {
                tracing::warn!(error = %e, "Could not save settings");
            }
        }
        settings.sanitize();
        settings
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SETTINGS_FILE, self)
    }

    /// Returns true if a new id was generated.
    pub fn ensure_user_id(&mut self) -> bool {
        if !self.user_id.trim().is_empty() {
            return false;
        }
        self.user_id = guest_id();
        true
    }

    /// Replaces unusable canvas dimensions with the defaults.
    pub fn sanitize(&mut self) {
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            self.canvas_width = CANVAS_WIDTH;
        }
        if !(self.canvas_height.is_finite() && self.canvas_height > 0.0) {
            self.canvas_height = CANVAS_HEIGHT;
        }
    }
}
