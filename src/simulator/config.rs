//! Simulation configuration.

use crate::core::difficulty::Difficulty;
use crate::modes::GameMode;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub game_mode: GameMode,
    pub difficulty: Difficulty,

    /// Frames per run before the run counts as timed out.
    pub max_frames_per_run: u64,

    /// The bot jumps once the next obstacle is closer than this.
    pub reaction_distance: f64,

    /// 0 = silent, 1 = summary, 2 = per run
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            game_mode: GameMode::Classic,
            difficulty: Difficulty::Normal,
            max_frames_per_run: 60 * 60 * 10,
            reaction_distance: 110.0,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for quick balance checks.
    pub fn quick(game_mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            num_runs: 20,
            seed: Some(1),
            game_mode,
            difficulty,
            max_frames_per_run: 60 * 60 * 3,
            ..Default::default()
        }
    }
}
