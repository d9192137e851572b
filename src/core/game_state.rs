use crate::core::constants::{DOUBLE_JUMP_ENABLED, RECENT_EVENT_CAP, TARGET_FPS};
use crate::core::difficulty::Difficulty;
use crate::modes::{GameMode, GameModeState};
use crate::obstacles::ObstacleState;
use crate::physics::{create_player, ground_y, Player};
use crate::power_ups::PowerUpState;
use crate::scoring::{ScoreEvent, ScoreState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
    Complete,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::GameOver | Self::Complete)
    }
}

/// One play session. Created at session start and replaced wholesale on
/// reset; nothing here is shared between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    pub frame_count: u64,
    /// Effective scroll speed for the current frame.
    pub game_speed: f64,
    /// Pre-multiplier speed; Classic raises it over time.
    pub base_speed: f64,
    pub max_speed: f64,

    pub player: Player,
    pub obstacles: ObstacleState,
    pub power_ups: PowerUpState,
    pub score: ScoreState,
    pub mode_state: GameModeState,

    /// Newest first, capped at `RECENT_EVENT_CAP`.
    pub recent_events: VecDeque<ScoreEvent>,
    pub max_combo_reached: u32,

    pub canvas_width: f64,
    pub canvas_height: f64,
    pub ground_y: f64,
    pub double_jump_enabled: bool,
}

impl GameState {
    pub fn new<R: Rng>(
        game_mode: GameMode,
        difficulty: Difficulty,
        canvas_width: f64,
        canvas_height: f64,
        high_score: u64,
        rng: &mut R,
    ) -> Self {
        Self {
            status: GameStatus::Idle,
            game_mode,
            difficulty,
            frame_count: 0,
            game_speed: difficulty.base_speed(),
            base_speed: difficulty.base_speed(),
            max_speed: difficulty.max_speed(),
            player: create_player(canvas_height),
            obstacles: ObstacleState::default(),
            power_ups: PowerUpState::default(),
            score: ScoreState::new(high_score),
            mode_state: GameModeState::new(game_mode, rng),
            recent_events: VecDeque::new(),
            max_combo_reached: 0,
            canvas_width,
            canvas_height,
            ground_y: ground_y(canvas_height),
            double_jump_enabled: DOUBLE_JUMP_ENABLED,
        }
    }

    pub fn with_double_jump(mut self, enabled: bool) -> Self {
        self.double_jump_enabled = enabled;
        self.player.can_double_jump = enabled;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn push_event(&mut self, event: ScoreEvent) {
        self.recent_events.push_front(event);
    }

    pub fn trim_recent_events(&mut self) {
        self.recent_events.truncate(RECENT_EVENT_CAP);
    }

    /// Survival time in whole seconds.
    pub fn survival_seconds(&self) -> u64 {
        self.frame_count / TARGET_FPS
    }
}
