//! Game modes and the per-mode state machine.
//!
//! Exactly one mode is live per session. `GameModeState` carries that mode's
//! state as an enum payload, so there is never a Sprint timer hanging off a
//! Classic run.

pub mod chaos;
pub mod classic;
pub mod debug;
pub mod sprint;

pub use chaos::*;
pub use classic::*;
pub use debug::*;
pub use sprint::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Sprint,
    Debug,
    Chaos,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Sprint,
        GameMode::Debug,
        GameMode::Chaos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic Mode",
            Self::Sprint => "Sprint Mode",
            Self::Debug => "Debug Challenge",
            Self::Chaos => "Chaos Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "Survive as long as possible. Speed increases over time.",
            Self::Sprint => "Score as much as possible in 60 seconds. Collect time-freeze power-ups!",
            Self::Debug => "Complete missions to progress. Each mission unlocks the next.",
            Self::Chaos => "Random events will change the game. Adapt or perish!",
        }
    }

    /// Lowercase identifier used in storage keys and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Sprint => "sprint",
            Self::Debug => "debug",
            Self::Chaos => "chaos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GameModeState {
    Classic(ClassicState),
    Sprint(SprintState),
    Debug(DebugState),
    Chaos(ChaosState),
}

/// One labelled value for the mode status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusItem {
    pub label: &'static str,
    pub value: String,
    /// 0-100 when the value has a natural gauge.
    pub progress: Option<f64>,
}

impl GameModeState {
    pub fn new<R: Rng>(mode: GameMode, rng: &mut R) -> Self {
        match mode {
            GameMode::Classic => Self::Classic(ClassicState::default()),
            GameMode::Sprint => Self::Sprint(SprintState::default()),
            GameMode::Debug => Self::Debug(DebugState::default()),
            GameMode::Chaos => Self::Chaos(ChaosState::new(rng)),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            Self::Classic(_) => GameMode::Classic,
            Self::Sprint(_) => GameMode::Sprint,
            Self::Debug(_) => GameMode::Debug,
            Self::Chaos(_) => GameMode::Chaos,
        }
    }

    /// Multiplier this mode applies to base speed.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::Classic(state) => classic_speed_multiplier(state),
            _ => 1.0,
        }
    }

    /// Active chaos effects. Neutral for every other mode.
    pub fn chaos_effects(&self) -> ChaosEffects {
        match self {
            Self::Chaos(state) => chaos_effects(state),
            _ => ChaosEffects::default(),
        }
    }

    pub fn objectives(&self) -> Vec<String> {
        match self {
            Self::Classic(state) => vec![
                "Survive as long as possible".to_string(),
                "Collect coffees for points".to_string(),
                format!("Current speed level: {}", state.speed_level),
            ],
            Self::Sprint(state) => vec![
                format!("Time remaining: {}s", sprint_seconds_remaining(state)),
                "Maximize your score".to_string(),
                format!("Time freezes used: {}", state.time_freezes_used),
            ],
            Self::Debug(state) => vec![
                state.current_mission.id.goal().to_string(),
                format!(
                    "Progress: {}/{}",
                    state.current_mission.progress,
                    state.current_mission.target()
                ),
                format!("Missions completed: {}", state.missions_completed),
            ],
            Self::Chaos(state) => vec![
                "Survive chaos events".to_string(),
                format!(
                    "Current event: {}",
                    state
                        .active_event()
                        .map(|e| e.name())
                        .unwrap_or("No active event")
                ),
                format!("Events survived: {}", state.events_triggered),
            ],
        }
    }

    pub fn status_bar(&self) -> Vec<StatusItem> {
        match self {
            Self::Classic(state) => vec![StatusItem {
                label: "Speed Level",
                value: state.speed_level.to_string(),
                progress: None,
            }],
            Self::Sprint(state) => vec![
                StatusItem {
                    label: "Time",
                    value: format!("{}s", sprint_seconds_remaining(state)),
                    progress: Some(sprint_time_progress(state)),
                },
                StatusItem {
                    label: "Freezes",
                    value: state.time_freezes_used.to_string(),
                    progress: None,
                },
            ],
            Self::Debug(state) => vec![
                StatusItem {
                    label: "Mission",
                    value: state.current_mission.id.goal().to_string(),
                    progress: Some(mission_progress(state)),
                },
                StatusItem {
                    label: "Completed",
                    value: state.missions_completed.to_string(),
                    progress: None,
                },
            ],
            Self::Chaos(state) => vec![
                StatusItem {
                    label: "Event",
                    value: state
                        .active_event()
                        .map(|e| e.name())
                        .unwrap_or("Incoming...")
                        .to_string(),
                    progress: Some(chaos_event_progress(state)),
                },
                StatusItem {
                    label: "Survived",
                    value: state.events_triggered.to_string(),
                    progress: None,
                },
            ],
        }
    }
}

/// The predicate the engine polls each frame. Classic and Chaos only end in
/// game over.
pub fn is_game_mode_complete(state: &GameModeState, _frame_count: u64) -> bool {
    match state {
        GameModeState::Classic(_) | GameModeState::Chaos(_) => false,
        GameModeState::Sprint(sprint) => is_sprint_time_up(sprint),
        GameModeState::Debug(debug) => all_missions_completed(debug),
    }
}
