//! Sprint mode: a 60 second countdown that slow-mo pickups can freeze.

use crate::core::constants::{SPRINT_DURATION_SECONDS, TARGET_FPS, TIME_FREEZE_DURATION};
use serde::{Deserialize, Serialize};

/// Total countdown length in frames.
pub const SPRINT_TOTAL_FRAMES: u32 = SPRINT_DURATION_SECONDS * TARGET_FPS as u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintState {
    /// Frames left on the clock.
    pub time_remaining: u32,
    pub time_freezes_used: u32,
    pub time_frozen: bool,
    pub freeze_frames_remaining: u32,
}

impl Default for SprintState {
    fn default() -> Self {
        Self {
            time_remaining: SPRINT_TOTAL_FRAMES,
            time_freezes_used: 0,
            time_frozen: false,
            freeze_frames_remaining: 0,
        }
    }
}

/// Count down one frame, or burn one freeze frame instead while frozen.
pub fn update_sprint(state: &mut SprintState) {
    if state.time_frozen {
        state.freeze_frames_remaining = state.freeze_frames_remaining.saturating_sub(1);
        if state.freeze_frames_remaining == 0 {
            state.time_frozen = false;
        }
        return;
    }

    state.time_remaining = state.time_remaining.saturating_sub(1);
}

pub fn activate_time_freeze(state: &mut SprintState) {
    state.time_frozen = true;
    state.freeze_frames_remaining = TIME_FREEZE_DURATION;
    state.time_freezes_used += 1;
}

/// Whole seconds left, rounded up.
pub fn sprint_seconds_remaining(state: &SprintState) -> u32 {
    state.time_remaining.div_ceil(TARGET_FPS as u32)
}

pub fn is_sprint_time_up(state: &SprintState) -> bool {
    state.time_remaining == 0
}

pub fn sprint_time_progress(state: &SprintState) -> f64 {
    state.time_remaining as f64 / SPRINT_TOTAL_FRAMES as f64 * 100.0
}
