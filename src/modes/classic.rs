//! Classic mode: endless run with a time-based speed ramp.

use crate::core::constants::{CLASSIC_LEVEL_INTERVAL, CLASSIC_MAX_SPEED_MULTIPLIER, CLASSIC_SPEED_STEP};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicState {
    pub speed_level: u32,
}

impl Default for ClassicState {
    fn default() -> Self {
        Self { speed_level: 1 }
    }
}

/// Bump the speed level every `CLASSIC_LEVEL_INTERVAL` frames.
pub fn update_classic(state: &mut ClassicState, frame_count: u64) -> bool {
    if frame_count > 0 && frame_count % CLASSIC_LEVEL_INTERVAL == 0 {
        state.speed_level += 1;
        return true;
    }
    false
}

/// 10% faster per level, capped at 2x.
pub fn classic_speed_multiplier(state: &ClassicState) -> f64 {
    (1.0 + state.speed_level as f64 * CLASSIC_SPEED_STEP).min(CLASSIC_MAX_SPEED_MULTIPLIER)
}
