//! Score accumulation, the coffee combo, and end-of-run statistics.
//!
//! Every mutation goes through `recompute`, so `current` always equals
//! `floor(base_score * multiplier)`.

use crate::core::constants::{
    COFFEE_POINTS, COMBO_MULTIPLIER, COMBO_THRESHOLD, COMBO_TIMEOUT, NEAR_MISS_POINTS,
    POINTS_PER_FRAME, TARGET_FPS, TIME_BONUS_PER_SECOND,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Displayed score.
    pub current: u64,
    /// Pre-multiplier accumulator.
    pub base_score: f64,
    pub multiplier: f64,
    pub combo: u32,
    /// Frames until the combo lapses.
    pub combo_timer: u32,
    pub near_misses: u32,
    pub coffees_collected: u32,
    pub obstacles_dodged: u32,
    pub high_score: u64,
}

impl ScoreState {
    pub fn new(high_score: u64) -> Self {
        Self {
            current: 0,
            base_score: 0.0,
            multiplier: 1.0,
            combo: 0,
            combo_timer: 0,
            near_misses: 0,
            coffees_collected: 0,
            obstacles_dodged: 0,
            high_score,
        }
    }

    fn recompute(&mut self) {
        let value = (self.base_score * self.multiplier).floor();
        self.current = if value.is_finite() && value > 0.0 {
            value as u64
        } else {
            0
        };
    }

    fn award(&mut self, raw_points: f64) -> u64 {
        self.base_score += raw_points;
        self.recompute();
        (raw_points * self.multiplier).floor() as u64
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreEventKind {
    Coffee,
    Obstacle,
    NearMiss,
    Combo,
    Mission,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub kind: ScoreEventKind,
    /// Points as seen by the player (multiplier applied).
    pub points: u64,
    pub multiplier: f64,
    pub message: Option<String>,
}

/// Survival points for one frame.
pub fn add_passive_score(state: &mut ScoreState, difficulty_multiplier: f64) {
    state.award(POINTS_PER_FRAME * difficulty_multiplier);
}

/// Coffee pickup: extends the combo and activates the combo multiplier once
/// the threshold is reached. The multiplier then applies to all scoring.
pub fn add_coffee_score(state: &mut ScoreState, difficulty_multiplier: f64) -> ScoreEvent {
    state.combo += 1;
    state.combo_timer = COMBO_TIMEOUT;
    state.coffees_collected += 1;

    let combo_active = state.combo >= COMBO_THRESHOLD;
    if combo_active {
        state.multiplier = COMBO_MULTIPLIER;
    }

    let points = state.award(COFFEE_POINTS * difficulty_multiplier);

    ScoreEvent {
        kind: if combo_active {
            ScoreEventKind::Combo
        } else {
            ScoreEventKind::Coffee
        },
        points,
        multiplier: state.multiplier,
        message: combo_active.then(|| format!("{}x COMBO!", state.combo)),
    }
}

pub fn add_obstacle_score(
    state: &mut ScoreState,
    obstacle_points: u32,
    difficulty_multiplier: f64,
) -> ScoreEvent {
    state.obstacles_dodged += 1;
    let points = state.award(obstacle_points as f64 * difficulty_multiplier);

    ScoreEvent {
        kind: ScoreEventKind::Obstacle,
        points,
        multiplier: state.multiplier,
        message: None,
    }
}

pub fn add_near_miss_score(state: &mut ScoreState, difficulty_multiplier: f64) -> ScoreEvent {
    state.near_misses += 1;
    let points = state.award(NEAR_MISS_POINTS * difficulty_multiplier);

    ScoreEvent {
        kind: ScoreEventKind::NearMiss,
        points,
        multiplier: state.multiplier,
        message: Some("CLOSE CALL!".to_string()),
    }
}

pub fn add_mission_score(state: &mut ScoreState, mission_points: u64) -> ScoreEvent {
    let points = state.award(mission_points as f64);

    ScoreEvent {
        kind: ScoreEventKind::Mission,
        points,
        multiplier: state.multiplier,
        message: Some("MISSION COMPLETE!".to_string()),
    }
}

pub fn add_time_bonus(state: &mut ScoreState, seconds_remaining: u32) -> ScoreEvent {
    let points = state.award((seconds_remaining as u64 * TIME_BONUS_PER_SECOND) as f64);

    ScoreEvent {
        kind: ScoreEventKind::Time,
        points,
        multiplier: state.multiplier,
        message: Some(format!("TIME BONUS: {}s", seconds_remaining)),
    }
}

/// Tick the combo window. Combo and multiplier reset together on the frame
/// the timer reaches zero.
pub fn update_combo_timer(state: &mut ScoreState) {
    if state.combo_timer == 0 {
        return;
    }

    state.combo_timer -= 1;
    if state.combo_timer == 0 {
        state.combo = 0;
        state.multiplier = 1.0;
        state.recompute();
    }
}

pub fn reset_combo(state: &mut ScoreState) {
    state.combo = 0;
    state.combo_timer = 0;
    state.multiplier = 1.0;
    state.recompute();
}

/// Remaining combo window as 0-100.
pub fn combo_progress(state: &ScoreState) -> f64 {
    if state.combo_timer == 0 {
        return 0.0;
    }
    state.combo_timer as f64 / COMBO_TIMEOUT as f64 * 100.0
}

/// Raise the in-memory high score when strictly beaten.
pub fn check_and_update_high_score(state: &mut ScoreState) -> bool {
    if state.current > state.high_score {
        state.high_score = state.current;
        return true;
    }
    false
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub final_score: u64,
    pub coffees_collected: u32,
    pub obstacles_dodged: u32,
    pub near_misses: u32,
    pub max_combo: u32,
    /// Coffees as a share of coffees plus dodges, rounded to 0.1.
    pub accuracy: f64,
    pub survival_seconds: u64,
}

pub fn calculate_statistics(state: &ScoreState, frame_count: u64, max_combo: u32) -> GameStatistics {
    let interactions = state.coffees_collected + state.obstacles_dodged;
    let accuracy = if interactions > 0 {
        state.coffees_collected as f64 / interactions as f64 * 100.0
    } else {
        0.0
    };

    GameStatistics {
        final_score: state.current,
        coffees_collected: state.coffees_collected,
        obstacles_dodged: state.obstacles_dodged,
        near_misses: state.near_misses,
        max_combo,
        accuracy: (accuracy * 10.0).round() / 10.0,
        survival_seconds: frame_count / TARGET_FPS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreGrade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl ScoreGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

pub fn score_grade(score: u64) -> ScoreGrade {
    match score {
        10_000.. => ScoreGrade::S,
        5_000.. => ScoreGrade::A,
        2_500.. => ScoreGrade::B,
        1_000.. => ScoreGrade::C,
        500.. => ScoreGrade::D,
        _ => ScoreGrade::F,
    }
}

pub fn format_multiplier(multiplier: f64) -> String {
    format!("{:.1}x", multiplier)
}

/// Thousands-separated score, e.g. `12,345`.
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
