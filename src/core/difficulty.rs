//! Difficulty levels and their tuning parameters.

use serde::{Deserialize, Serialize};

/// Difficulty levels for Code Runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Normal)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    /// Lowercase identifier used in storage keys and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(value))
    }

    /// Starting scroll speed in px/frame.
    pub fn base_speed(&self) -> f64 {
        match self {
            Self::Easy => 5.0,
            Self::Normal => 6.0,
            Self::Hard => 7.0,
            Self::Expert => 8.0,
        }
    }

    /// Speed cap in px/frame.
    pub fn max_speed(&self) -> f64 {
        match self {
            Self::Easy => 8.0,
            Self::Normal => 10.0,
            Self::Hard => 12.0,
            Self::Expert => 15.0,
        }
    }

    /// Frames between obstacle spawns before score tightening.
    pub fn obstacle_frequency(&self) -> u32 {
        match self {
            Self::Easy => 100,
            Self::Normal => 80,
            Self::Hard => 65,
            Self::Expert => 50,
        }
    }

    /// Gravity (velocity change per frame, positive = downward).
    pub fn gravity(&self) -> f64 {
        match self {
            Self::Easy => 0.7,
            Self::Normal => 0.8,
            Self::Hard => 0.9,
            Self::Expert => 1.0,
        }
    }

    /// Jump impulse (negative = upward, sets velocity directly).
    pub fn jump_force(&self) -> f64 {
        match self {
            Self::Easy => -14.0,
            Self::Normal => -15.0,
            Self::Hard => -16.0,
            Self::Expert => -17.0,
        }
    }

    /// Frames between coffee spawns.
    pub fn coffee_frequency(&self) -> u32 {
        match self {
            Self::Easy => 180,
            Self::Normal => 200,
            Self::Hard => 220,
            Self::Expert => 250,
        }
    }

    /// Frames between power-up spawns.
    pub fn power_up_frequency(&self) -> u32 {
        match self {
            Self::Easy => 400,
            Self::Normal => 450,
            Self::Hard => 500,
            Self::Expert => 550,
        }
    }

    pub fn score_multiplier(&self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Normal => 1.5,
            Self::Hard => 2.0,
            Self::Expert => 3.0,
        }
    }
}
