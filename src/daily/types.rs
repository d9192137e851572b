use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    Score,
    Collect,
    Survive,
    Complete,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub es: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeReward {
    pub points: u32,
    pub badge: Option<String>,
    pub unlock: Option<String>,
}

/// A date's challenge. The definition fields derive from the date alone;
/// the progress fields are merged in from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub date: NaiveDate,
    pub kind: ChallengeType,
    pub target: u32,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub reward: ChallengeReward,
    pub template_id: String,
    pub template_difficulty: TemplateDifficulty,

    pub progress: f64,
    pub completed: bool,
    pub attempts: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Persisted per-date progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredProgress {
    /// 0-100.
    pub progress: f64,
    /// Best metric value reached so far.
    pub current: u32,
    pub completed: bool,
    pub attempts: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeProgress {
    pub current: u32,
    pub target: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStreak {
    pub current: u32,
    pub longest: u32,
    pub last_completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeHistoryEntry {
    pub date: NaiveDate,
    pub challenge_id: String,
    pub completed: bool,
    pub score: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeStats {
    pub total_completed: u32,
    /// 0-100.
    pub completion_rate: f64,
    pub total_rewards_earned: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Completions in the trailing seven days.
    pub last_week_completed: u32,
}
