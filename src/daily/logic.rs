use super::templates::{ChallengeTemplate, CHALLENGE_TEMPLATES};
use super::types::{
    ChallengeHistoryEntry, ChallengeProgress, ChallengeReward, ChallengeStats, ChallengeStreak,
    DailyChallenge, LocalizedText, StoredProgress,
};
use crate::storage::{KeyValueStore, ProgressRepository};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// Today's date in UTC. Every player sees the same challenge on the same
/// UTC calendar day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn generate_seed(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or(0);
    let month = u64::from(date.month());
    let day = u64::from(date.day());
    (year * 10007 + month * 479 + day * 31) % 999_983
}

pub fn template_for_date(date: NaiveDate) -> &'static ChallengeTemplate {
    let index = generate_seed(date) % CHALLENGE_TEMPLATES.len() as u64;
    &CHALLENGE_TEMPLATES[index as usize]
}

pub fn calculate_target(template: &ChallengeTemplate, seed: u64) -> u32 {
    let range = u64::from(template.target_max.saturating_sub(template.target_min));
    if range == 0 {
        return template.target_min;
    }
    template.target_min + (seed % range) as u32
}

/// The challenge definition for a date, with no progress merged in.
pub fn generate_daily_challenge(date: NaiveDate) -> DailyChallenge {
    let template = template_for_date(date);
    let target = calculate_target(template, generate_seed(date));

    DailyChallenge {
        id: format!("daily_{}", date),
        date,
        kind: template.kind,
        target,
        name: LocalizedText {
            en: template.name_en.to_string(),
            es: template.name_es.to_string(),
        },
        description: LocalizedText {
            en: template.describe_en(target),
            es: template.describe_es(target),
        },
        reward: ChallengeReward {
            points: template.reward_points,
            badge: template.badge.map(str::to_string),
            unlock: template.unlock.map(str::to_string),
        },
        template_id: template.id.to_string(),
        template_difficulty: template.difficulty,
        progress: 0.0,
        completed: false,
        attempts: 0,
        completed_at: None,
    }
}

/// The date's challenge with the player's stored progress applied.
pub fn load_challenge<S: KeyValueStore>(
    repo: &ProgressRepository<S>,
    date: NaiveDate,
) -> DailyChallenge {
    let mut challenge = generate_daily_challenge(date);
    if let Some(stored) = repo.challenge_progress(date) {
        challenge.progress = stored.progress;
        challenge.completed = stored.completed;
        challenge.attempts = stored.attempts;
        challenge.completed_at = stored.completed_at;
    }
    challenge
}

pub fn calculate_progress(challenge: &DailyChallenge, current: u32) -> ChallengeProgress {
    ChallengeProgress {
        current,
        target: challenge.target,
        percentage: percentage(current, challenge.target),
    }
}

pub fn is_challenge_completed(challenge: &DailyChallenge, current: u32) -> bool {
    current >= challenge.target
}

fn percentage(current: u32, target: u32) -> f64 {
    if target == 0 {
        return 100.0;
    }
    (f64::from(current) / f64::from(target) * 100.0).min(100.0)
}

/// Records a new metric value against the challenge.
///
/// The stored value is the best seen for the date, so a weaker later run
/// never lowers progress. Returns true on the update that first completes
/// the challenge; that update also advances the streak and writes history.
pub fn update_challenge_progress<S: KeyValueStore>(
    repo: &mut ProgressRepository<S>,
    challenge: &mut DailyChallenge,
    current: u32,
    now: DateTime<Utc>,
) -> bool {
    let stored = repo.challenge_progress(challenge.date);
    let previous_best = stored.as_ref().map(|s| s.current).unwrap_or(0);
    let best = previous_best.max(current);
    let newly_completed = !challenge.completed && is_challenge_completed(challenge, best);

    if stored.is_some() && best == previous_best && !newly_completed {
        return false;
    }

    challenge.progress = percentage(best, challenge.target);
    if newly_completed {
        challenge.completed = true;
        challenge.completed_at = Some(now);
    }

    repo.set_challenge_progress(
        challenge.date,
        &StoredProgress {
            progress: challenge.progress,
            current: best,
            completed: challenge.completed,
            attempts: challenge.attempts,
            completed_at: challenge.completed_at,
        },
    );

    if newly_completed {
        let streak = update_streak(&repo.streak(), challenge.date);
        repo.set_streak(&streak);
        repo.append_challenge_history(ChallengeHistoryEntry {
            date: challenge.date,
            challenge_id: challenge.id.clone(),
            completed: true,
            score: best,
            completed_at: Some(now),
        });
        tracing::info!(
            challenge = %challenge.id,
            streak = streak.current,
            "Daily challenge completed"
        );
    }

    newly_completed
}

/// Counts one play session against the challenge.
pub fn record_challenge_attempt<S: KeyValueStore>(
    repo: &mut ProgressRepository<S>,
    challenge: &mut DailyChallenge,
) {
    challenge.attempts += 1;
    let mut stored = repo.challenge_progress(challenge.date).unwrap_or_default();
    stored.attempts = challenge.attempts;
    stored.progress = challenge.progress;
    stored.completed = challenge.completed;
    stored.completed_at = challenge.completed_at;
    repo.set_challenge_progress(challenge.date, &stored);
}

/// The streak after completing the challenge for `completed_on`.
/// Completing the same date twice leaves it untouched.
pub fn update_streak(streak: &ChallengeStreak, completed_on: NaiveDate) -> ChallengeStreak {
    if streak.last_completed_date == Some(completed_on) {
        return streak.clone();
    }

    let current = if streak.last_completed_date.is_some()
        && streak.last_completed_date == completed_on.pred_opt()
    {
        streak.current + 1
    } else {
        1
    };

    ChallengeStreak {
        current,
        longest: streak.longest.max(current),
        last_completed_date: Some(completed_on),
    }
}

/// Rewards are summed from the definitions of the completed dates, which
/// can always be regenerated.
pub fn calculate_challenge_stats(
    history: &[ChallengeHistoryEntry],
    streak: &ChallengeStreak,
    today: NaiveDate,
) -> ChallengeStats {
    let completed: Vec<_> = history.iter().filter(|e| e.completed).collect();
    let total_completed = completed.len() as u32;
    let completion_rate = if history.is_empty() {
        0.0
    } else {
        f64::from(total_completed) / history.len() as f64 * 100.0
    };
    let total_rewards_earned = completed
        .iter()
        .map(|e| generate_daily_challenge(e.date).reward.points)
        .sum();

    let week_start = today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN);
    let last_week_completed = completed.iter().filter(|e| e.date >= week_start).count() as u32;

    ChallengeStats {
        total_completed,
        completion_rate,
        total_rewards_earned,
        current_streak: streak.current,
        longest_streak: streak.longest,
        last_week_completed,
    }
}

pub fn challenge_stats<S: KeyValueStore>(
    repo: &ProgressRepository<S>,
    today: NaiveDate,
) -> ChallengeStats {
    calculate_challenge_stats(&repo.challenge_history(), &repo.streak(), today)
}
