use super::{KeyValueStore, StorageError, StorageResult};
use crate::core::constants::{CHALLENGE_HISTORY_CAP, LEADERBOARD_CAP};
use crate::core::difficulty::Difficulty;
use crate::daily::{ChallengeHistoryEntry, ChallengeStreak, StoredProgress};
use crate::modes::GameMode;
use crate::scoring::GameStatistics;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const KEY_ROOT: &str = "code_runner";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    pub score: u64,
    pub statistics: GameStatistics,
    pub timestamp: DateTime<Utc>,
}

/// Typed progress for one user on top of a raw key-value store.
///
/// Storage failures never reach the caller: reads that fail or hit
/// malformed JSON come back as the default, and writes that fail are
/// logged and reported as `false`. The next write event simply tries again.
pub struct ProgressRepository<S: KeyValueStore> {
    store: S,
    user_id: String,
}

impl<S: KeyValueStore> ProgressRepository<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}:{}:{}", KEY_ROOT, self.user_id, suffix)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed stored value");
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        let result: StorageResult<()> = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage write failed");
                false
            }
        }
    }

    // ── High scores ──────────────────────────────────────────────────

    pub fn high_score(&self, mode: GameMode) -> u64 {
        self.read(&self.key(&format!("high_score:{}", mode.as_str())))
            .unwrap_or(0)
    }

    /// Returns true only when the score beat the stored value and was saved.
    pub fn set_high_score_if_greater(&mut self, mode: GameMode, score: u64) -> bool {
        if score <= self.high_score(mode) {
            return false;
        }
        let key = self.key(&format!("high_score:{}", mode.as_str()));
        self.write(&key, &score)
    }

    // ── Daily challenge progress ─────────────────────────────────────

    pub fn challenge_progress(&self, date: NaiveDate) -> Option<StoredProgress> {
        self.read(&self.key(&format!("challenge:{}", date)))
    }

    pub fn set_challenge_progress(&mut self, date: NaiveDate, progress: &StoredProgress) -> bool {
        let key = self.key(&format!("challenge:{}", date));
        self.write(&key, progress)
    }

    pub fn streak(&self) -> ChallengeStreak {
        self.read(&self.key("streak")).unwrap_or_default()
    }

    pub fn set_streak(&mut self, streak: &ChallengeStreak) -> bool {
        let key = self.key("streak");
        self.write(&key, streak)
    }

    /// Newest first.
    pub fn challenge_history(&self) -> Vec<ChallengeHistoryEntry> {
        self.read(&self.key("history")).unwrap_or_default()
    }

    /// Replaces any entry for the same date, keeps the list newest first and
    /// drops everything past the most recent `CHALLENGE_HISTORY_CAP` dates.
    pub fn append_challenge_history(&mut self, entry: ChallengeHistoryEntry) -> bool {
        let mut history = self.challenge_history();
        history.retain(|e| e.date != entry.date);
        history.push(entry);
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(CHALLENGE_HISTORY_CAP);
        let key = self.key("history");
        self.write(&key, &history)
    }

    // ── Leaderboard ──────────────────────────────────────────────────

    /// Highest score first.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.read(&self.key("leaderboard")).unwrap_or_default()
    }

    pub fn record_leaderboard_entry(&mut self, entry: LeaderboardEntry) -> bool {
        let mut board = self.leaderboard();
        board.push(entry);
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board.truncate(LEADERBOARD_CAP);
        let key = self.key("leaderboard");
        self.write(&key, &board)
    }

    pub fn top_scores(&self, mode: GameMode, limit: usize) -> Vec<LeaderboardEntry> {
        self.leaderboard()
            .into_iter()
            .filter(|e| e.game_mode == mode)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::other("offline")))
        }
        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("offline")))
        }
        fn delete(&mut self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("offline")))
        }
        fn list_prefix(&self, _prefix: &str) -> StorageResult<Vec<String>> {
            Err(StorageError::Io(std::io::Error::other("offline")))
        }
    }

    fn repo() -> ProgressRepository<MemoryStore> {
        ProgressRepository::new(MemoryStore::new(), "tester")
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn history_entry(day: u32) -> ChallengeHistoryEntry {
        ChallengeHistoryEntry {
            date: date(day),
            challenge_id: format!("daily_{}", date(day)),
            completed: true,
            score: 100,
            completed_at: None,
        }
    }

    fn leaderboard_entry(mode: GameMode, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            game_mode: mode,
            difficulty: Difficulty::Normal,
            score,
            statistics: GameStatistics {
                final_score: score,
                coffees_collected: 0,
                obstacles_dodged: 0,
                near_misses: 0,
                max_combo: 0,
                accuracy: 0.0,
                survival_seconds: 0,
            },
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_high_score_only_increases() {
        let mut repo = repo();
        assert_eq!(repo.high_score(GameMode::Classic), 0);
        assert!(repo.set_high_score_if_greater(GameMode::Classic, 500));
        assert!(!repo.set_high_score_if_greater(GameMode::Classic, 400));
        assert!(!repo.set_high_score_if_greater(GameMode::Classic, 500));
        assert_eq!(repo.high_score(GameMode::Classic), 500);
        assert_eq!(repo.high_score(GameMode::Sprint), 0);
    }

    #[test]
    fn test_keys_are_namespaced_by_user() {
        let mut repo = repo();
        repo.set_high_score_if_greater(GameMode::Chaos, 10);
        assert_eq!(
            repo.store().get("code_runner:tester:high_score:chaos").unwrap(),
            Some("10".to_string())
        );

        let other = ProgressRepository::new(repo.into_store(), "someone_else");
        assert_eq!(other.high_score(GameMode::Chaos), 0);
    }

    #[test]
    fn test_challenge_progress_roundtrip() {
        let mut repo = repo();
        assert!(repo.challenge_progress(date(1)).is_none());
        let progress = StoredProgress {
            progress: 50.0,
            current: 5,
            completed: false,
            attempts: 2,
            completed_at: None,
        };
        assert!(repo.set_challenge_progress(date(1), &progress));
        assert_eq!(repo.challenge_progress(date(1)), Some(progress));
    }

    #[test]
    fn test_malformed_value_reads_as_default() {
        let mut store = MemoryStore::new();
        store.set("code_runner:tester:streak", "{not json").unwrap();
        store.set("code_runner:tester:high_score:classic", "\"many\"").unwrap();
        let repo = ProgressRepository::new(store, "tester");
        assert_eq!(repo.streak(), ChallengeStreak::default());
        assert_eq!(repo.high_score(GameMode::Classic), 0);
    }

    #[test]
    fn test_history_dedupes_sorts_and_caps() {
        let mut repo = repo();
        repo.append_challenge_history(history_entry(2));
        repo.append_challenge_history(history_entry(1));
        let mut replacement = history_entry(2);
        replacement.score = 999;
        repo.append_challenge_history(replacement);

        let history = repo.challenge_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date(2));
        assert_eq!(history[0].score, 999);

        for day in 1..=31 {
            repo.append_challenge_history(history_entry(day));
        }
        let history = repo.challenge_history();
        assert_eq!(history.len(), CHALLENGE_HISTORY_CAP);
        assert_eq!(history[0].date, date(31));
        assert_eq!(history[CHALLENGE_HISTORY_CAP - 1].date, date(2));
    }

    #[test]
    fn test_leaderboard_sorted_and_filtered() {
        let mut repo = repo();
        repo.record_leaderboard_entry(leaderboard_entry(GameMode::Classic, 100));
        repo.record_leaderboard_entry(leaderboard_entry(GameMode::Sprint, 300));
        repo.record_leaderboard_entry(leaderboard_entry(GameMode::Classic, 200));

        let board = repo.leaderboard();
        assert_eq!(board.iter().map(|e| e.score).collect::<Vec<_>>(), vec![300, 200, 100]);

        let classic = repo.top_scores(GameMode::Classic, 1);
        assert_eq!(classic.len(), 1);
        assert_eq!(classic[0].score, 200);
    }

    #[test]
    fn test_broken_store_degrades_to_defaults() {
        let mut repo = ProgressRepository::new(BrokenStore, "tester");
        assert_eq!(repo.high_score(GameMode::Classic), 0);
        assert!(!repo.set_high_score_if_greater(GameMode::Classic, 10));
        assert!(repo.challenge_progress(date(1)).is_none());
        assert!(!repo.set_streak(&ChallengeStreak::default()));
        assert!(repo.challenge_history().is_empty());
        assert!(!repo.append_challenge_history(history_entry(1)));
        assert!(repo.leaderboard().is_empty());
    }
}
