//! Integration test: session persistence
//!
//! Plays whole runs through `GameSession` and checks what lands in the
//! progress store: high scores, the leaderboard, and daily challenge
//! attempts. A store that fails every call must never stop the game.

use chrono::NaiveDate;
use code_runner::config::Settings;
use code_runner::core::GameStatus;
use code_runner::daily::load_challenge;
use code_runner::modes::GameMode;
use code_runner::session::{GameSession, NoopObserver};
use code_runner::storage::{
    FileStore, KeyValueStore, MemoryStore, ProgressRepository, StorageResult,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

const MAX_TICKS: u32 = 10_000;

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("code_runner_session_{}_{}", std::process::id(), n))
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(std::io::Error::other("disk unplugged").into())
    }
    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(std::io::Error::other("disk unplugged").into())
    }
    fn delete(&mut self, _key: &str) -> StorageResult<()> {
        Err(std::io::Error::other("disk unplugged").into())
    }
    fn list_prefix(&self, _prefix: &str) -> StorageResult<Vec<String>> {
        Err(std::io::Error::other("disk unplugged").into())
    }
}

/// Memory store that counts writes.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: usize,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.writes += 1;
        self.inner.set(key, value)
    }
    fn delete(&mut self, key: &str) -> StorageResult<()> {
        self.writes += 1;
        self.inner.delete(key)
    }
    fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.inner.list_prefix(prefix)
    }
}

fn session<S: KeyValueStore>(store: S, seed: u64) -> GameSession<S, ChaCha8Rng> {
    let repo = ProgressRepository::new(store, "session-tester");
    GameSession::new(
        repo,
        &Settings::default(),
        ChaCha8Rng::seed_from_u64(seed),
        NoopObserver,
    )
}

/// Tick without jumping until the run ends. A grounded player always
/// meets an obstacle eventually.
fn play_to_end<S: KeyValueStore>(session: &mut GameSession<S, ChaCha8Rng>) {
    session.start();
    for _ in 0..MAX_TICKS {
        session.tick();
        if session.state().status.is_finished() {
            return;
        }
    }
    panic!("run did not finish within {} ticks", MAX_TICKS);
}

// =============================================================================
// Memory store
// =============================================================================

#[test]
fn test_finished_run_records_high_score_and_leaderboard() {
    let mut session = session(MemoryStore::new(), 1);
    play_to_end(&mut session);

    let final_score = session.state().score.current;
    assert_eq!(session.state().status, GameStatus::GameOver);
    assert!(final_score > 0);
    assert_eq!(session.repository().high_score(GameMode::Classic), final_score);

    let board = session.repository().leaderboard();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].score, final_score);
    assert_eq!(board[0].game_mode, GameMode::Classic);
    assert_eq!(board[0].statistics.final_score, final_score);
}

#[test]
fn test_reset_keeps_best_score() {
    let mut session = session(MemoryStore::new(), 2);
    play_to_end(&mut session);
    let best = session.state().score.high_score;

    session.reset();
    assert_eq!(session.state().status, GameStatus::Idle);
    assert_eq!(session.state().score.current, 0);
    assert_eq!(session.state().score.high_score, best);

    play_to_end(&mut session);
    assert_eq!(session.repository().leaderboard().len(), 2);
    assert!(session.repository().high_score(GameMode::Classic) >= best);
}

#[test]
fn test_daily_challenge_attempt_counted_per_run() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let mut session = session(MemoryStore::new(), 3);
    session.activate_challenge(day);
    play_to_end(&mut session);

    let challenge = session.challenge().unwrap();
    assert_eq!(challenge.attempts, 1);
    assert!(challenge.progress > 0.0);

    let stored = load_challenge(session.repository(), day);
    assert_eq!(stored.attempts, 1);
    assert_eq!(stored.progress, challenge.progress);
}

#[test]
fn test_store_untouched_while_playing() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let mut session = session(CountingStore::default(), 7);
    session.activate_challenge(day);
    session.start();
    for _ in 0..60 {
        session.tick();
    }
    assert_eq!(session.state().status, GameStatus::Playing);
    assert_eq!(session.repository().store().writes, 0);

    play_to_end(&mut session);
    let challenge = session.challenge().unwrap();
    assert!(!challenge.completed);
    // Challenge progress, attempt, high score and leaderboard.
    assert_eq!(session.repository().store().writes, 4);
}

// =============================================================================
// Failing store
// =============================================================================

#[test]
fn test_failing_store_does_not_stop_play() {
    let mut session = session(FailingStore, 4);
    assert_eq!(session.state().score.high_score, 0);
    session.activate_challenge(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    play_to_end(&mut session);

    assert_eq!(session.state().status, GameStatus::GameOver);
    assert!(session.state().score.current > 0);
    assert_eq!(session.repository().high_score(GameMode::Classic), 0);
    assert!(session.repository().leaderboard().is_empty());
}

// =============================================================================
// File store
// =============================================================================

#[test]
fn test_file_store_persists_across_sessions() {
    let dir = temp_dir();

    let final_score = {
        let mut session = session(FileStore::open_in(&dir).unwrap(), 5);
        play_to_end(&mut session);
        session.state().score.current
    };

    let reopened = session(FileStore::open_in(&dir).unwrap(), 6);
    assert_eq!(reopened.state().score.high_score, final_score);
    assert_eq!(
        reopened.repository().top_scores(GameMode::Classic, 10)[0].score,
        final_score
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_store_file_opens_empty() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("progress.json"), "{ not json").unwrap();

    let store = FileStore::open_in(&dir).unwrap();
    assert!(store.list_prefix("").unwrap().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
