//! A play session backed by the progress store.
//!
//! `GameSession` owns the simulation state, its rng and the repository,
//! and turns the engine's per-frame events into persistence writes and
//! observer callbacks. The simulation itself never touches storage, and
//! the session only writes when a run ends or a daily challenge is first
//! completed. Per-frame challenge progress stays in memory.

use crate::config::Settings;
use crate::core::engine::{
    game_statistics, handle_jump, handle_jump_release, pause_game, reset_game, resume_game,
    start_game, update_game_state, FrameEvent,
};
use crate::core::game_state::{GameState, GameStatus};
use crate::daily::{
    calculate_progress, is_challenge_completed, load_challenge, record_challenge_attempt,
    update_challenge_progress, ChallengeType, DailyChallenge,
};
use crate::scoring::GameStatistics;
use crate::storage::{KeyValueStore, LeaderboardEntry, ProgressRepository};
use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Callbacks the shell can hook. Every method defaults to doing nothing.
pub trait GameObserver {
    fn on_score(&mut self, _score: u64) {}
    fn on_combo(&mut self, _combo: u32) {}
    fn on_game_over(&mut self, _final_score: u64, _statistics: &GameStatistics) {}
    fn on_mode_complete(&mut self, _final_score: u64, _statistics: &GameStatistics) {}
    /// `percentage` is 0-100.
    fn on_challenge_progress(&mut self, _percentage: f64, _completed: bool) {}
}

pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// The value a daily challenge of `kind` measures in this run.
pub fn challenge_metric(kind: ChallengeType, state: &GameState) -> u32 {
    match kind {
        ChallengeType::Score => u32::try_from(state.score.current).unwrap_or(u32::MAX),
        ChallengeType::Collect => state.score.coffees_collected,
        ChallengeType::Survive => u32::try_from(state.survival_seconds()).unwrap_or(u32::MAX),
        ChallengeType::Avoid => state.score.obstacles_dodged,
        ChallengeType::Complete => u32::from(state.status == GameStatus::Complete),
    }
}

pub struct GameSession<S: KeyValueStore, R: Rng, O: GameObserver = NoopObserver> {
    state: GameState,
    rng: R,
    repository: ProgressRepository<S>,
    observer: O,
    challenge: Option<DailyChallenge>,
    last_metric: Option<u32>,
    /// Best metric for the active challenge's date, stored or seen this session.
    best_metric: u32,
}

impl<S: KeyValueStore, R: Rng, O: GameObserver> GameSession<S, R, O> {
    pub fn new(repository: ProgressRepository<S>, settings: &Settings, mut rng: R, observer: O) -> Self {
        let high_score = repository.high_score(settings.game_mode);
        let state = GameState::new(
            settings.game_mode,
            settings.difficulty,
            settings.canvas_width,
            settings.canvas_height,
            high_score,
            &mut rng,
        )
        .with_double_jump(settings.double_jump_enabled);

        tracing::info!(
            user = repository.user_id(),
            mode = settings.game_mode.as_str(),
            difficulty = settings.difficulty.as_str(),
            high_score,
            "Session created"
        );

        Self {
            state,
            rng,
            repository,
            observer,
            challenge: None,
            last_metric: None,
            best_metric: 0,
        }
    }

    /// Track the daily challenge for `date` during this session.
    pub fn activate_challenge(&mut self, date: NaiveDate) {
        let challenge = load_challenge(&self.repository, date);
        tracing::info!(challenge = %challenge.id, target = challenge.target, "Daily challenge active");
        self.best_metric = self
            .repository
            .challenge_progress(date)
            .map(|stored| stored.current)
            .unwrap_or(0);
        self.challenge = Some(challenge);
        self.last_metric = None;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn repository(&self) -> &ProgressRepository<S> {
        &self.repository
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn challenge(&self) -> Option<&DailyChallenge> {
        self.challenge.as_ref()
    }

    pub fn start(&mut self) {
        start_game(&mut self.state);
    }

    pub fn pause(&mut self) {
        pause_game(&mut self.state);
    }

    pub fn resume(&mut self) {
        resume_game(&mut self.state);
    }

    pub fn jump(&mut self) {
        handle_jump(&mut self.state);
    }

    pub fn release(&mut self) {
        handle_jump_release(&mut self.state);
    }

    /// Discard the run and start a fresh idle one with the same setup.
    pub fn reset(&mut self) {
        self.state = reset_game(&self.state, &mut self.rng);
        self.last_metric = None;
        tracing::info!(mode = self.state.game_mode.as_str(), "Session reset");
    }

    /// Advance one frame and dispatch its effects.
    pub fn tick(&mut self) -> Vec<FrameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }

        let events = update_game_state(&mut self.state, &mut self.rng);
        self.observer.on_score(self.state.score.current);
        self.observer.on_combo(self.state.score.combo);
        self.push_challenge_progress();

        for event in &events {
            match event {
                FrameEvent::GameOver { final_score, .. } => {
                    let statistics = self.finish();
                    self.observer.on_game_over(*final_score, &statistics);
                }
                FrameEvent::ModeComplete { final_score, .. } => {
                    let statistics = self.finish();
                    self.observer.on_mode_complete(*final_score, &statistics);
                }
                _ => {}
            }
        }

        events
    }

    fn push_challenge_progress(&mut self) {
        let Some(challenge) = self.challenge.as_mut() else {
            return;
        };
        let metric = challenge_metric(challenge.kind, &self.state);
        if self.last_metric == Some(metric) {
            return;
        }
        self.last_metric = Some(metric);
        self.best_metric = self.best_metric.max(metric);

        if !challenge.completed && is_challenge_completed(challenge, self.best_metric) {
            update_challenge_progress(&mut self.repository, challenge, self.best_metric, Utc::now());
        } else {
            let percentage = calculate_progress(challenge, self.best_metric).percentage;
            challenge.progress = challenge.progress.max(percentage);
        }
        self.observer
            .on_challenge_progress(challenge.progress, challenge.completed);
    }

    /// Persist the finished run.
    fn finish(&mut self) -> GameStatistics {
        let statistics = game_statistics(&self.state);
        let score = self.state.score.current;

        self.repository
            .set_high_score_if_greater(self.state.game_mode, score);
        self.repository.record_leaderboard_entry(LeaderboardEntry {
            game_mode: self.state.game_mode,
            difficulty: self.state.difficulty,
            score,
            statistics: statistics.clone(),
            timestamp: Utc::now(),
        });

        if let Some(challenge) = self.challenge.as_mut() {
            update_challenge_progress(&mut self.repository, challenge, self.best_metric, Utc::now());
            record_challenge_attempt(&mut self.repository, challenge);
        }

        statistics
    }
}
