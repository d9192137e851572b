//! Headless runs of the real engine driven by a simple jumping bot.

use super::config::SimConfig;
use super::report::{RunOutcome, RunStats, SimReport};
use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::core::engine::{game_statistics, handle_jump, start_game, update_game_state, FrameEvent};
use crate::core::game_state::{GameState, GameStatus};
use crate::obstacles::should_show_jump_hint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => StdRng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, score {}, {}s, {} coffees, {} near misses",
                run_idx + 1,
                config.num_runs,
                run.outcome,
                run.statistics.final_score,
                run.statistics.survival_seconds,
                run.statistics.coffees_collected,
                run.statistics.near_misses,
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Jump when grounded and the next obstacle is inside the reaction window.
pub fn bot_should_jump(state: &GameState, reaction_distance: f64) -> bool {
    state.player.grounded
        && should_show_jump_hint(
            &state.obstacles.obstacles,
            state.player.body.x,
            reaction_distance,
        )
}

pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let mut state = GameState::new(
        config.game_mode,
        config.difficulty,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        0,
        rng,
    );
    start_game(&mut state);

    let mut power_ups_collected = 0;
    let mut chaos_events = 0;
    let mut missions_completed = 0;

    while state.status == GameStatus::Playing && state.frame_count < config.max_frames_per_run {
        if bot_should_jump(&state, config.reaction_distance) {
            handle_jump(&mut state);
        }
        for event in update_game_state(&mut state, rng) {
            match event {
                FrameEvent::PowerUpCollected(_) => power_ups_collected += 1,
                FrameEvent::ChaosEventStarted(_) => chaos_events += 1,
                FrameEvent::MissionCompleted(_) => missions_completed += 1,
                _ => {}
            }
        }
    }

    let outcome = match state.status {
        GameStatus::GameOver => RunOutcome::Crashed,
        GameStatus::Complete => RunOutcome::Completed,
        _ => RunOutcome::TimedOut,
    };

    RunStats {
        outcome,
        statistics: game_statistics(&state),
        power_ups_collected,
        chaos_events,
        missions_completed,
    }
}
