//! The per-frame update and session lifecycle.
//!
//! `update_game_state` advances exactly one frame and returns a list of
//! [`FrameEvent`]s describing what happened, so the shell and the session
//! layer can react without the simulation knowing about either.

use crate::core::constants::{
    BUG_STORM_CADENCE, CLASSIC_LEVEL_INTERVAL, COFFEE_RAIN_CADENCE, MISSION_COMPLETE_POINTS,
    SPEED_INCREASE_AMOUNT, SPEED_INCREASE_INTERVAL, TARGET_FPS,
};
use crate::core::game_state::{GameState, GameStatus};
use crate::modes::{
    activate_time_freeze, advance_to_next_mission, all_missions_completed, is_game_mode_complete,
    update_chaos, update_classic, update_mission, update_sprint, ChaosEffects, ChaosEventType,
    DebugState, GameModeState, MissionId, MissionMetric,
};
use crate::obstacles::{
    spawn_bug_storm, spawn_coffee_rain, update_coffee_positions, update_coffee_spawning,
    update_obstacle_positions, update_obstacle_spawning,
};
use crate::physics::{
    apply_magnetism, check_collision, initiate_jump, release_jump, update_player_physics,
};
use crate::power_ups::{
    calculate_power_up_effects, collect_power_up, consume_shield, has_power_up,
    spawn_chaos_power_up_burst, spawn_sprint_slow_mo, update_active_power_ups,
    update_power_up_positions, update_power_up_spawning, PowerUpEffects, PowerUpType,
};
use crate::scoring::{
    add_coffee_score, add_mission_score, add_near_miss_score, add_obstacle_score,
    add_passive_score, calculate_statistics, check_and_update_high_score, reset_combo,
    update_combo_timer, GameStatistics, ScoreEvent, ScoreState,
};
use rand::Rng;
use std::collections::VecDeque;

/// Something that happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// Points were credited (coffee, dodge, near miss, mission).
    Scored(ScoreEvent),
    ShieldConsumed,
    PowerUpCollected(PowerUpType),
    TimeFreezeActivated,
    SpeedLevelUp(u32),
    MissionCompleted(MissionId),
    MissionAdvanced(MissionId),
    ChaosEventStarted(ChaosEventType),
    /// Collision without protection.
    GameOver {
        final_score: u64,
        new_high_score: bool,
    },
    /// Sprint clock ran out or every Debug mission is done.
    ModeComplete {
        final_score: u64,
        new_high_score: bool,
    },
}

/// Advance one frame. No-op unless the session is playing.
pub fn update_game_state<R: Rng>(state: &mut GameState, rng: &mut R) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    // 1. Frame counter and mode sub-state
    state.frame_count += 1;
    update_mode_state(state, rng, &mut events);

    // 2. Mode objectives
    if is_game_mode_complete(&state.mode_state, state.frame_count) {
        state.status = GameStatus::Complete;
        let new_high_score = finalize_game(state);
        tracing::info!(
            mode = state.game_mode.as_str(),
            score = state.score.current,
            new_high_score,
            "Mode complete"
        );
        events.push(FrameEvent::ModeComplete {
            final_score: state.score.current,
            new_high_score,
        });
        return events;
    }

    // 3-4. Speed and power-up effects
    update_active_power_ups(&mut state.power_ups.active);
    let effects = calculate_power_up_effects(&state.power_ups.active);
    let chaos = state.mode_state.chaos_effects();
    state.game_speed = effective_speed(state, &effects, &chaos);

    // 5. Player
    let gravity = state.difficulty.gravity();
    state.player = update_player_physics(
        &state.player,
        gravity,
        state.ground_y,
        chaos.reverse_gravity,
    );

    // 6. Obstacles and coffees
    update_obstacle_spawning(
        &mut state.obstacles,
        state.canvas_width,
        state.ground_y,
        state.difficulty.obstacle_frequency(),
        state.score.current,
        rng,
    );
    update_obstacle_positions(&mut state.obstacles.obstacles, state.game_speed);

    update_coffee_spawning(
        &mut state.obstacles,
        state.canvas_width,
        state.ground_y,
        state.difficulty.coffee_frequency(),
        rng,
    );
    update_coffee_positions(&mut state.obstacles.coffees, state.game_speed);

    if effects.has_magnet {
        for coffee in state.obstacles.coffees.iter_mut().filter(|c| !c.collected) {
            coffee.body = apply_magnetism(
                &coffee.body,
                &state.player,
                effects.magnet_range,
                effects.magnet_strength,
            );
        }
    }

    // 7. Power-ups and mode-specific bursts
    update_power_up_spawning(
        &mut state.power_ups,
        state.canvas_width,
        state.ground_y,
        state.difficulty.power_up_frequency(),
        rng,
    );

    if matches!(state.mode_state, GameModeState::Sprint(_)) {
        spawn_sprint_slow_mo(&mut state.power_ups, state.canvas_width, state.ground_y, rng);
    }

    if chaos.bug_storm && state.frame_count % BUG_STORM_CADENCE == 0 {
        spawn_bug_storm(&mut state.obstacles, state.canvas_width, state.ground_y, rng);
    }
    if chaos.coffee_rain && state.frame_count % COFFEE_RAIN_CADENCE == 0 {
        spawn_coffee_rain(&mut state.obstacles, state.canvas_width, state.ground_y, rng);
    }

    update_power_up_positions(&mut state.power_ups.spawned, state.game_speed);

    // 8. Collisions
    resolve_collisions(state, &effects, &mut events);
    if state.status == GameStatus::GameOver {
        return events;
    }

    // 9. Passive score and combo window
    add_passive_score(&mut state.score, state.difficulty.score_multiplier());
    update_combo_timer(&mut state.score);
    state.max_combo_reached = state.max_combo_reached.max(state.score.combo);

    // 10. Classic base-speed ramp
    if matches!(state.mode_state, GameModeState::Classic(_))
        && state.frame_count % SPEED_INCREASE_INTERVAL == 0
    {
        state.base_speed = (state.base_speed + SPEED_INCREASE_AMOUNT).min(state.max_speed);
    }

    // 11. Recent events
    state.trim_recent_events();

    events
}

fn update_mode_state<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<FrameEvent>) {
    let frame_count = state.frame_count;
    match &mut state.mode_state {
        GameModeState::Classic(classic) => {
            if update_classic(classic, frame_count) {
                events.push(FrameEvent::SpeedLevelUp(classic.speed_level));
            }
        }
        GameModeState::Sprint(sprint) => update_sprint(sprint),
        GameModeState::Debug(debug) => {
            let seconds = (frame_count / TARGET_FPS) as u32;
            let speed_level = 1 + (frame_count / CLASSIC_LEVEL_INTERVAL) as u32;
            let score = &mut state.score;
            let recent = &mut state.recent_events;
            feed_mission(debug, score, recent, MissionMetric::Time, seconds, events);
            feed_mission(debug, score, recent, MissionMetric::Speed, speed_level, events);
        }
        GameModeState::Chaos(chaos) => {
            if let Some(kind) = update_chaos(chaos, rng) {
                tracing::info!(event = kind.name(), "Chaos event triggered");
                events.push(FrameEvent::ChaosEventStarted(kind));
                // Each event opens with a handful of pickups.
                spawn_chaos_power_up_burst(
                    &mut state.power_ups,
                    state.canvas_width,
                    state.ground_y,
                    rng,
                );
            }
        }
    }
}

/// Report a metric to the active Debug mission. On completion the mission
/// bonus is credited and the next mission starts immediately.
fn feed_mission(
    debug: &mut DebugState,
    score: &mut ScoreState,
    recent: &mut VecDeque<ScoreEvent>,
    metric: MissionMetric,
    value: u32,
    events: &mut Vec<FrameEvent>,
) {
    if !update_mission(debug, metric, value) {
        return;
    }

    let completed = debug.current_mission.id;
    tracing::info!(mission = completed.as_str(), "Mission complete");
    events.push(FrameEvent::MissionCompleted(completed));
    let bonus = add_mission_score(score, MISSION_COMPLETE_POINTS);
    recent.push_front(bonus.clone());
    events.push(FrameEvent::Scored(bonus));

    if !all_missions_completed(debug) && advance_to_next_mission(debug) {
        events.push(FrameEvent::MissionAdvanced(debug.current_mission.id));
    }
}

/// Base speed scaled by the mode and capped at the difficulty maximum, then
/// scaled by power-up and chaos multipliers.
pub fn effective_speed(state: &GameState, effects: &PowerUpEffects, chaos: &ChaosEffects) -> f64 {
    let capped = (state.base_speed * state.mode_state.speed_multiplier()).min(state.max_speed);
    capped * effects.speed_multiplier * chaos.speed_multiplier
}

/// Near miss, then dodge bonus, then hit handling per obstacle; coffee and
/// power-up pickups after. A fatal hit ends the pass immediately.
fn resolve_collisions(state: &mut GameState, effects: &PowerUpEffects, events: &mut Vec<FrameEvent>) {
    let difficulty_multiplier = state.difficulty.score_multiplier();
    let player = state.player;

    let mut index = 0;
    while index < state.obstacles.obstacles.len() {
        let result = check_collision(&player, &state.obstacles.obstacles[index].body);
        let obstacle = &mut state.obstacles.obstacles[index];
        let crossed = obstacle.body.right() < player.body.x;

        let mut scored = Vec::new();
        if result.near_miss && !obstacle.near_miss_awarded && !obstacle.passed && crossed {
            obstacle.near_miss_awarded = true;
            scored.push(add_near_miss_score(&mut state.score, difficulty_multiplier));
            if let GameModeState::Debug(debug) = &mut state.mode_state {
                let near_misses = state.score.near_misses;
                feed_mission(
                    debug,
                    &mut state.score,
                    &mut state.recent_events,
                    MissionMetric::NearMiss,
                    near_misses,
                    events,
                );
            }
        }

        let obstacle = &mut state.obstacles.obstacles[index];
        if !obstacle.passed && crossed {
            obstacle.passed = true;
            let points = obstacle.kind.points();
            scored.push(add_obstacle_score(&mut state.score, points, difficulty_multiplier));
        }

        for event in scored {
            state.push_event(event.clone());
            events.push(FrameEvent::Scored(event));
        }

        if result.collided {
            if effects.has_ghost {
                index += 1;
                continue;
            }

            if has_power_up(&state.power_ups.active, PowerUpType::Shield) {
                consume_shield(&mut state.power_ups.active);
                reset_combo(&mut state.score);
                state.obstacles.obstacles.remove(index);
                tracing::debug!(frame = state.frame_count, "Shield absorbed hit");
                events.push(FrameEvent::ShieldConsumed);
                continue;
            }

            state.status = GameStatus::GameOver;
            let new_high_score = finalize_game(state);
            tracing::info!(
                mode = state.game_mode.as_str(),
                score = state.score.current,
                new_high_score,
                "Game over"
            );
            events.push(FrameEvent::GameOver {
                final_score: state.score.current,
                new_high_score,
            });
            return;
        }

        index += 1;
    }

    for coffee_index in 0..state.obstacles.coffees.len() {
        let coffee = &state.obstacles.coffees[coffee_index];
        if coffee.collected || !check_collision(&player, &coffee.body).collided {
            continue;
        }

        state.obstacles.coffees[coffee_index].collected = true;
        let event = add_coffee_score(&mut state.score, difficulty_multiplier);
        state.push_event(event.clone());
        events.push(FrameEvent::Scored(event));

        if let GameModeState::Debug(debug) = &mut state.mode_state {
            let coffees = state.score.coffees_collected;
            let combo = state.score.combo;
            let score = &mut state.score;
            let recent = &mut state.recent_events;
            feed_mission(debug, score, recent, MissionMetric::Coffee, coffees, events);
            feed_mission(debug, score, recent, MissionMetric::Combo, combo, events);
        }
    }
    state.obstacles.coffees.retain(|c| !c.collected);

    for power_up in state.power_ups.spawned.iter_mut() {
        if power_up.collected || !check_collision(&player, &power_up.body).collided {
            continue;
        }

        power_up.collected = true;
        collect_power_up(&mut state.power_ups.active, power_up.kind);
        events.push(FrameEvent::PowerUpCollected(power_up.kind));

        if power_up.kind == PowerUpType::SlowMo {
            if let GameModeState::Sprint(sprint) = &mut state.mode_state {
                activate_time_freeze(sprint);
                events.push(FrameEvent::TimeFreezeActivated);
            }
        }
    }
    state.power_ups.spawned.retain(|p| !p.collected);
}

/// Commit the in-memory high score. Returns true on a new record.
fn finalize_game(state: &mut GameState) -> bool {
    check_and_update_high_score(&mut state.score)
}

/// Apply a jump press. Ignored unless playing.
pub fn handle_jump(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    let reverse = state.mode_state.chaos_effects().reverse_gravity;
    state.player = initiate_jump(&state.player, state.difficulty.jump_force(), reverse);
}

pub fn handle_jump_release(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    state.player = release_jump(&state.player);
}

pub fn start_game(state: &mut GameState) {
    if state.status == GameStatus::Idle {
        state.status = GameStatus::Playing;
    }
}

pub fn pause_game(state: &mut GameState) {
    if state.status == GameStatus::Playing {
        state.status = GameStatus::Paused;
    }
}

pub fn resume_game(state: &mut GameState) {
    if state.status == GameStatus::Paused {
        state.status = GameStatus::Playing;
    }
}

/// Fresh idle session with the same mode, difficulty, canvas, and best score.
pub fn reset_game<R: Rng>(state: &GameState, rng: &mut R) -> GameState {
    GameState::new(
        state.game_mode,
        state.difficulty,
        state.canvas_width,
        state.canvas_height,
        state.score.high_score,
        rng,
    )
    .with_double_jump(state.double_jump_enabled)
}

pub fn game_statistics(state: &GameState) -> GameStatistics {
    calculate_statistics(&state.score, state.frame_count, state.max_combo_reached)
}

pub fn is_new_high_score(state: &GameState) -> bool {
    state.score.current > 0 && state.score.current == state.score.high_score
}
