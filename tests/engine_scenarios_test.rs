//! Integration test: frame engine scenarios
//!
//! Drives `update_game_state` frame by frame from seeded rngs and asserts on
//! the resulting state: collisions, protection, combos, mode completion and
//! the score invariants.

use code_runner::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, COMBO_TIMEOUT};
use code_runner::core::{
    handle_jump, handle_jump_release, pause_game, reset_game, resume_game, start_game,
    update_game_state, Difficulty, FrameEvent, GameState, GameStatus,
};
use code_runner::core::constants::{BUG_STORM_CADENCE, COFFEE_RAIN_CADENCE, MAGNET_STRENGTH};
use code_runner::modes::{ChaosEvent, ChaosEventType, ChaosState, GameMode, GameModeState, MissionId};
use code_runner::obstacles::{Coffee, Obstacle, ObstacleType};
use code_runner::physics::Hitbox;
use code_runner::power_ups::{calculate_power_up_effects, ActivePowerUp, PowerUp, PowerUpType};
use code_runner::scoring::{ScoreEvent, ScoreEventKind};
use code_runner::simulator::bot_should_jump;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn playing_state(mode: GameMode, rng: &mut ChaCha8Rng) -> GameState {
    let mut state = GameState::new(mode, Difficulty::Normal, CANVAS_WIDTH, CANVAS_HEIGHT, 0, rng);
    start_game(&mut state);
    state
}

/// An obstacle that overlaps the standing player after this frame's scroll.
fn obstacle_on_player(state: &GameState) -> Obstacle {
    let mut obstacle = Obstacle::new(state.player.body.x, state.ground_y, ObstacleType::Bug);
    obstacle.body.y = state.player.body.y;
    obstacle
}

/// A coffee that overlaps the standing player after this frame's scroll.
fn coffee_on_player(state: &GameState) -> Coffee {
    let body = state.player.body;
    Coffee {
        body: Hitbox::new(body.x + 10.0, body.y + 10.0, 30.0, 30.0),
        collected: false,
    }
}

fn activate(state: &mut GameState, kind: PowerUpType) {
    state.power_ups.active.push(ActivePowerUp {
        kind,
        remaining_frames: kind.duration(),
        active: true,
    });
}

fn scored(events: &[FrameEvent]) -> Vec<ScoreEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            FrameEvent::Scored(event) => Some(event.clone()),
            _ => None,
        })
        .collect()
}

fn assert_score_invariant(state: &GameState) {
    let expected = (state.score.base_score * state.score.multiplier).floor() as u64;
    assert_eq!(state.score.current, expected, "frame {}", state.frame_count);
    if state.score.combo == 0 {
        assert_eq!(state.score.multiplier, 1.0, "frame {}", state.frame_count);
    }
}

// =============================================================================
// Collisions
// =============================================================================

#[test]
fn test_unprotected_hit_ends_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    state.score.high_score = 50;
    state.score.base_score = 100.0;
    state.score.current = 100;
    let obstacle = obstacle_on_player(&state);
    state.obstacles.obstacles.push(obstacle);

    let events = update_game_state(&mut state, &mut rng);

    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.score.high_score, 100);
    assert!(events.contains(&FrameEvent::GameOver {
        final_score: 100,
        new_high_score: true,
    }));
}

#[test]
fn test_game_over_keeps_better_high_score() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    state.score.high_score = 500;
    let obstacle = obstacle_on_player(&state);
    state.obstacles.obstacles.push(obstacle);

    let events = update_game_state(&mut state, &mut rng);

    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.score.high_score, 500);
    assert!(matches!(
        events.last(),
        Some(FrameEvent::GameOver {
            new_high_score: false,
            ..
        })
    ));

    // Finished sessions no longer advance.
    let frame = state.frame_count;
    assert!(update_game_state(&mut state, &mut rng).is_empty());
    assert_eq!(state.frame_count, frame);
}

#[test]
fn test_shield_absorbs_hit() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    activate(&mut state, PowerUpType::Shield);
    state.score.combo = 2;
    state.score.combo_timer = 60;
    let obstacle = obstacle_on_player(&state);
    state.obstacles.obstacles.push(obstacle);

    let events = update_game_state(&mut state, &mut rng);

    assert_eq!(state.status, GameStatus::Playing);
    assert!(events.contains(&FrameEvent::ShieldConsumed));
    assert!(state
        .power_ups
        .active
        .iter()
        .all(|p| p.kind != PowerUpType::Shield));
    assert_eq!(state.score.combo, 0);
    assert_eq!(state.score.multiplier, 1.0);
    assert!(state.obstacles.obstacles.is_empty());
}

#[test]
fn test_ghost_passes_through() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    activate(&mut state, PowerUpType::Ghost);
    activate(&mut state, PowerUpType::Shield);
    let obstacle = obstacle_on_player(&state);
    state.obstacles.obstacles.push(obstacle);

    let events = update_game_state(&mut state, &mut rng);

    assert_eq!(state.status, GameStatus::Playing);
    assert!(!events.contains(&FrameEvent::ShieldConsumed));
    assert_eq!(state.obstacles.obstacles.len(), 1);
}

#[test]
fn test_near_miss_awarded_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    // Scrolls to x=14: trailing edge just behind the player, centers close.
    state
        .obstacles
        .obstacles
        .push(Obstacle::new(20.0, state.ground_y, ObstacleType::Error));

    let events = update_game_state(&mut state, &mut rng);
    let kinds: Vec<_> = scored(&events).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ScoreEventKind::NearMiss, ScoreEventKind::Obstacle]);
    assert_eq!(state.score.near_misses, 1);
    assert_eq!(state.score.obstacles_dodged, 1);

    for _ in 0..5 {
        update_game_state(&mut state, &mut rng);
    }
    assert_eq!(state.score.near_misses, 1);
    assert_eq!(state.score.obstacles_dodged, 1);
}

// =============================================================================
// Combo
// =============================================================================

#[test]
fn test_third_coffee_activates_combo_multiplier() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut state = playing_state(GameMode::Classic, &mut rng);

    let mut coffee_events = Vec::new();
    for _ in 0..4 {
        let coffee = coffee_on_player(&state);
        state.obstacles.coffees.push(coffee);
        let events = update_game_state(&mut state, &mut rng);
        coffee_events.extend(scored(&events));
        assert_score_invariant(&state);
    }

    assert_eq!(coffee_events.len(), 4);
    assert_eq!(coffee_events[1].multiplier, 1.0);
    assert_eq!(coffee_events[2].multiplier, 2.0);
    assert_eq!(coffee_events[2].kind, ScoreEventKind::Combo);
    assert_eq!(coffee_events[2].message.as_deref(), Some("3x COMBO!"));
    // 10 points x 1.5 (Normal) x 2.0 (combo)
    assert_eq!(coffee_events[3].points, 30);
    assert_eq!(state.score.multiplier, 2.0);
    assert_eq!(state.score.combo, 4);
}

#[test]
fn test_combo_expires_after_timeout() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    for _ in 0..3 {
        let coffee = coffee_on_player(&state);
        state.obstacles.coffees.push(coffee);
        update_game_state(&mut state, &mut rng);
    }
    assert_eq!(state.score.multiplier, 2.0);

    for _ in 0..COMBO_TIMEOUT {
        update_game_state(&mut state, &mut rng);
        assert_score_invariant(&state);
    }
    assert_eq!(state.score.combo, 0);
    assert_eq!(state.score.multiplier, 1.0);
    assert_eq!(state.max_combo_reached, 3);
}

#[test]
fn test_score_invariant_over_long_run() {
    for seed in 0..3 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = playing_state(GameMode::Chaos, &mut rng);
        for _ in 0..3000 {
            if bot_should_jump(&state, 110.0) {
                handle_jump(&mut state);
            }
            update_game_state(&mut state, &mut rng);
            assert_score_invariant(&state);
            if !state.is_playing() {
                break;
            }
        }
    }
}

// =============================================================================
// Modes
// =============================================================================

#[test]
fn test_sprint_completes_when_time_runs_out() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut state = playing_state(GameMode::Sprint, &mut rng);
    if let GameModeState::Sprint(sprint) = &mut state.mode_state {
        sprint.time_remaining = 1;
    }

    let events = update_game_state(&mut state, &mut rng);

    match &state.mode_state {
        GameModeState::Sprint(sprint) => assert_eq!(sprint.time_remaining, 0),
        other => panic!("unexpected mode state {:?}", other),
    }
    assert_eq!(state.status, GameStatus::Complete);
    assert!(matches!(events.last(), Some(FrameEvent::ModeComplete { .. })));
}

#[test]
fn test_debug_mission_advances_after_fifteen_coffees() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut state = playing_state(GameMode::Debug, &mut rng);

    let mut all_events = Vec::new();
    for _ in 0..15 {
        let coffee = coffee_on_player(&state);
        state.obstacles.coffees.push(coffee);
        all_events.extend(update_game_state(&mut state, &mut rng));
    }

    assert!(all_events.contains(&FrameEvent::MissionCompleted(MissionId::CoffeeCollector)));
    assert!(all_events.contains(&FrameEvent::MissionAdvanced(MissionId::Survivor)));
    match &state.mode_state {
        GameModeState::Debug(debug) => {
            assert_ne!(debug.current_mission.id, MissionId::CoffeeCollector);
            assert_eq!(debug.missions_completed, 1);
        }
        other => panic!("unexpected mode state {:?}", other),
    }
    assert!(scored(&all_events)
        .iter()
        .any(|e| e.kind == ScoreEventKind::Mission));
}

#[test]
fn test_slow_mo_in_sprint_freezes_clock() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let mut state = playing_state(GameMode::Sprint, &mut rng);
    let body = state.player.body;
    state.power_ups.spawned.push(PowerUp {
        body: Hitbox::new(body.x + 10.0, body.y, 35.0, 35.0),
        kind: PowerUpType::SlowMo,
        collected: false,
    });

    let events = update_game_state(&mut state, &mut rng);
    assert!(events.contains(&FrameEvent::PowerUpCollected(PowerUpType::SlowMo)));
    assert!(events.contains(&FrameEvent::TimeFreezeActivated));

    let remaining = match &state.mode_state {
        GameModeState::Sprint(sprint) => sprint.time_remaining,
        _ => unreachable!(),
    };
    update_game_state(&mut state, &mut rng);
    match &state.mode_state {
        GameModeState::Sprint(sprint) => {
            assert!(sprint.time_frozen);
            assert_eq!(sprint.time_remaining, remaining);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_slow_mo_beats_speed_boost() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut state = playing_state(GameMode::Sprint, &mut rng);
    activate(&mut state, PowerUpType::SpeedBoost);
    activate(&mut state, PowerUpType::SlowMo);

    assert_eq!(calculate_power_up_effects(&state.power_ups.active).speed_multiplier, 0.5);
    update_game_state(&mut state, &mut rng);
    assert_eq!(state.game_speed, state.base_speed * 0.5);
}

// =============================================================================
// Chaos events
// =============================================================================

/// A Chaos session with `kind` already running and no other event due.
fn chaos_state(kind: ChaosEventType, rng: &mut ChaCha8Rng) -> GameState {
    let mut state = playing_state(GameMode::Chaos, rng);
    state.mode_state = GameModeState::Chaos(ChaosState {
        current_event: Some(ChaosEvent::new(kind)),
        event_timer: 500,
        events_triggered: 1,
    });
    state
}

#[test]
fn test_reverse_gravity_pulls_player_to_ceiling() {
    let mut rng = ChaCha8Rng::seed_from_u64(20);
    let mut state = chaos_state(ChaosEventType::ReverseGravity, &mut rng);
    let start_y = state.player.body.y;

    update_game_state(&mut state, &mut rng);
    assert_eq!(state.player.velocity_y, -Difficulty::Normal.gravity());
    assert!(state.player.body.y < start_y);
    assert!(!state.player.grounded);

    for _ in 0..60 {
        update_game_state(&mut state, &mut rng);
    }
    assert_eq!(state.status, GameStatus::Playing);
    assert!(state.player.grounded);
    assert_eq!(state.player.body.y, 0.0);

    // Jumping pushes away from the ceiling.
    handle_jump(&mut state);
    assert_eq!(state.player.velocity_y, -Difficulty::Normal.jump_force());
    assert!(state.player.velocity_y > 0.0);
}

#[test]
fn test_bug_storm_spawns_on_cadence() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut state = chaos_state(ChaosEventType::BugStorm, &mut rng);

    for _ in 1..BUG_STORM_CADENCE {
        update_game_state(&mut state, &mut rng);
    }
    assert!(state.obstacles.obstacles.is_empty());

    update_game_state(&mut state, &mut rng);
    assert_eq!(state.frame_count, BUG_STORM_CADENCE);
    let storm = state.obstacles.obstacles.len();
    assert!((5..=8).contains(&storm), "storm size {}", storm);
    assert!(state
        .obstacles
        .obstacles
        .iter()
        .all(|o| o.kind == ObstacleType::Bug));
}

#[test]
fn test_coffee_rain_spawns_on_cadence() {
    let mut rng = ChaCha8Rng::seed_from_u64(22);
    let mut state = chaos_state(ChaosEventType::CoffeeRain, &mut rng);

    for _ in 1..COFFEE_RAIN_CADENCE {
        update_game_state(&mut state, &mut rng);
    }
    assert!(state.obstacles.coffees.is_empty());

    update_game_state(&mut state, &mut rng);
    assert_eq!(state.frame_count, COFFEE_RAIN_CADENCE);
    let rain = state.obstacles.coffees.len();
    assert!((8..=12).contains(&rain), "rain size {}", rain);
}

#[test]
fn test_double_speed_doubles_scroll() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut state = chaos_state(ChaosEventType::DoubleSpeed, &mut rng);
    state
        .obstacles
        .obstacles
        .push(Obstacle::new(700.0, state.ground_y, ObstacleType::Bug));

    update_game_state(&mut state, &mut rng);

    assert_eq!(state.game_speed, state.base_speed * 2.0);
    assert_eq!(state.obstacles.obstacles[0].body.x, 700.0 - state.game_speed);
}

#[test]
fn test_magnet_pulls_coffee_toward_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(24);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    activate(&mut state, PowerUpType::Magnet);
    let player = state.player.body;
    state.obstacles.coffees.push(Coffee {
        body: Hitbox::new(150.0, player.y + 10.0, 30.0, 30.0),
        collected: false,
    });

    update_game_state(&mut state, &mut rng);

    let scrolled_x = 150.0 - state.game_speed;
    let (player_cx, _) = state.player.body.center();
    let distance = (scrolled_x + 15.0) - player_cx;
    let coffee = state.obstacles.coffees[0];
    assert!((coffee.body.x - (scrolled_x - MAGNET_STRENGTH / distance)).abs() < 1e-9);
    assert_eq!(coffee.body.y, player.y + 10.0);
}

// =============================================================================
// Input and lifecycle
// =============================================================================

#[test]
fn test_jump_boundary_without_double_jump() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    assert!(state.player.grounded);
    assert_eq!(state.player.coyote_timer, 0);

    handle_jump(&mut state);
    assert!(!state.player.grounded);
    let after_first = state.player;

    handle_jump(&mut state);
    assert_eq!(state.player, after_first);
}

#[test]
fn test_double_jump_when_enabled() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut state = GameState::new(
        GameMode::Classic,
        Difficulty::Normal,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        0,
        &mut rng,
    )
    .with_double_jump(true);
    start_game(&mut state);

    handle_jump(&mut state);
    update_game_state(&mut state, &mut rng);
    handle_jump(&mut state);
    assert!(state.player.has_double_jumped);
    assert_eq!(state.player.velocity_y, Difficulty::Normal.jump_force());
}

#[test]
fn test_release_cuts_rising_jump() {
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    let mut state = playing_state(GameMode::Classic, &mut rng);
    handle_jump(&mut state);
    update_game_state(&mut state, &mut rng);
    let rising = state.player.velocity_y;
    assert!(rising < 0.0);

    handle_jump_release(&mut state);
    assert!((state.player.velocity_y - rising * 0.4).abs() < 1e-9);
}

#[test]
fn test_input_ignored_unless_playing() {
    let mut rng = ChaCha8Rng::seed_from_u64(15);
    let mut state = GameState::new(
        GameMode::Classic,
        Difficulty::Normal,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        0,
        &mut rng,
    );
    let player = state.player;
    handle_jump(&mut state);
    assert_eq!(state.player, player);
    pause_game(&mut state);
    assert_eq!(state.status, GameStatus::Idle);

    start_game(&mut state);
    pause_game(&mut state);
    assert_eq!(state.status, GameStatus::Paused);
    handle_jump(&mut state);
    assert_eq!(state.player, player);
    assert!(update_game_state(&mut state, &mut rng).is_empty());
    assert_eq!(state.frame_count, 0);

    resume_game(&mut state);
    assert_eq!(state.status, GameStatus::Playing);
}

#[test]
fn test_reset_starts_fresh_session() {
    let mut rng = ChaCha8Rng::seed_from_u64(16);
    let mut state = playing_state(GameMode::Chaos, &mut rng);
    state.difficulty = Difficulty::Hard;
    state.score.high_score = 900;
    for _ in 0..50 {
        update_game_state(&mut state, &mut rng);
    }

    let fresh = reset_game(&state, &mut rng);
    assert_eq!(fresh.status, GameStatus::Idle);
    assert_eq!(fresh.frame_count, 0);
    assert_eq!(fresh.game_mode, GameMode::Chaos);
    assert_eq!(fresh.difficulty, Difficulty::Hard);
    assert_eq!(fresh.score.high_score, 900);
    assert!(fresh.obstacles.obstacles.is_empty());
}
