//! Obstacle and coffee spawning, movement, and burst patterns.

use crate::core::constants::{
    BUG_STORM_SPACING, COFFEE_HEIGHT, COFFEE_RAIN_SPACING, COFFEE_WIDTH, COFFEE_Y_MAX,
    COFFEE_Y_MIN, CULL_MARGIN, MIN_OBSTACLE_FREQUENCY, OBSTACLE_FREQUENCY_STEP, OBSTACLE_HEIGHT,
    OBSTACLE_WIDTH, OBSTACLE_Y_OFFSET, SCORE_PER_FREQUENCY_STEP,
};
use crate::physics::Hitbox;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default look-ahead distance for the jump hint, in canvas px.
pub const JUMP_HINT_DISTANCE: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleType {
    Bug,
    Error,
    Breaking,
}

impl ObstacleType {
    pub const ALL: [ObstacleType; 3] = [
        ObstacleType::Bug,
        ObstacleType::Error,
        ObstacleType::Breaking,
    ];

    /// Points awarded for passing (not hitting) an obstacle of this type.
    pub fn points(&self) -> u32 {
        match self {
            Self::Bug => 1,
            Self::Error => 2,
            Self::Breaking => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Error => "Error",
            Self::Breaking => "Breaking Change",
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Hitbox,
    pub kind: ObstacleType,
    /// Dodge points were credited.
    pub passed: bool,
    /// Near-miss bonus was credited.
    pub near_miss_awarded: bool,
}

impl Obstacle {
    pub fn new(x: f64, ground_y: f64, kind: ObstacleType) -> Self {
        Self {
            body: Hitbox::new(
                x,
                ground_y - OBSTACLE_Y_OFFSET,
                OBSTACLE_WIDTH,
                OBSTACLE_HEIGHT,
            ),
            kind,
            passed: false,
            near_miss_awarded: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    pub body: Hitbox,
    pub collected: bool,
}

impl Coffee {
    /// Coffee at a random height between `COFFEE_Y_MIN` and `COFFEE_Y_MAX`
    /// above the ground line.
    pub fn new<R: Rng>(x: f64, ground_y: f64, rng: &mut R) -> Self {
        let y = ground_y - COFFEE_Y_MIN - rng.gen::<f64>() * (COFFEE_Y_MAX - COFFEE_Y_MIN);
        Self {
            body: Hitbox::new(x, y, COFFEE_WIDTH, COFFEE_HEIGHT),
            collected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePattern {
    Single,
    Double,
    Triple,
    Wave,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleState {
    pub obstacles: Vec<Obstacle>,
    pub coffees: Vec<Coffee>,
    pub obstacle_timer: u32,
    pub coffee_timer: u32,
}

/// Spawn interval after score tightening: 5 frames faster per 100 points,
/// never below `MIN_OBSTACLE_FREQUENCY`.
pub fn adjusted_obstacle_frequency(base_frequency: u32, current_score: u64) -> u32 {
    let steps = current_score / SCORE_PER_FREQUENCY_STEP;
    let reduction = steps.saturating_mul(OBSTACLE_FREQUENCY_STEP as u64);
    let adjusted = (base_frequency as u64).saturating_sub(reduction);
    (adjusted as u32).max(MIN_OBSTACLE_FREQUENCY)
}

/// Entities are dropped once their trailing edge passes the left cull
/// margin or their coordinates stop being finite.
pub fn is_culled(body: &Hitbox) -> bool {
    !body.is_finite() || body.right() <= -CULL_MARGIN
}

/// Advance the obstacle timer and spawn at the canvas edge when it fires.
/// Returns true if an obstacle was spawned.
pub fn update_obstacle_spawning<R: Rng>(
    state: &mut ObstacleState,
    canvas_width: f64,
    ground_y: f64,
    base_frequency: u32,
    current_score: u64,
    rng: &mut R,
) -> bool {
    state.obstacle_timer += 1;
    if state.obstacle_timer < adjusted_obstacle_frequency(base_frequency, current_score) {
        return false;
    }

    state.obstacle_timer = 0;
    let kind = ObstacleType::random(rng);
    state
        .obstacles
        .push(Obstacle::new(canvas_width, ground_y, kind));
    true
}

pub fn update_coffee_spawning<R: Rng>(
    state: &mut ObstacleState,
    canvas_width: f64,
    ground_y: f64,
    frequency: u32,
    rng: &mut R,
) -> bool {
    state.coffee_timer += 1;
    if state.coffee_timer < frequency {
        return false;
    }

    state.coffee_timer = 0;
    state.coffees.push(Coffee::new(canvas_width, ground_y, rng));
    true
}

/// Scroll obstacles left and drop culled ones. `passed` is left alone;
/// collision resolution owns that flag.
pub fn update_obstacle_positions(obstacles: &mut Vec<Obstacle>, speed: f64) {
    for obstacle in obstacles.iter_mut() {
        obstacle.body.x -= speed;
    }
    obstacles.retain(|o| !is_culled(&o.body));
}

pub fn update_coffee_positions(coffees: &mut Vec<Coffee>, speed: f64) {
    for coffee in coffees.iter_mut() {
        coffee.body.x -= speed;
    }
    coffees.retain(|c| !c.collected && !is_culled(&c.body));
}

/// Chaos bug storm: 5-8 bugs spaced `BUG_STORM_SPACING` apart.
pub fn spawn_bug_storm<R: Rng>(
    state: &mut ObstacleState,
    canvas_width: f64,
    ground_y: f64,
    rng: &mut R,
) -> usize {
    let count = rng.gen_range(5..=8);
    for i in 0..count {
        let x = canvas_width + i as f64 * BUG_STORM_SPACING;
        state
            .obstacles
            .push(Obstacle::new(x, ground_y, ObstacleType::Bug));
    }
    count
}

/// Chaos coffee rain: 8-12 coffees spaced `COFFEE_RAIN_SPACING` apart.
pub fn spawn_coffee_rain<R: Rng>(
    state: &mut ObstacleState,
    canvas_width: f64,
    ground_y: f64,
    rng: &mut R,
) -> usize {
    let count = rng.gen_range(8..=12);
    for i in 0..count {
        let x = canvas_width + i as f64 * COFFEE_RAIN_SPACING;
        state.coffees.push(Coffee::new(x, ground_y, rng));
    }
    count
}

pub fn spawn_obstacle_pattern<R: Rng>(
    state: &mut ObstacleState,
    canvas_width: f64,
    ground_y: f64,
    pattern: ObstaclePattern,
    rng: &mut R,
) {
    let offsets: &[f64] = match pattern {
        ObstaclePattern::Single => &[0.0],
        ObstaclePattern::Double => &[0.0, 150.0],
        ObstaclePattern::Triple => &[0.0, 100.0, 200.0],
        ObstaclePattern::Wave => &[0.0, 120.0, 240.0, 360.0],
    };

    for (i, offset) in offsets.iter().enumerate() {
        let mut obstacle = Obstacle::new(canvas_width + offset, ground_y, ObstacleType::random(rng));
        // Wave alternates low and raised obstacles.
        if pattern == ObstaclePattern::Wave && i % 2 == 1 {
            obstacle.body.y -= 20.0;
        }
        state.obstacles.push(obstacle);
    }
}

/// Nearest obstacle that has not yet fallen more than the cull margin
/// behind the player.
pub fn closest_obstacle(obstacles: &[Obstacle], player_x: f64) -> Option<&Obstacle> {
    obstacles
        .iter()
        .filter(|o| o.body.x > player_x - CULL_MARGIN)
        .min_by(|a, b| a.body.x.total_cmp(&b.body.x))
}

pub fn should_show_jump_hint(obstacles: &[Obstacle], player_x: f64, hint_distance: f64) -> bool {
    closest_obstacle(obstacles, player_x)
        .map(|o| {
            let distance = o.body.x - player_x;
            distance > 0.0 && distance < hint_distance
        })
        .unwrap_or(false)
}

/// Pulsing opacity for obstacles under the invisible-obstacles chaos event.
pub fn obstacle_opacity(invisible: bool, frame_count: u64) -> f64 {
    if !invisible {
        return 1.0;
    }
    0.3 + 0.7 * (frame_count as f64 * 0.05).sin().abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GROUND: f64 = 320.0;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_obstacle_points() {
        assert_eq!(ObstacleType::Bug.points(), 1);
        assert_eq!(ObstacleType::Error.points(), 2);
        assert_eq!(ObstacleType::Breaking.points(), 3);
    }

    #[test]
    fn test_frequency_tightens_with_score() {
        assert_eq!(adjusted_obstacle_frequency(80, 0), 80);
        assert_eq!(adjusted_obstacle_frequency(80, 99), 80);
        assert_eq!(adjusted_obstacle_frequency(80, 100), 75);
        assert_eq!(adjusted_obstacle_frequency(80, 500), 55);
        assert_eq!(adjusted_obstacle_frequency(80, 100_000), MIN_OBSTACLE_FREQUENCY);
    }

    #[test]
    fn test_obstacle_spawns_when_timer_reaches_frequency() {
        let mut state = ObstacleState::default();
        let mut rng = rng();
        for _ in 0..79 {
            assert!(!update_obstacle_spawning(&mut state, 800.0, GROUND, 80, 0, &mut rng));
        }
        assert!(update_obstacle_spawning(&mut state, 800.0, GROUND, 80, 0, &mut rng));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacle_timer, 0);
        assert_eq!(state.obstacles[0].body.x, 800.0);
        assert_eq!(state.obstacles[0].body.y, GROUND - OBSTACLE_Y_OFFSET);
    }

    #[test]
    fn test_coffee_spawn_height_in_range() {
        let mut state = ObstacleState::default();
        let mut rng = rng();
        for _ in 0..2000 {
            update_coffee_spawning(&mut state, 800.0, GROUND, 10, &mut rng);
        }
        assert!(!state.coffees.is_empty());
        for coffee in &state.coffees {
            assert!(coffee.body.y <= GROUND - COFFEE_Y_MIN);
            assert!(coffee.body.y >= GROUND - COFFEE_Y_MAX);
        }
    }

    #[test]
    fn test_positions_scroll_and_cull() {
        let mut obstacles = vec![
            Obstacle::new(100.0, GROUND, ObstacleType::Bug),
            Obstacle::new(-80.0, GROUND, ObstacleType::Error),
        ];
        update_obstacle_positions(&mut obstacles, 6.0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].body.x, 94.0);
        assert!(!obstacles[0].passed);
    }

    #[test]
    fn test_non_finite_entities_are_culled() {
        let mut obstacles = vec![Obstacle::new(f64::NAN, GROUND, ObstacleType::Bug)];
        update_obstacle_positions(&mut obstacles, 6.0);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_collected_coffees_are_removed() {
        let mut rng = rng();
        let mut coffees = vec![Coffee::new(200.0, GROUND, &mut rng), Coffee::new(300.0, GROUND, &mut rng)];
        coffees[0].collected = true;
        update_coffee_positions(&mut coffees, 5.0);
        assert_eq!(coffees.len(), 1);
        assert_eq!(coffees[0].body.x, 295.0);
    }

    #[test]
    fn test_bursts_spawn_expected_counts() {
        let mut state = ObstacleState::default();
        let mut rng = rng();
        let bugs = spawn_bug_storm(&mut state, 800.0, GROUND, &mut rng);
        assert!((5..=8).contains(&bugs));
        assert!(state.obstacles.iter().all(|o| o.kind == ObstacleType::Bug));
        assert_eq!(state.obstacles[1].body.x - state.obstacles[0].body.x, BUG_STORM_SPACING);

        let coffees = spawn_coffee_rain(&mut state, 800.0, GROUND, &mut rng);
        assert!((8..=12).contains(&coffees));
        assert_eq!(state.coffees.len(), coffees);
    }

    #[test]
    fn test_wave_pattern_alternates_height() {
        let mut state = ObstacleState::default();
        spawn_obstacle_pattern(&mut state, 800.0, GROUND, ObstaclePattern::Wave, &mut rng());
        assert_eq!(state.obstacles.len(), 4);
        assert_eq!(state.obstacles[3].body.x, 1160.0);
        assert_eq!(state.obstacles[0].body.y - state.obstacles[1].body.y, 20.0);

        let mut state = ObstacleState::default();
        spawn_obstacle_pattern(&mut state, 800.0, GROUND, ObstaclePattern::Triple, &mut rng());
        assert_eq!(state.obstacles.len(), 3);
    }

    #[test]
    fn test_jump_hint() {
        let obstacles = vec![
            Obstacle::new(400.0, GROUND, ObstacleType::Bug),
            Obstacle::new(150.0, GROUND, ObstacleType::Bug),
        ];
        assert_eq!(closest_obstacle(&obstacles, 50.0).map(|o| o.body.x), Some(150.0));
        assert!(should_show_jump_hint(&obstacles, 50.0, JUMP_HINT_DISTANCE));
        assert!(!should_show_jump_hint(&obstacles[..1], 50.0, JUMP_HINT_DISTANCE));
        assert!(!should_show_jump_hint(&[], 50.0, JUMP_HINT_DISTANCE));
    }

    #[test]
    fn test_opacity() {
        assert_eq!(obstacle_opacity(false, 42), 1.0);
        assert!((obstacle_opacity(true, 0) - 0.3).abs() < 1e-9);
        for frame in 0..200 {
            let o = obstacle_opacity(true, frame);
            assert!((0.3..=1.0).contains(&o));
        }
    }
}
