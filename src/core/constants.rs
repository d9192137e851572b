// Canvas and timing
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 400.0;
pub const TARGET_FPS: u64 = 60;
pub const FRAME_MS: u64 = 16; // ~60 FPS

// Player
pub const PLAYER_WIDTH: f64 = 40.0;
pub const PLAYER_HEIGHT: f64 = 50.0;
pub const PLAYER_X: f64 = 50.0;
pub const GROUND_Y_OFFSET: f64 = 80.0; // from bottom of canvas
pub const COYOTE_TIME_FRAMES: u32 = 6;
pub const VARIABLE_JUMP_CUT: f64 = 0.4; // velocity kept when jump released early
pub const DOUBLE_JUMP_ENABLED: bool = false;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 35.0;
pub const OBSTACLE_HEIGHT: f64 = 35.0;
pub const OBSTACLE_Y_OFFSET: f64 = 30.0; // from ground
pub const MIN_OBSTACLE_FREQUENCY: u32 = 30;
pub const OBSTACLE_FREQUENCY_STEP: u32 = 5;
pub const SCORE_PER_FREQUENCY_STEP: u64 = 100;
pub const CULL_MARGIN: f64 = 50.0;
pub const BUG_STORM_SPACING: f64 = 80.0;
pub const COFFEE_RAIN_SPACING: f64 = 60.0;

// Coffee (heights above ground)
pub const COFFEE_WIDTH: f64 = 30.0;
pub const COFFEE_HEIGHT: f64 = 30.0;
pub const COFFEE_Y_MIN: f64 = 80.0;
pub const COFFEE_Y_MAX: f64 = 130.0;

// Power-ups (heights above ground)
pub const POWERUP_WIDTH: f64 = 35.0;
pub const POWERUP_HEIGHT: f64 = 35.0;
pub const POWERUP_Y_MIN: f64 = 60.0;
pub const POWERUP_Y_MAX: f64 = 100.0;
pub const MAGNET_RANGE: f64 = 150.0;
pub const MAGNET_STRENGTH: f64 = 8.0;
pub const SPEED_BOOST_MULTIPLIER: f64 = 1.5;
pub const SLOW_MO_MULTIPLIER: f64 = 0.5;
pub const SPRINT_SLOW_MO_CHANCE: f64 = 0.02; // per frame

// Scoring
pub const POINTS_PER_FRAME: f64 = 0.1;
pub const COFFEE_POINTS: f64 = 10.0;
pub const NEAR_MISS_DISTANCE: f64 = 20.0;
pub const NEAR_MISS_POINTS: f64 = 5.0;
pub const MISSION_COMPLETE_POINTS: u64 = 250;
pub const TIME_BONUS_PER_SECOND: u64 = 100;

// Combo system
pub const COMBO_TIMEOUT: u32 = 120; // 2 seconds at 60 FPS
pub const COMBO_THRESHOLD: u32 = 3;
pub const COMBO_MULTIPLIER: f64 = 2.0;

// Sprint mode
pub const SPRINT_DURATION_SECONDS: u32 = 60;
pub const TIME_FREEZE_DURATION: u32 = 180;

// Classic mode
pub const CLASSIC_LEVEL_INTERVAL: u64 = 600;
pub const CLASSIC_SPEED_STEP: f64 = 0.1;
pub const CLASSIC_MAX_SPEED_MULTIPLIER: f64 = 2.0;
pub const SPEED_INCREASE_INTERVAL: u64 = 100;
pub const SPEED_INCREASE_AMOUNT: f64 = 0.5;

// Chaos mode
pub const CHAOS_EVENT_INTERVAL_MIN: u32 = 300;
pub const CHAOS_EVENT_INTERVAL_MAX: u32 = 600;
pub const BUG_STORM_CADENCE: u64 = 20;
pub const COFFEE_RAIN_CADENCE: u64 = 30;
pub const CHAOS_DOUBLE_SPEED_MULTIPLIER: f64 = 2.0;

// Recent score events kept for the HUD (~5 seconds worth)
pub const RECENT_EVENT_CAP: usize = (TARGET_FPS * 5) as usize;

// Persistence caps
pub const LEADERBOARD_CAP: usize = 100;
pub const CHALLENGE_HISTORY_CAP: usize = 30;
