//! Power-up pickups, the active-effect list, and the per-frame effect snapshot.

use crate::core::constants::{
    MAGNET_RANGE, MAGNET_STRENGTH, POWERUP_HEIGHT, POWERUP_WIDTH, POWERUP_Y_MAX, POWERUP_Y_MIN,
    SLOW_MO_MULTIPLIER, SPEED_BOOST_MULTIPLIER, SPRINT_SLOW_MO_CHANCE,
};
use crate::obstacles::is_culled;
use crate::physics::Hitbox;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpType {
    Shield,
    Magnet,
    SpeedBoost,
    SlowMo,
    Ghost,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 5] = [
        PowerUpType::Shield,
        PowerUpType::Magnet,
        PowerUpType::SpeedBoost,
        PowerUpType::SlowMo,
        PowerUpType::Ghost,
    ];

    /// Full duration in frames.
    pub fn duration(&self) -> u32 {
        match self {
            Self::Shield => 300,
            Self::Magnet => 360,
            Self::SpeedBoost => 240,
            Self::SlowMo => 240,
            Self::Ghost => 180,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shield => "Shield",
            Self::Magnet => "Magnet",
            Self::SpeedBoost => "Speed Boost",
            Self::SlowMo => "Slow-Mo",
            Self::Ghost => "Ghost",
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Hitbox,
    pub kind: PowerUpType,
    pub collected: bool,
}

impl PowerUp {
    pub fn new<R: Rng>(x: f64, ground_y: f64, kind: PowerUpType, rng: &mut R) -> Self {
        let y = ground_y - POWERUP_Y_MIN - rng.gen::<f64>() * (POWERUP_Y_MAX - POWERUP_Y_MIN);
        Self {
            body: Hitbox::new(x, y, POWERUP_WIDTH, POWERUP_HEIGHT),
            kind,
            collected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpType,
    pub remaining_frames: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpState {
    pub spawned: Vec<PowerUp>,
    pub active: Vec<ActivePowerUp>,
    pub spawn_timer: u32,
}

/// Aggregate effect of every active power-up for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpEffects {
    pub has_shield: bool,
    pub has_magnet: bool,
    pub has_speed_boost: bool,
    pub has_slow_mo: bool,
    pub has_ghost: bool,
    pub speed_multiplier: f64,
    pub magnet_range: f64,
    pub magnet_strength: f64,
}

impl Default for PowerUpEffects {
    fn default() -> Self {
        Self {
            has_shield: false,
            has_magnet: false,
            has_speed_boost: false,
            has_slow_mo: false,
            has_ghost: false,
            speed_multiplier: 1.0,
            magnet_range: 0.0,
            magnet_strength: 0.0,
        }
    }
}

pub fn update_power_up_spawning<R: Rng>(
    state: &mut PowerUpState,
    canvas_width: f64,
    ground_y: f64,
    frequency: u32,
    rng: &mut R,
) -> bool {
    state.spawn_timer += 1;
    if state.spawn_timer < frequency {
        return false;
    }

    state.spawn_timer = 0;
    let kind = PowerUpType::random(rng);
    state
        .spawned
        .push(PowerUp::new(canvas_width, ground_y, kind, rng));
    true
}

pub fn update_power_up_positions(power_ups: &mut Vec<PowerUp>, speed: f64) {
    for power_up in power_ups.iter_mut() {
        power_up.body.x -= speed;
    }
    power_ups.retain(|p| !p.collected && !is_culled(&p.body));
}

/// Activate a power-up. A type that is already active has its duration
/// reset instead of being added twice.
pub fn collect_power_up(active: &mut Vec<ActivePowerUp>, kind: PowerUpType) {
    if let Some(existing) = active.iter_mut().find(|p| p.kind == kind) {
        existing.remaining_frames = kind.duration();
        existing.active = true;
        return;
    }

    active.push(ActivePowerUp {
        kind,
        remaining_frames: kind.duration(),
        active: true,
    });
}

/// Tick every active power-up down one frame and drop expired entries.
pub fn update_active_power_ups(active: &mut Vec<ActivePowerUp>) {
    for power_up in active.iter_mut() {
        power_up.remaining_frames = power_up.remaining_frames.saturating_sub(1);
    }
    active.retain(|p| p.remaining_frames > 0);
}

pub fn has_power_up(active: &[ActivePowerUp], kind: PowerUpType) -> bool {
    active.iter().any(|p| p.kind == kind && p.active)
}

pub fn remaining_frames(active: &[ActivePowerUp], kind: PowerUpType) -> u32 {
    active
        .iter()
        .find(|p| p.kind == kind)
        .map(|p| p.remaining_frames)
        .unwrap_or(0)
}

/// Remaining duration as a percentage of the full duration, for HUD bars.
pub fn percent_remaining(power_up: &ActivePowerUp) -> f64 {
    power_up.remaining_frames as f64 / power_up.kind.duration() as f64 * 100.0
}

/// Slow-mo takes precedence over speed boost when both are active.
pub fn calculate_power_up_effects(active: &[ActivePowerUp]) -> PowerUpEffects {
    let mut effects = PowerUpEffects {
        has_shield: has_power_up(active, PowerUpType::Shield),
        has_magnet: has_power_up(active, PowerUpType::Magnet),
        has_speed_boost: has_power_up(active, PowerUpType::SpeedBoost),
        has_slow_mo: has_power_up(active, PowerUpType::SlowMo),
        has_ghost: has_power_up(active, PowerUpType::Ghost),
        ..PowerUpEffects::default()
    };

    if effects.has_slow_mo {
        effects.speed_multiplier = SLOW_MO_MULTIPLIER;
    } else if effects.has_speed_boost {
        effects.speed_multiplier = SPEED_BOOST_MULTIPLIER;
    }

    if effects.has_magnet {
        effects.magnet_range = MAGNET_RANGE;
        effects.magnet_strength = MAGNET_STRENGTH;
    }

    effects
}

/// One-hit shield: removed entirely on the first absorbed hit.
pub fn consume_shield(active: &mut Vec<ActivePowerUp>) {
    active.retain(|p| p.kind != PowerUpType::Shield);
}

/// Sprint-mode extra slow-mo pickup, rolled once per frame.
pub fn spawn_sprint_slow_mo<R: Rng>(
    state: &mut PowerUpState,
    canvas_width: f64,
    ground_y: f64,
    rng: &mut R,
) -> bool {
    if !rng.gen_bool(SPRINT_SLOW_MO_CHANCE) {
        return false;
    }
    state.spawned.push(PowerUp::new(
        canvas_width,
        ground_y,
        PowerUpType::SlowMo,
        rng,
    ));
    true
}

/// 3-5 random power-ups spaced 100px apart.
pub fn spawn_chaos_power_up_burst<R: Rng>(
    state: &mut PowerUpState,
    canvas_width: f64,
    ground_y: f64,
    rng: &mut R,
) -> usize {
    let count = rng.gen_range(3..=5);
    for i in 0..count {
        let kind = PowerUpType::random(rng);
        let x = canvas_width + i as f64 * 100.0;
        state.spawned.push(PowerUp::new(x, ground_y, kind, rng));
    }
    count
}
