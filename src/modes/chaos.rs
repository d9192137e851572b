//! Chaos mode: random time-boxed events on a random cadence.

use crate::core::constants::{
    CHAOS_DOUBLE_SPEED_MULTIPLIER, CHAOS_EVENT_INTERVAL_MAX, CHAOS_EVENT_INTERVAL_MIN,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChaosEventType {
    BugStorm,
    CoffeeRain,
    ReverseGravity,
    SpeedWarp,
    InvisibleObstacles,
    DoubleSpeed,
}

impl ChaosEventType {
    pub const ALL: [ChaosEventType; 6] = [
        ChaosEventType::BugStorm,
        ChaosEventType::CoffeeRain,
        ChaosEventType::ReverseGravity,
        ChaosEventType::SpeedWarp,
        ChaosEventType::InvisibleObstacles,
        ChaosEventType::DoubleSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BugStorm => "Bug Storm",
            Self::CoffeeRain => "Coffee Rain",
            Self::ReverseGravity => "Reverse Gravity",
            Self::SpeedWarp => "Speed Warp",
            Self::InvisibleObstacles => "Invisible Obstacles",
            Self::DoubleSpeed => "Double Speed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BugStorm => "Obstacles spawn rapidly",
            Self::CoffeeRain => "Collect falling coffees",
            Self::ReverseGravity => "Gravity is inverted",
            Self::SpeedWarp => "Speed randomly changes",
            Self::InvisibleObstacles => "Obstacles fade in and out",
            Self::DoubleSpeed => "Everything moves twice as fast",
        }
    }

    /// Event length in frames.
    pub fn duration(&self) -> u32 {
        match self {
            Self::BugStorm => 300,
            Self::CoffeeRain => 360,
            Self::ReverseGravity => 240,
            Self::SpeedWarp => 300,
            Self::InvisibleObstacles => 240,
            Self::DoubleSpeed => 180,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosEvent {
    pub kind: ChaosEventType,
    pub frames_remaining: u32,
    pub active: bool,
}

impl ChaosEvent {
    pub fn new(kind: ChaosEventType) -> Self {
        Self {
            kind,
            frames_remaining: kind.duration(),
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosState {
    pub current_event: Option<ChaosEvent>,
    /// Frames until the next event fires. Only counts down between events.
    pub event_timer: u32,
    pub events_triggered: u32,
}

impl ChaosState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            current_event: None,
            event_timer: random_interval(rng),
            events_triggered: 0,
        }
    }

    pub fn active_event(&self) -> Option<ChaosEventType> {
        self.current_event
            .as_ref()
            .filter(|e| e.active)
            .map(|e| e.kind)
    }
}

/// Snapshot of what the active event changes this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosEffects {
    pub bug_storm: bool,
    pub coffee_rain: bool,
    pub reverse_gravity: bool,
    pub speed_warp: bool,
    pub invisible_obstacles: bool,
    pub double_speed: bool,
    pub speed_multiplier: f64,
}

impl Default for ChaosEffects {
    fn default() -> Self {
        Self {
            bug_storm: false,
            coffee_rain: false,
            reverse_gravity: false,
            speed_warp: false,
            invisible_obstacles: false,
            double_speed: false,
            speed_multiplier: 1.0,
        }
    }
}

pub fn random_interval<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(CHAOS_EVENT_INTERVAL_MIN..CHAOS_EVENT_INTERVAL_MAX)
}

/// Advance the event clock. Returns the event type on the frame it fires.
///
/// An active event counts down and, on expiry, clears itself and schedules
/// the next interval. With no event active the interval counts down instead.
pub fn update_chaos<R: Rng>(state: &mut ChaosState, rng: &mut R) -> Option<ChaosEventType> {
    if let Some(event) = state.current_event.as_mut().filter(|e| e.active) {
        event.frames_remaining = event.frames_remaining.saturating_sub(1);
        if event.frames_remaining == 0 {
            state.current_event = None;
            state.event_timer = random_interval(rng);
        }
        return None;
    }

    state.event_timer = state.event_timer.saturating_sub(1);
    if state.event_timer > 0 {
        return None;
    }

    let kind = ChaosEventType::random(rng);
    state.current_event = Some(ChaosEvent::new(kind));
    state.events_triggered += 1;
    Some(kind)
}

pub fn chaos_effects(state: &ChaosState) -> ChaosEffects {
    let Some(kind) = state.active_event() else {
        return ChaosEffects::default();
    };

    ChaosEffects {
        bug_storm: kind == ChaosEventType::BugStorm,
        coffee_rain: kind == ChaosEventType::CoffeeRain,
        reverse_gravity: kind == ChaosEventType::ReverseGravity,
        speed_warp: kind == ChaosEventType::SpeedWarp,
        invisible_obstacles: kind == ChaosEventType::InvisibleObstacles,
        double_speed: kind == ChaosEventType::DoubleSpeed,
        speed_multiplier: if kind == ChaosEventType::DoubleSpeed {
            CHAOS_DOUBLE_SPEED_MULTIPLIER
        } else {
            1.0
        },
    }
}

/// Remaining share of the active event as 0-100.
pub fn chaos_event_progress(state: &ChaosState) -> f64 {
    match state.current_event.as_ref().filter(|e| e.active) {
        Some(event) => event.frames_remaining as f64 / event.kind.duration() as f64 * 100.0,
        None => 0.0,
    }
}
