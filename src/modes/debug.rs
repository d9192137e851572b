//! Debug Challenge mode: a fixed sequence of missions, one active at a time.

use serde::{Deserialize, Serialize};

/// Metric a mission listens to. Progress only moves when the reported
/// metric matches the active mission's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissionMetric {
    Coffee,
    Time,
    Speed,
    Combo,
    NearMiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionId {
    CoffeeCollector,
    Survivor,
    Speedster,
    ComboMaster,
    NearMissExpert,
}

impl MissionId {
    /// Missions in play order.
    pub const ALL: [MissionId; 5] = [
        MissionId::CoffeeCollector,
        MissionId::Survivor,
        MissionId::Speedster,
        MissionId::ComboMaster,
        MissionId::NearMissExpert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoffeeCollector => "coffee-collector",
            Self::Survivor => "survivor",
            Self::Speedster => "speedster",
            Self::ComboMaster => "combo-master",
            Self::NearMissExpert => "near-miss-expert",
        }
    }

    pub fn goal(&self) -> &'static str {
        match self {
            Self::CoffeeCollector => "Collect 15 coffees",
            Self::Survivor => "Survive 60 seconds",
            Self::Speedster => "Reach speed level 10",
            Self::ComboMaster => "Achieve 3x combo",
            Self::NearMissExpert => "Get 10 near-misses",
        }
    }

    pub fn target(&self) -> u32 {
        match self {
            Self::CoffeeCollector => 15,
            Self::Survivor => 60,
            Self::Speedster => 10,
            Self::ComboMaster => 3,
            Self::NearMissExpert => 10,
        }
    }

    pub fn metric(&self) -> MissionMetric {
        match self {
            Self::CoffeeCollector => MissionMetric::Coffee,
            Self::Survivor => MissionMetric::Time,
            Self::Speedster => MissionMetric::Speed,
            Self::ComboMaster => MissionMetric::Combo,
            Self::NearMissExpert => MissionMetric::NearMiss,
        }
    }

    pub fn next(&self) -> Option<MissionId> {
        let index = Self::ALL.iter().position(|m| m == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugMission {
    pub id: MissionId,
    pub progress: u32,
    pub completed: bool,
}

impl DebugMission {
    pub fn new(id: MissionId) -> Self {
        Self {
            id,
            progress: 0,
            completed: false,
        }
    }

    pub fn target(&self) -> u32 {
        self.id.target()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugState {
    pub current_mission: DebugMission,
    pub missions_completed: u32,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            current_mission: DebugMission::new(MissionId::ALL[0]),
            missions_completed: 0,
        }
    }
}

/// Record the latest metric value. Returns true on the update that completes
/// the active mission. Completion does not advance; see
/// [`advance_to_next_mission`].
pub fn update_mission(state: &mut DebugState, metric: MissionMetric, value: u32) -> bool {
    let mission = &mut state.current_mission;
    if mission.id.metric() != metric {
        return false;
    }

    mission.progress = value;
    if !mission.completed && mission.progress >= mission.target() {
        mission.completed = true;
        state.missions_completed += 1;
        return true;
    }
    false
}

/// Move to the next mission in order. No-op on the last mission.
pub fn advance_to_next_mission(state: &mut DebugState) -> bool {
    match state.current_mission.id.next() {
        Some(next) => {
            state.current_mission = DebugMission::new(next);
            true
        }
        None => false,
    }
}

pub fn all_missions_completed(state: &DebugState) -> bool {
    state.missions_completed as usize >= MissionId::ALL.len()
}

/// Active mission progress as 0-100.
pub fn mission_progress(state: &DebugState) -> f64 {
    let mission = &state.current_mission;
    (mission.progress as f64 / mission.target() as f64 * 100.0).min(100.0)
}
