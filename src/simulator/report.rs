//! Simulation report generation.

use crate::scoring::{format_score, score_grade, GameStatistics};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Crashed,
    Completed,
    TimedOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub statistics: GameStatistics,
    pub power_ups_collected: u32,
    pub chaos_events: u32,
    pub missions_completed: u32,
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_crashed: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub best_score: u64,
    pub avg_survival_seconds: f64,
    pub avg_coffees: f64,
    pub avg_near_misses: f64,
    pub avg_power_ups: f64,

    /// Runs per score grade, keyed by grade letter.
    pub grade_distribution: BTreeMap<&'static str, u32>,

    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let average = |f: &dyn Fn(&RunStats) -> f64| {
            runs.iter().map(f).sum::<f64>() / num_runs.max(1) as f64
        };

        let mut grade_distribution = BTreeMap::new();
        for run in &runs {
            *grade_distribution
                .entry(score_grade(run.statistics.final_score).as_str())
                .or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_crashed: count(RunOutcome::Crashed),
            runs_completed: count(RunOutcome::Completed),
            runs_timed_out: count(RunOutcome::TimedOut),
            avg_score: average(&|r| r.statistics.final_score as f64),
            best_score: runs.iter().map(|r| r.statistics.final_score).max().unwrap_or(0),
            avg_survival_seconds: average(&|r| r.statistics.survival_seconds as f64),
            avg_coffees: average(&|r| f64::from(r.statistics.coffees_collected)),
            avg_near_misses: average(&|r| f64::from(r.statistics.near_misses)),
            avg_power_ups: average(&|r| f64::from(r.power_ups_collected)),
            grade_distribution,
            runs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══ Results ═══\n");
        out.push_str(&format!(
            "Runs: {}  (crashed {}, completed {}, timed out {})\n",
            self.num_runs, self.runs_crashed, self.runs_completed, self.runs_timed_out
        ));
        out.push_str(&format!(
            "Score: avg {:.0}, best {}\n",
            self.avg_score,
            format_score(self.best_score)
        ));
        out.push_str(&format!("Survival: avg {:.1}s\n", self.avg_survival_seconds));
        out.push_str(&format!(
            "Per run: {:.1} coffees, {:.1} near misses, {:.1} power-ups\n",
            self.avg_coffees, self.avg_near_misses, self.avg_power_ups
        ));
        out.push_str("Grades:");
        for (grade, count) in &self.grade_distribution {
            out.push_str(&format!(" {}={}", grade, count));
        }
        out.push('\n');
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
