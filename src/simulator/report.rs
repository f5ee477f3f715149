//! Simulation report generation.

use super::runner::RunStats;
use super::SimError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregates for one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level_id: u32,
    pub runs: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub avg_score: f64,
    pub avg_moves_used: f64,
    pub avg_cascade_depth: f64,
    pub max_cascade_depth: u32,
    pub max_combo: u32,
    pub avg_infected_at_end: f64,
    pub avg_frozen_left: f64,
    pub stalled_runs: u32,
}

impl LevelSummary {
    pub fn from_runs(level_id: u32, runs: &[RunStats]) -> Self {
        let count = runs.len() as u32;
        let denom = count.max(1) as f64;
        let avg = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / denom;
        let wins = runs.iter().filter(|r| r.won).count() as u32;

        Self {
            level_id,
            runs: count,
            wins,
            win_rate: wins as f64 / denom,
            avg_score: avg(|r| r.final_score as f64),
            avg_moves_used: avg(|r| r.moves_used as f64),
            avg_cascade_depth: avg(|r| r.avg_cascade_depth()),
            max_cascade_depth: runs.iter().map(|r| r.max_cascade_depth).max().unwrap_or(0),
            max_combo: runs.iter().map(|r| r.max_combo).max().unwrap_or(0),
            avg_infected_at_end: avg(|r| r.infected_at_end as f64),
            avg_frozen_left: avg(|r| r.frozen_left as f64),
            stalled_runs: runs.iter().filter(|r| r.stalled).count() as u32,
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub generated_at: DateTime<Utc>,
    pub runs_per_level: u32,
    pub seed: Option<u64>,
    pub levels: Vec<LevelSummary>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_levels(
        per_level: Vec<(u32, Vec<RunStats>)>,
        runs_per_level: u32,
        seed: Option<u64>,
    ) -> Self {
        let levels = per_level
            .iter()
            .map(|(level_id, runs)| LevelSummary::from_runs(*level_id, runs))
            .collect();
        let run_stats = per_level.into_iter().flat_map(|(_, runs)| runs).collect();

        Self {
            generated_at: Utc::now(),
            runs_per_level,
            seed,
            levels,
            run_stats,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("                (Greedy player, real cascades)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs per level: {}\n", self.runs_per_level));
        match self.seed {
            Some(seed) => report.push_str(&format!("Seed:           {}\n\n", seed)),
            None => report.push_str("Seed:           random\n\n"),
        }

        for level in &self.levels {
            report.push_str(&format!(
                "── LEVEL {} ─────────────────────────────────────────────────────\n",
                level.level_id
            ));
            let bar: String = "█".repeat((level.win_rate * 20.0) as usize);
            report.push_str(&format!(
                "  Win Rate:            {:>5.1}% {}\n",
                level.win_rate * 100.0,
                bar
            ));
            report.push_str(&format!("  Avg Score:           {:.0}\n", level.avg_score));
            report.push_str(&format!(
                "  Avg Moves Used:      {:.1}\n",
                level.avg_moves_used
            ));
            report.push_str(&format!(
                "  Cascade Depth:       {:.2} avg, {} max\n",
                level.avg_cascade_depth, level.max_cascade_depth
            ));
            report.push_str(&format!("  Max Combo:           x{}\n", level.max_combo));
            report.push_str(&format!(
                "  Infected at End:     {:.1}\n",
                level.avg_infected_at_end
            ));
            report.push_str(&format!(
                "  Frozen Left:         {:.1}\n",
                level.avg_frozen_left
            ));
            if level.stalled_runs > 0 {
                report.push_str(&format!(
                    "  Stalled Runs:        {}\n",
                    level.stalled_runs
                ));
            }
            report.push('\n');
        }

        report
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default file name for a saved report.
    pub fn file_name(&self) -> String {
        format!(
            "sim_report_{}.json",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}
