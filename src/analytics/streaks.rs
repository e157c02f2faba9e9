//! Consecutive-day streaks over the daily log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::TOP_STREAK_RUNS;
use crate::store::operations::daily_logs::DailyLogEntry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Length of the most recent run, but only when that run ends today or
    /// yesterday; an older run counts as broken.
    pub current: u32,
    pub longest: u32,
    pub top_runs: Vec<StreakRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRun {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub length: u32,
}

pub fn compute_streaks(logs: &[DailyLogEntry], today: NaiveDate) -> StreakSummary {
    let mut active: Vec<NaiveDate> = logs
        .iter()
        .filter(|e| e.problems_solved > 0)
        .filter_map(|e| NaiveDate::parse_from_str(&e.date, "%Y-%m-%d").ok())
        .collect();
    active.sort_unstable();
    active.dedup();

    if active.is_empty() {
        return StreakSummary::default();
    }

    let mut runs: Vec<StreakRun> = Vec::new();
    let mut start = active[0];
    let mut prev = active[0];
    for &date in &active[1..] {
        // A gap of exactly one day extends the run; anything else closes it.
        if (date - prev).num_days() == 1 {
            prev = date;
            continue;
        }
        runs.push(run(start, prev));
        start = date;
        prev = date;
    }
    runs.push(run(start, prev));

    let longest = runs.iter().map(|r| r.length).max().unwrap_or(0);

    let last = runs.last().cloned();
    let current = match last {
        Some(r) if (today - r.end).num_days() <= 1 => r.length,
        _ => 0,
    };

    let mut top_runs = runs;
    top_runs.sort_by(|a, b| b.length.cmp(&a.length).then(b.end.cmp(&a.end)));
    top_runs.truncate(TOP_STREAK_RUNS);

    StreakSummary {
        current,
        longest,
        top_runs,
    }
}

fn run(start: NaiveDate, end: NaiveDate) -> StreakRun {
    StreakRun {
        start,
        end,
        length: (end - start).num_days() as u32 + 1,
    }
}
