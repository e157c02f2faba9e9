//! Timeframe comparison: split the trailing N-day window into two halves and
//! compare solved counts and active days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::operations::daily_logs::DailyLogEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeComparison {
    pub window_days: u32,
    pub first_half: HalfSummary,
    pub second_half: HalfSummary,
    pub delta: i64,
    /// One-decimal percent string, `"0"` when both halves are empty and
    /// `"N/A"` when the baseline half is zero but the recent half is not.
    pub percent_change: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfSummary {
    pub problems_solved: u64,
    pub active_days: u32,
}

pub fn compare_timeframe(
    logs: &[DailyLogEntry],
    window_days: u32,
    today: NaiveDate,
) -> TimeframeComparison {
    let window_start = today - chrono::Duration::days(window_days as i64);
    let midpoint = today - chrono::Duration::days((window_days / 2) as i64);

    let mut first = HalfSummary::default();
    let mut second = HalfSummary::default();

    for entry in logs {
        let Ok(date) = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") else {
            continue;
        };
        if date < window_start || date > today {
            continue;
        }
        let half = if date < midpoint { &mut first } else { &mut second };
        half.problems_solved += entry.problems_solved;
        if entry.problems_solved > 0 {
            half.active_days += 1;
        }
    }

    let delta = second.problems_solved as i64 - first.problems_solved as i64;
    let percent_change = percent_change(first.problems_solved, second.problems_solved);

    TimeframeComparison {
        window_days,
        first_half: first,
        second_half: second,
        delta,
        percent_change,
    }
}

fn percent_change(baseline: u64, recent: u64) -> String {
    match (baseline, recent) {
        (0, 0) => "0".to_string(),
        (0, _) => "N/A".to_string(),
        _ => {
            let pct = (recent as f64 - baseline as f64) / baseline as f64 * 100.0;
            format!("{pct:.1}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn log(date: NaiveDate, solved: u64) -> DailyLogEntry {
        DailyLogEntry {
            date: date.format("%Y-%m-%d").to_string(),
            problems_solved: solved,
            platforms_used: BTreeSet::new(),
            problems: Vec::new(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn percent_change_sentinels() {
        assert_eq!(percent_change(0, 0), "0");
        assert_eq!(percent_change(0, 5), "N/A");
        assert_eq!(percent_change(10, 15), "50.0");
        assert_eq!(percent_change(10, 5), "-50.0");
    }

    #[test]
    fn halves_split_at_midpoint() {
        let today = d("2024-05-30");
        let logs = vec![
            // first half: 30..15 days back
            log(d("2024-05-05"), 10),
            // second half: last 15 days
            log(d("2024-05-20"), 9),
            log(d("2024-05-29"), 6),
        ];

        let cmp = compare_timeframe(&logs, 30, today);
        assert_eq!(cmp.first_half.problems_solved, 10);
        assert_eq!(cmp.first_half.active_days, 1);
        assert_eq!(cmp.second_half.problems_solved, 15);
        assert_eq!(cmp.second_half.active_days, 2);
        assert_eq!(cmp.delta, 5);
        assert_eq!(cmp.percent_change, "50.0");
    }

    #[test]
    fn entries_outside_window_are_ignored() {
        let today = d("2024-05-30");
        let logs = vec![log(d("2023-01-01"), 100), log(d("2024-05-29"), 2)];

        let cmp = compare_timeframe(&logs, 7, today);
        assert_eq!(cmp.first_half.problems_solved, 0);
        assert_eq!(cmp.second_half.problems_solved, 2);
        assert_eq!(cmp.percent_change, "N/A");
    }

    #[test]
    fn empty_window_is_not_an_error() {
        let cmp = compare_timeframe(&[], 90, d("2024-05-30"));
        assert_eq!(cmp.delta, 0);
        assert_eq!(cmp.percent_change, "0");
    }
}
