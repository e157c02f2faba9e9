use std::collections::BTreeSet;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::constants::DAILY_LOG_CAP;
use crate::store::keys;
use crate::store::operations::platform_stats::PlatformStats;
use crate::store::{Store, StoreError};

/// One calendar date's activity across all platforms. `problems` is
/// deduplicated by name; `problems_solved` is always the distinct count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogEntry {
    pub date: String,
    pub problems_solved: u64,
    pub platforms_used: BTreeSet<Platform>,
    pub problems: Vec<LoggedProblem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedProblem {
    pub name: String,
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Local calendar date for an epoch-seconds submission timestamp.
pub fn local_date_of(epoch_secs: i64) -> Option<String> {
    Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d").to_string())
}

impl Store {
    /// Merge a platform's solved problems into the daily log.
    ///
    /// A batch where no entry carries `solved_at` is skipped entirely: a
    /// platform that never reports timestamps must not synthesize a "today"
    /// entry. For timestamped batches, problems are grouped by local date and
    /// appended only if the name is not already recorded for that date, which
    /// makes the merge idempotent per (date, problem name).
    ///
    /// Returns the number of dates touched.
    pub fn merge_daily_logs(&self, stats: &PlatformStats) -> Result<usize, StoreError> {
        let timestamped: Vec<_> = stats
            .solved_problems
            .iter()
            .filter(|p| p.solved_at.is_some())
            .collect();
        if timestamped.is_empty() {
            return Ok(0);
        }

        let mut by_date: std::collections::BTreeMap<String, Vec<&_>> = Default::default();
        for problem in timestamped {
            let ts = problem.solved_at.unwrap_or_default();
            if let Some(date) = local_date_of(ts) {
                by_date.entry(date).or_default().push(problem);
            }
        }

        let mut touched = 0usize;
        for (date, problems) in by_date {
            let key = keys::daily_log_key(&date);
            let mut entry = match self.daily_logs.get(key.as_bytes())? {
                Some(raw) => Self::deserialize::<DailyLogEntry>(&raw)?,
                None => DailyLogEntry {
                    date: date.clone(),
                    problems_solved: 0,
                    platforms_used: BTreeSet::new(),
                    problems: Vec::new(),
                },
            };

            let known: BTreeSet<String> =
                entry.problems.iter().map(|p| p.name.clone()).collect();
            let mut appended = false;
            for problem in problems {
                if known.contains(&problem.name) {
                    continue;
                }
                entry.problems.push(LoggedProblem {
                    name: problem.name.clone(),
                    rating: problem.rating,
                    tags: problem.tags.clone(),
                });
                appended = true;
            }

            entry.problems_solved = entry.problems.len() as u64;
            let platform_added = entry.platforms_used.insert(stats.platform);
            if appended || platform_added {
                self.daily_logs
                    .insert(key.as_bytes(), Self::serialize(&entry)?)?;
                touched += 1;
            }
        }

        self.evict_oldest_daily_logs()?;
        Ok(touched)
    }

    /// Keep only the most recent `DAILY_LOG_CAP` dates.
    fn evict_oldest_daily_logs(&self) -> Result<(), StoreError> {
        while self.daily_logs.len() > DAILY_LOG_CAP {
            match self.daily_logs.iter().next() {
                Some(item) => {
                    let (key, _) = item?;
                    self.daily_logs.remove(key)?;
                }
                None => break,
            }
        }
        Ok(())
    }

    pub fn get_daily_log(&self, date: &str) -> Result<Option<DailyLogEntry>, StoreError> {
        match self.daily_logs.get(keys::daily_log_key(date).as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Most recent entries first, at most `limit`.
    pub fn list_daily_logs(&self, limit: usize) -> Result<Vec<DailyLogEntry>, StoreError> {
        let mut logs = Vec::new();
        for item in self.daily_logs.iter().rev() {
            let (_, value) = item?;
            logs.push(Self::deserialize(&value)?);
            if logs.len() >= limit {
                break;
            }
        }
        Ok(logs)
    }

    /// Entries with date >= `since` ("YYYY-MM-DD"), ascending.
    pub fn daily_logs_since(&self, since: &str) -> Result<Vec<DailyLogEntry>, StoreError> {
        let mut logs = Vec::new();
        for item in self.daily_logs.range(since.as_bytes()..) {
            let (_, value) = item?;
            logs.push(Self::deserialize(&value)?);
        }
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    use crate::store::operations::platform_stats::SolvedProblem;

    use super::*;

    fn stats_with(platform: Platform, problems: Vec<SolvedProblem>) -> PlatformStats {
        PlatformStats {
            platform,
            problems_solved: problems.len() as u64,
            rating: None,
            max_rating: None,
            rank: None,
            contests_participated: 0,
            tag_distribution: BTreeMap::new(),
            solved_problems: problems,
            rating_history: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    fn problem(name: &str, solved_at: Option<i64>) -> SolvedProblem {
        SolvedProblem {
            name: name.to_string(),
            rating: Some(1200),
            tags: vec!["math".to_string()],
            solved_at,
        }
    }

    fn open_store(name: &str) -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join(name).to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn merge_twice_equals_merge_once() {
        let (_dir, store) = open_store("dl1.sled");
        let now = Utc::now().timestamp();
        let stats = stats_with(
            Platform::Codeforces,
            vec![problem("1A. Theatre Square", Some(now)), problem("4A. Watermelon", Some(now))],
        );

        store.merge_daily_logs(&stats).unwrap();
        store.merge_daily_logs(&stats).unwrap();

        let date = local_date_of(now).unwrap();
        let entry = store.get_daily_log(&date).unwrap().unwrap();
        assert_eq!(entry.problems_solved, 2);
        assert_eq!(entry.problems.len(), 2);
    }

    #[test]
    fn timestampless_batch_is_skipped() {
        let (_dir, store) = open_store("dl2.sled");
        let stats = stats_with(
            Platform::LeetCode,
            vec![problem("Two Sum", None), problem("Add Two Numbers", None)],
        );

        let touched = store.merge_daily_logs(&stats).unwrap();
        assert_eq!(touched, 0);
        assert_eq!(store.list_daily_logs(10).unwrap().len(), 0);
    }

    #[test]
    fn distinct_count_spans_platforms() {
        let (_dir, store) = open_store("dl3.sled");
        let now = Utc::now().timestamp();

        store
            .merge_daily_logs(&stats_with(
                Platform::Codeforces,
                vec![problem("Shared Problem", Some(now))],
            ))
            .unwrap();
        store
            .merge_daily_logs(&stats_with(
                Platform::AtCoder,
                vec![problem("Shared Problem", Some(now)), problem("abc300_a", Some(now))],
            ))
            .unwrap();

        let date = local_date_of(now).unwrap();
        let entry = store.get_daily_log(&date).unwrap().unwrap();
        assert_eq!(entry.problems_solved, 2);
        assert_eq!(entry.platforms_used.len(), 2);
    }

    #[test]
    fn cap_keeps_most_recent_dates() {
        let (_dir, store) = open_store("dl4.sled");
        let base = Utc::now() - Duration::days(400);

        for day in 0..400 {
            let ts = (base + Duration::days(day)).timestamp();
            let stats = stats_with(
                Platform::Codeforces,
                vec![problem(&format!("p-{day}"), Some(ts))],
            );
            store.merge_daily_logs(&stats).unwrap();
        }

        let logs = store.list_daily_logs(usize::MAX).unwrap();
        assert_eq!(logs.len(), DAILY_LOG_CAP);
        // list is descending; the newest date survived, the oldest 35 did not
        let newest = local_date_of((base + Duration::days(399)).timestamp()).unwrap();
        assert_eq!(logs[0].date, newest);
        let oldest_kept = &logs[logs.len() - 1].date;
        let first_inserted = local_date_of(base.timestamp()).unwrap();
        assert!(*oldest_kept > first_inserted);
    }

    #[test]
    fn listing_is_descending_by_date() {
        let (_dir, store) = open_store("dl5.sled");
        let now = Utc::now();

        for days_ago in [3_i64, 1, 2] {
            let ts = (now - Duration::days(days_ago)).timestamp();
            store
                .merge_daily_logs(&stats_with(
                    Platform::Codeforces,
                    vec![problem(&format!("p{days_ago}"), Some(ts))],
                ))
                .unwrap();
        }

        let logs = store.list_daily_logs(10).unwrap();
        assert_eq!(logs.len(), 3);
        assert!(logs[0].date > logs[1].date);
        assert!(logs[1].date > logs[2].date);
    }
}
