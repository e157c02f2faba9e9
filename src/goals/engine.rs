//! Goal progress recomputation and achievement evaluation. Both run at the
//! end of every sync pass over whatever state the store holds.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::info;

use crate::analytics::streaks::compute_streaks;
use crate::connectors::Platform;
use crate::constants::DAILY_LOG_CAP;
use crate::goals::catalog::{AchievementRule, CATALOG};
use crate::store::operations::achievements::EarnedAchievement;
use crate::store::operations::daily_logs::DailyLogEntry;
use crate::store::operations::goals::{Goal, GoalType};
use crate::store::operations::platform_stats::PlatformStats;
use crate::store::operations::rating_history::contests_in_month;
use crate::store::{Store, StoreError};

/// Recompute progress for every stored goal and persist the updates.
///
/// Completion is one-way: a completed goal is skipped outright, so neither
/// its progress nor its `completed_at` stamp ever changes again. Progress on
/// open goals reflects the latest measurement and may regress, including
/// below zero for rating goals.
pub fn recompute_goals(
    store: &Store,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Vec<Goal>, StoreError> {
    let goals = store.list_goals()?;
    if goals.is_empty() {
        return Ok(goals);
    }

    let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let month_start = today.with_day(1).unwrap_or(today);
    let horizon = week_start.min(month_start);
    let logs = store.daily_logs_since(&horizon.format("%Y-%m-%d").to_string())?;

    let all_stats = store.list_platform_stats()?;
    // streaks can run back past the weekly/monthly horizon
    let all_logs = store.list_daily_logs(DAILY_LOG_CAP)?;
    let current_streak = compute_streaks(&all_logs, today).current as i64;
    let month_prefix = today.format("%Y-%m").to_string();
    let mut month_contests = 0i64;
    for platform in Platform::ALL {
        let history = store.get_rating_history(platform)?;
        month_contests += contests_in_month(&history, &month_prefix) as i64;
    }

    let mut updated = Vec::with_capacity(goals.len());
    for mut goal in goals {
        if goal.completed {
            updated.push(goal);
            continue;
        }

        goal.progress = match goal.goal_type {
            GoalType::Weekly => solved_since(&logs, week_start),
            GoalType::Monthly => solved_since(&logs, month_start),
            GoalType::Streak => current_streak,
            GoalType::Rating => rating_progress(&goal, &all_stats),
            GoalType::Contest => month_contests,
        };

        if !goal.completed && goal.progress >= goal.target {
            goal.completed = true;
            goal.completed_at = Some(now);
            info!(goal_id = %goal.id, target = goal.target, "goal completed");
        }

        store.put_goal(&goal)?;
        updated.push(goal);
    }
    Ok(updated)
}

fn solved_since(logs: &[DailyLogEntry], since: NaiveDate) -> i64 {
    let since = since.format("%Y-%m-%d").to_string();
    logs.iter()
        .filter(|e| e.date.as_str() >= since.as_str())
        .map(|e| e.problems_solved as i64)
        .sum()
}

fn rating_progress(goal: &Goal, all_stats: &BTreeMap<Platform, PlatformStats>) -> i64 {
    let current = goal
        .platform
        .and_then(|p| all_stats.get(&p))
        .and_then(|s| s.rating)
        .unwrap_or(0);
    current - goal.initial_rating.unwrap_or(0)
}

/// Check the catalog against current state and append newly crossed
/// thresholds. Every discriminator reads the present value, not a historical
/// maximum; already-earned ids are skipped outright, so an unlocked
/// achievement still survives any later drop in the underlying metric.
pub fn evaluate_achievements(
    store: &Store,
    now: DateTime<Utc>,
) -> Result<Vec<EarnedAchievement>, StoreError> {
    let all_stats = store.list_platform_stats()?;
    let logs = store.list_daily_logs(DAILY_LOG_CAP)?;
    let earned_ids = store.earned_achievement_ids()?;

    let total_solved: i64 = all_stats.values().map(|s| s.problems_solved as i64).sum();
    let platforms_used = all_stats.values().filter(|s| s.problems_solved > 0).count() as i64;
    let current_streak = compute_streaks(&logs, now.date_naive()).current as i64;
    let today = now.date_naive().format("%Y-%m-%d").to_string();
    let today_solved = logs
        .iter()
        .find(|e| e.date == today)
        .map(|e| e.problems_solved as i64)
        .unwrap_or(0);

    let mut unlocked = Vec::new();
    for def in CATALOG.iter() {
        if earned_ids.contains(def.id) {
            continue;
        }

        let value = match def.rule {
            AchievementRule::TotalSolved => total_solved,
            AchievementRule::Streak => current_streak,
            AchievementRule::PlatformsUsed => platforms_used,
            AchievementRule::DailySolved => today_solved,
            AchievementRule::PlatformRating(platform) => all_stats
                .get(&platform)
                .and_then(|s| s.rating)
                .unwrap_or(0),
        };
        if value < def.threshold {
            continue;
        }

        let earned = EarnedAchievement {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            threshold: def.threshold,
            earned_at: now,
        };
        if store.append_achievement(&earned)? {
            info!(achievement = def.id, "achievement unlocked");
            unlocked.push(earned);
        }
    }
    Ok(unlocked)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    use crate::store::operations::platform_stats::SolvedProblem;
    use crate::store::operations::rating_history::RatingHistoryEntry;

    use super::*;

    fn open_store(name: &str) -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join(name).to_str().unwrap()).unwrap();
        (dir, store)
    }

    fn stats(platform: Platform, solved: u64, rating: Option<i64>) -> PlatformStats {
        PlatformStats {
            platform,
            problems_solved: solved,
            rating,
            max_rating: rating,
            rank: None,
            contests_participated: 0,
            tag_distribution: BTreeMap::new(),
            solved_problems: Vec::new(),
            rating_history: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    fn seed_daily_logs(store: &Store, days_back: &[i64], per_day: usize) {
        let now = Local::now();
        for &back in days_back {
            let ts = (now - Duration::days(back)).timestamp();
            let problems = (0..per_day)
                .map(|i| SolvedProblem {
                    name: format!("p-{back}-{i}"),
                    rating: None,
                    tags: Vec::new(),
                    solved_at: Some(ts),
                })
                .collect();
            let mut s = stats(Platform::Codeforces, per_day as u64, None);
            s.solved_problems = problems;
            store.merge_daily_logs(&s).unwrap();
        }
    }

    #[test]
    fn weekly_goal_counts_since_sunday() {
        let (_dir, store) = open_store("g1.sled");
        let today = Local::now().date_naive();
        // only today's activity, always inside the current week
        seed_daily_logs(&store, &[0], 3);

        let goal = Goal::new(GoalType::Weekly, 10, "weekly".into(), None, None, Utc::now());
        store.put_goal(&goal).unwrap();

        let updated = recompute_goals(&store, today, Utc::now()).unwrap();
        assert_eq!(updated[0].progress, 3);
        assert!(!updated[0].completed);
    }

    #[test]
    fn completion_is_one_way() {
        let (_dir, store) = open_store("g2.sled");
        let today = Local::now().date_naive();
        seed_daily_logs(&store, &[0], 5);

        let goal = Goal::new(GoalType::Weekly, 5, "weekly".into(), None, None, Utc::now());
        store.put_goal(&goal).unwrap();

        let first = recompute_goals(&store, today, Utc::now()).unwrap();
        assert!(first[0].completed);
        let completed_at = first[0].completed_at;

        // a week later the weekly window is empty, but the goal is frozen
        let later = today + Duration::days(7);
        let second = recompute_goals(&store, later, Utc::now()).unwrap();
        assert_eq!(second[0].progress, 5);
        assert!(second[0].completed);
        assert_eq!(second[0].completed_at, completed_at);
    }

    #[test]
    fn rating_goal_progress_can_go_negative() {
        let (_dir, store) = open_store("g3.sled");
        store
            .put_platform_stats(&stats(Platform::Codeforces, 10, Some(1450)))
            .unwrap();

        let goal = Goal::new(
            GoalType::Rating,
            100,
            "gain 100".into(),
            Some(Platform::Codeforces),
            Some(1500),
            Utc::now(),
        );
        store.put_goal(&goal).unwrap();

        let updated = recompute_goals(&store, Local::now().date_naive(), Utc::now()).unwrap();
        assert_eq!(updated[0].progress, -50);
        assert!(!updated[0].completed);
    }

    #[test]
    fn contest_goal_sums_platforms_for_current_month() {
        let (_dir, store) = open_store("g4.sled");
        let today = Local::now().date_naive();
        let month = today.format("%Y-%m").to_string();
        let ts = Local
            .from_local_datetime(&today.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap()
            .timestamp();

        let entry = |platform, date: String| RatingHistoryEntry {
            date,
            contest_name: "Round".into(),
            old_rating: 1500,
            new_rating: 1520,
            rating_change: 20,
            platform,
            timestamp: ts,
        };
        store
            .merge_rating_history(
                Platform::Codeforces,
                &[entry(Platform::Codeforces, format!("{month}-02"))],
            )
            .unwrap();
        store
            .merge_rating_history(
                Platform::AtCoder,
                &[
                    entry(Platform::AtCoder, format!("{month}-03")),
                    entry(Platform::AtCoder, "2001-01-01".into()),
                ],
            )
            .unwrap();

        let goal = Goal::new(GoalType::Contest, 2, "contests".into(), None, None, Utc::now());
        store.put_goal(&goal).unwrap();

        let updated = recompute_goals(&store, today, Utc::now()).unwrap();
        assert_eq!(updated[0].progress, 2);
        assert!(updated[0].completed);
    }

    #[test]
    fn achievements_unlock_once() {
        let (_dir, store) = open_store("a1.sled");
        store
            .put_platform_stats(&stats(Platform::Codeforces, 120, Some(1500)))
            .unwrap();
        store
            .put_platform_stats(&stats(Platform::LeetCode, 30, None))
            .unwrap();

        let first = evaluate_achievements(&store, Utc::now()).unwrap();
        let ids: Vec<&str> = first.iter().map(|a| a.id.as_str()).collect();
        assert!(ids.contains(&"first-solve"));
        assert!(ids.contains(&"solved-100"));
        assert!(ids.contains(&"platforms-2"));
        assert!(ids.contains(&"cf-specialist"));
        assert!(!ids.contains(&"solved-500"));

        let second = evaluate_achievements(&store, Utc::now()).unwrap();
        assert!(second.is_empty());
        assert_eq!(store.list_achievements().unwrap().len(), first.len());
    }

    #[test]
    fn earned_achievement_survives_metric_regression() {
        let (_dir, store) = open_store("a2.sled");
        store
            .put_platform_stats(&stats(Platform::Codeforces, 60, None))
            .unwrap();
        evaluate_achievements(&store, Utc::now()).unwrap();

        // platform later reports fewer solves; the unlock stays
        store
            .put_platform_stats(&stats(Platform::Codeforces, 10, None))
            .unwrap();
        evaluate_achievements(&store, Utc::now()).unwrap();

        let ids = store.earned_achievement_ids().unwrap();
        assert!(ids.contains("solved-50"));
    }

    // Local dates key the logs, so pin the evaluation clock to local-today.
    fn eval_now() -> DateTime<Utc> {
        let noon = Local::now().date_naive().and_hms_opt(12, 0, 0).unwrap();
        Utc.from_utc_datetime(&noon)
    }

    #[test]
    fn streak_goal_sees_runs_older_than_this_month() {
        let (_dir, store) = open_store("g5.sled");
        let today = Local::now().date_naive();
        let days: Vec<i64> = (0..40).collect();
        seed_daily_logs(&store, &days, 1);

        let goal = Goal::new(GoalType::Streak, 40, "forty days".into(), None, None, Utc::now());
        store.put_goal(&goal).unwrap();

        let updated = recompute_goals(&store, today, Utc::now()).unwrap();
        assert_eq!(updated[0].progress, 40);
        assert!(updated[0].completed);
    }

    #[test]
    fn streak_achievement_requires_a_live_run() {
        let (_dir, store) = open_store("a3.sled");
        // a 7-day run that went cold three days ago, plus a lone solve today
        seed_daily_logs(&store, &[0, 3, 4, 5, 6, 7, 8, 9], 1);

        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(!store.earned_achievement_ids().unwrap().contains("streak-7"));

        // filling the gap revives the run
        seed_daily_logs(&store, &[1, 2], 1);
        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(store.earned_achievement_ids().unwrap().contains("streak-7"));
    }

    #[test]
    fn daily_achievement_counts_only_today() {
        let (_dir, store) = open_store("a4.sled");
        seed_daily_logs(&store, &[5], 10);
        seed_daily_logs(&store, &[0], 2);

        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(!store.earned_achievement_ids().unwrap().contains("daily-10"));

        seed_daily_logs(&store, &[0], 10);
        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(store.earned_achievement_ids().unwrap().contains("daily-10"));
    }

    #[test]
    fn platform_rating_achievement_reads_current_rating() {
        let (_dir, store) = open_store("a5.sled");
        let mut s = stats(Platform::Codeforces, 1, Some(1350));
        s.max_rating = Some(1600);
        store.put_platform_stats(&s).unwrap();

        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(!store.earned_achievement_ids().unwrap().contains("cf-specialist"));

        s.rating = Some(1400);
        store.put_platform_stats(&s).unwrap();
        evaluate_achievements(&store, eval_now()).unwrap();
        assert!(store.earned_achievement_ids().unwrap().contains("cf-specialist"));
    }
}
