//! Derived insights and recommendations over history and aggregates.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::constants::{
    RATING_TREND_DOWN, RATING_TREND_POINTS, RATING_TREND_UP, WEEKDAY_INSIGHT_WINDOW,
};
use crate::store::operations::daily_logs::DailyLogEntry;
use crate::store::operations::platform_stats::PlatformStats;
use crate::store::operations::rating_history::CombinedRatingEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightBundle {
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ProductiveWeekday,
    RatingTrend,
    WeakCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

pub fn build_insights(
    daily_logs: &[DailyLogEntry],
    combined_ratings: &[CombinedRatingEntry],
    category_mastery: &BTreeMap<String, crate::analytics::aggregate::CategoryMastery>,
    all_stats: &BTreeMap<Platform, PlatformStats>,
) -> InsightBundle {
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();

    if let Some((weekday, solved)) = most_productive_weekday(daily_logs) {
        insights.push(Insight {
            kind: InsightKind::ProductiveWeekday,
            message: format!("{weekday} is your most productive day ({solved} problems solved)"),
        });
    }

    if let Some(avg_delta) = rating_trend(combined_ratings) {
        if avg_delta > RATING_TREND_UP {
            insights.push(Insight {
                kind: InsightKind::RatingTrend,
                message: format!(
                    "Your ratings are trending upward (+{avg_delta:.0} per contest on average)"
                ),
            });
        } else if avg_delta < RATING_TREND_DOWN {
            insights.push(Insight {
                kind: InsightKind::RatingTrend,
                message: format!(
                    "Your ratings need attention ({avg_delta:.0} per contest on average)"
                ),
            });
        }
    }

    if let Some((tag, solved)) = weakest_category(category_mastery) {
        insights.push(Insight {
            kind: InsightKind::WeakCategory,
            message: format!("'{tag}' is your least practiced category ({solved} solved)"),
        });
        recommendations.push(Recommendation {
            message: format!("Practice more '{tag}' problems to round out your skills"),
            platform: None,
            category: Some(tag),
        });
    }

    recommendations.extend(unexplored_platforms(all_stats));

    InsightBundle {
        insights,
        recommendations,
    }
}

/// Weekday with the highest solved total over the most recent log entries.
fn most_productive_weekday(daily_logs: &[DailyLogEntry]) -> Option<(Weekday, u64)> {
    let mut per_weekday: BTreeMap<u32, u64> = BTreeMap::new();
    for entry in daily_logs.iter().take(WEEKDAY_INSIGHT_WINDOW) {
        let Ok(date) = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") else {
            continue;
        };
        *per_weekday
            .entry(date.weekday().num_days_from_monday())
            .or_insert(0) += entry.problems_solved;
    }

    per_weekday
        .into_iter()
        .filter(|(_, solved)| *solved > 0)
        .max_by_key(|(_, solved)| *solved)
        .and_then(|(day, solved)| weekday_from_index(day).map(|w| (w, solved)))
}

fn weekday_from_index(index: u32) -> Option<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .get(index as usize)
    .copied()
}

/// Average per-step rating delta, summed across platforms, over the last
/// few combined history points. `None` when fewer than two points exist.
fn rating_trend(combined: &[CombinedRatingEntry]) -> Option<f64> {
    let tail: Vec<&CombinedRatingEntry> = combined
        .iter()
        .rev()
        .take(RATING_TREND_POINTS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if tail.len() < 2 {
        return None;
    }

    let mut deltas = Vec::new();
    for pair in tail.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let step: i64 = next
            .ratings
            .iter()
            .filter_map(|(platform, rating)| {
                prev.ratings.get(platform).map(|old| rating - old)
            })
            .sum();
        deltas.push(step as f64);
    }

    if deltas.is_empty() {
        None
    } else {
        Some(deltas.iter().sum::<f64>() / deltas.len() as f64)
    }
}

fn weakest_category(
    mastery: &BTreeMap<String, crate::analytics::aggregate::CategoryMastery>,
) -> Option<(String, u64)> {
    mastery
        .iter()
        .min_by_key(|(_, m)| m.solved)
        .map(|(tag, m)| (tag.clone(), m.solved))
}

/// "Explore this platform" recommendations for platforms with zero or
/// missing stats, but only when at least one platform is actually in use.
fn unexplored_platforms(all_stats: &BTreeMap<Platform, PlatformStats>) -> Vec<Recommendation> {
    let inactive: Vec<Platform> = Platform::ALL
        .into_iter()
        .filter(|p| all_stats.get(p).map_or(true, |s| s.problems_solved == 0))
        .collect();

    if inactive.len() == Platform::ALL.len() {
        return Vec::new();
    }

    inactive
        .into_iter()
        .map(|platform| Recommendation {
            message: format!("You haven't been active on {platform}, try a problem there"),
            platform: Some(platform),
            category: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use crate::analytics::aggregate::CategoryMastery;

    use super::*;

    fn log(date: &str, solved: u64) -> DailyLogEntry {
        DailyLogEntry {
            date: date.to_string(),
            problems_solved: solved,
            platforms_used: BTreeSet::new(),
            problems: Vec::new(),
        }
    }

    fn combined(date: &str, rating: i64) -> CombinedRatingEntry {
        let mut ratings = BTreeMap::new();
        ratings.insert(Platform::Codeforces, rating);
        CombinedRatingEntry {
            date: date.to_string(),
            ratings,
        }
    }

    fn stats(platform: Platform, solved: u64) -> PlatformStats {
        PlatformStats {
            platform,
            problems_solved: solved,
            rating: None,
            max_rating: None,
            rank: None,
            contests_participated: 0,
            tag_distribution: BTreeMap::new(),
            solved_problems: Vec::new(),
            rating_history: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn productive_weekday_picks_the_max() {
        // 2024-05-06 is a Monday
        let logs = vec![log("2024-05-06", 5), log("2024-05-07", 2), log("2024-05-13", 4)];
        let (weekday, solved) = most_productive_weekday(&logs).unwrap();
        assert_eq!(weekday, Weekday::Mon);
        assert_eq!(solved, 9);
    }

    #[test]
    fn upward_trend_flagged_above_threshold() {
        let points = vec![
            combined("2024-05-01", 1500),
            combined("2024-05-08", 1530),
            combined("2024-05-15", 1560),
        ];
        let avg = rating_trend(&points).unwrap();
        assert!(avg > RATING_TREND_UP);
    }

    #[test]
    fn trend_needs_two_points() {
        assert!(rating_trend(&[combined("2024-05-01", 1500)]).is_none());
        assert!(rating_trend(&[]).is_none());
    }

    #[test]
    fn weakest_category_surfaces_insight_and_recommendation() {
        let mut mastery = BTreeMap::new();
        mastery.insert(
            "dp".to_string(),
            CategoryMastery {
                solved: 12,
                platforms: vec![Platform::Codeforces],
            },
        );
        mastery.insert(
            "geometry".to_string(),
            CategoryMastery {
                solved: 1,
                platforms: vec![Platform::Codeforces],
            },
        );

        let mut all = BTreeMap::new();
        all.insert(Platform::Codeforces, stats(Platform::Codeforces, 13));

        let bundle = build_insights(&[], &[], &mastery, &all);
        assert!(bundle
            .insights
            .iter()
            .any(|i| i.kind == InsightKind::WeakCategory && i.message.contains("geometry")));
        assert!(bundle
            .recommendations
            .iter()
            .any(|r| r.category.as_deref() == Some("geometry")));
    }

    #[test]
    fn unexplored_platforms_skipped_when_all_inactive() {
        let bundle = build_insights(&[], &[], &BTreeMap::new(), &BTreeMap::new());
        assert!(bundle.recommendations.is_empty());
    }

    #[test]
    fn inactive_platform_gets_recommendation() {
        let mut all = BTreeMap::new();
        all.insert(Platform::Codeforces, stats(Platform::Codeforces, 10));
        all.insert(Platform::LeetCode, stats(Platform::LeetCode, 0));

        let bundle = build_insights(&[], &[], &BTreeMap::new(), &all);
        let platforms: Vec<Platform> = bundle
            .recommendations
            .iter()
            .filter_map(|r| r.platform)
            .collect();
        assert!(platforms.contains(&Platform::LeetCode));
        assert!(platforms.contains(&Platform::AtCoder));
        assert!(!platforms.contains(&Platform::Codeforces));
    }
}
