//! Cross-platform aggregation: a pure function over the current set of
//! per-platform stats records. No history involved; the result replaces the
//! stored snapshot on every cycle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::store::operations::platform_stats::PlatformStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStats {
    pub total_problems_solved: u64,
    pub total_contests: u64,
    pub average_rating: f64,
    /// Platforms with any stats record, including error records. This is a
    /// different notion from "has solved at least one problem", which the
    /// achievement rules use.
    pub platforms_active: u64,
    pub category_mastery: BTreeMap<String, CategoryMastery>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMastery {
    pub solved: u64,
    pub platforms: Vec<Platform>,
}

pub fn compute_aggregates(
    all_stats: &BTreeMap<Platform, PlatformStats>,
    now: DateTime<Utc>,
) -> AggregatedStats {
    let mut total_solved = 0u64;
    let mut total_contests = 0u64;
    let mut rating_sum = 0i64;
    let mut rated_platforms = 0u64;
    let mut mastery: BTreeMap<String, CategoryMastery> = BTreeMap::new();

    for (platform, stats) in all_stats {
        total_solved += stats.problems_solved;
        total_contests += stats.contests_participated;

        // Platforms without a strictly positive rating are excluded from
        // both the numerator and the denominator; missing is not zero.
        if let Some(rating) = stats.rating.filter(|r| *r > 0) {
            rating_sum += rating;
            rated_platforms += 1;
        }

        for (tag, count) in &stats.tag_distribution {
            let entry = mastery.entry(tag.clone()).or_default();
            entry.solved += count;
            entry.platforms.push(*platform);
        }
    }

    let average_rating = if rated_platforms > 0 {
        rating_sum as f64 / rated_platforms as f64
    } else {
        0.0
    };

    AggregatedStats {
        total_problems_solved: total_solved,
        total_contests,
        average_rating,
        platforms_active: all_stats.len() as u64,
        category_mastery: mastery,
        last_updated: now,
    }
}
