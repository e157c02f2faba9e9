//! Maps the raw per-platform record into the stored common model. Pure
//! functions; every connector quirk has already been absorbed upstream.

use chrono::{DateTime, Utc};

use crate::connectors::{Platform, RawPlatformData};
use crate::store::operations::platform_stats::{PlatformStats, SolvedProblem};
use crate::store::operations::rating_history::RatingHistoryEntry;

pub fn normalize(platform: Platform, raw: RawPlatformData, now: DateTime<Utc>) -> PlatformStats {
    let solved_problems: Vec<SolvedProblem> = raw
        .solved_problems
        .iter()
        .map(|p| SolvedProblem {
            name: p.name.clone(),
            rating: p.rating,
            tags: p.tags.clone(),
            solved_at: p.solved_at,
        })
        .collect();

    let rating_history: Vec<RatingHistoryEntry> = raw
        .contest_results
        .iter()
        .map(|c| RatingHistoryEntry {
            date: utc_date_of(c.timestamp, now),
            contest_name: c.contest_name.clone(),
            old_rating: c.old_rating,
            new_rating: c.new_rating,
            rating_change: c.new_rating - c.old_rating,
            platform,
            timestamp: c.timestamp,
        })
        .collect();

    // Counts fall back to the detailed lists when the platform only
    // reports one of the two shapes.
    let problems_solved = raw
        .problems_solved
        .unwrap_or(solved_problems.len() as u64);
    let contests_participated = raw
        .contests_participated
        .unwrap_or(rating_history.len() as u64);

    PlatformStats {
        platform,
        problems_solved,
        rating: raw.rating,
        max_rating: raw.max_rating,
        rank: raw.rank,
        contests_participated,
        tag_distribution: raw.tag_distribution,
        solved_problems,
        rating_history,
        last_updated: now,
        error: None,
    }
}

fn utc_date_of(epoch_secs: i64, fallback: DateTime<Utc>) -> String {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .unwrap_or(fallback)
        .format("%Y-%m-%d")
        .to_string()
}
