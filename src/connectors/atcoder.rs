//! AtCoder connector, built on the official user history endpoint plus the
//! kenkoooo AtCoder Problems results API for per-submission data.

use axum::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;

use super::{
    Connector, ConnectorError, Platform, RawContestResult, RawPlatformData, RawSolvedProblem,
};

const HISTORY_URL: &str = "https://atcoder.jp/users";
const RESULTS_URL: &str = "https://kenkoooo.com/atcoder/atcoder-api/results";

pub struct AtCoderConnector {
    client: reqwest::Client,
}

impl AtCoderConnector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Connector for AtCoderConnector {
    fn platform(&self) -> Platform {
        Platform::AtCoder
    }

    async fn fetch(&self, username: &str) -> Result<RawPlatformData, ConnectorError> {
        let history_resp = self
            .client
            .get(format!("{HISTORY_URL}/{username}/history/json"))
            .send()
            .await?;
        if history_resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ConnectorError::UserNotFound {
                platform: Platform::AtCoder,
                username: username.to_string(),
            });
        }
        if !history_resp.status().is_success() {
            return Err(ConnectorError::Status {
                platform: Platform::AtCoder,
                status: history_resp.status().as_u16(),
            });
        }
        let history: Vec<AcContest> = history_resp.json().await?;

        let results_resp = self
            .client
            .get(format!("{RESULTS_URL}?user={username}"))
            .send()
            .await?;
        if !results_resp.status().is_success() {
            return Err(ConnectorError::Status {
                platform: Platform::AtCoder,
                status: results_resp.status().as_u16(),
            });
        }
        let submissions: Vec<AcSubmission> = results_resp.json().await?;

        let mut seen = BTreeSet::new();
        let mut solved = Vec::new();
        for sub in &submissions {
            if sub.result != "AC" || !seen.insert(sub.problem_id.clone()) {
                continue;
            }
            solved.push(RawSolvedProblem {
                name: sub.problem_id.clone(),
                rating: sub.point.map(|p| p as i64),
                tags: Vec::new(),
                solved_at: Some(sub.epoch_second),
            });
        }

        let rated: Vec<&AcContest> = history.iter().filter(|c| c.is_rated).collect();
        let contest_results = rated
            .iter()
            .map(|c| RawContestResult {
                contest_name: c.contest_name.clone(),
                old_rating: c.old_rating,
                new_rating: c.new_rating,
                timestamp: c
                    .end_time
                    .as_deref()
                    .and_then(parse_end_time)
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        let rating = rated.last().map(|c| c.new_rating);
        let max_rating = rated.iter().map(|c| c.new_rating).max();

        Ok(RawPlatformData {
            problems_solved: Some(solved.len() as u64),
            rating,
            max_rating,
            rank: None,
            contests_participated: Some(contest_results.len() as u64),
            tag_distribution: Default::default(),
            solved_problems: solved,
            contest_results,
        })
    }
}

/// AtCoder reports contest end times as RFC3339 with offset.
fn parse_end_time(raw: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.timestamp())
}

#[derive(Debug, Deserialize)]
struct AcContest {
    #[serde(rename = "IsRated")]
    is_rated: bool,
    #[serde(rename = "ContestName")]
    contest_name: String,
    #[serde(rename = "OldRating")]
    old_rating: i64,
    #[serde(rename = "NewRating")]
    new_rating: i64,
    #[serde(rename = "EndTime")]
    end_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AcSubmission {
    problem_id: String,
    result: String,
    point: Option<f64>,
    epoch_second: i64,
}
