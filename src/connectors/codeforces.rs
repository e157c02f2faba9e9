//! Codeforces REST connector (`user.info`, `user.status`, `user.rating`).

use std::collections::{BTreeMap, BTreeSet};

use axum::async_trait;
use serde::Deserialize;

use super::{
    Connector, ConnectorError, Platform, RawContestResult, RawPlatformData, RawSolvedProblem,
};

const API_BASE: &str = "https://codeforces.com/api";

/// Submissions fetched per sync; CF returns newest first.
const SUBMISSION_PAGE: u32 = 2000;

pub struct CodeforcesConnector {
    client: reqwest::Client,
}

impl CodeforcesConnector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        username: &str,
    ) -> Result<T, ConnectorError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            // CF answers 400 with comment "handles: User ... not found"
            return Err(ConnectorError::UserNotFound {
                platform: Platform::Codeforces,
                username: username.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ConnectorError::Status {
                platform: Platform::Codeforces,
                status: status.as_u16(),
            });
        }
        let envelope: CfEnvelope<T> = resp.json().await?;
        if envelope.status != "OK" {
            return Err(ConnectorError::Payload {
                platform: Platform::Codeforces,
                message: envelope.comment.unwrap_or_else(|| "status FAILED".into()),
            });
        }
        envelope.result.ok_or_else(|| ConnectorError::Payload {
            platform: Platform::Codeforces,
            message: "missing result".to_string(),
        })
    }
}

#[async_trait]
impl Connector for CodeforcesConnector {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch(&self, username: &str) -> Result<RawPlatformData, ConnectorError> {
        let info: Vec<CfUser> = self
            .call(
                &format!("{API_BASE}/user.info?handles={username}"),
                username,
            )
            .await?;
        let user = info.into_iter().next().ok_or_else(|| {
            ConnectorError::UserNotFound {
                platform: Platform::Codeforces,
                username: username.to_string(),
            }
        })?;

        let submissions: Vec<CfSubmission> = self
            .call(
                &format!("{API_BASE}/user.status?handle={username}&from=1&count={SUBMISSION_PAGE}"),
                username,
            )
            .await?;

        let contests: Vec<CfRatingChange> = self
            .call(
                &format!("{API_BASE}/user.rating?handle={username}"),
                username,
            )
            .await?;

        let mut seen = BTreeSet::new();
        let mut solved = Vec::new();
        let mut tags: BTreeMap<String, u64> = BTreeMap::new();
        for sub in &submissions {
            if sub.verdict.as_deref() != Some("OK") {
                continue;
            }
            let name = sub.problem.key();
            if !seen.insert(name.clone()) {
                continue;
            }
            for tag in &sub.problem.tags {
                *tags.entry(tag.clone()).or_insert(0) += 1;
            }
            solved.push(RawSolvedProblem {
                name,
                rating: sub.problem.rating,
                tags: sub.problem.tags.clone(),
                solved_at: Some(sub.creation_time_seconds),
            });
        }

        let contest_results = contests
            .iter()
            .map(|c| RawContestResult {
                contest_name: c.contest_name.clone(),
                old_rating: c.old_rating,
                new_rating: c.new_rating,
                timestamp: c.rating_update_time_seconds,
            })
            .collect::<Vec<_>>();

        Ok(RawPlatformData {
            problems_solved: Some(solved.len() as u64),
            rating: user.rating,
            max_rating: user.max_rating,
            rank: user.rank,
            contests_participated: Some(contest_results.len() as u64),
            tag_distribution: tags,
            solved_problems: solved,
            contest_results,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CfEnvelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfUser {
    rating: Option<i64>,
    max_rating: Option<i64>,
    rank: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfSubmission {
    creation_time_seconds: i64,
    verdict: Option<String>,
    problem: CfProblem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfProblem {
    contest_id: Option<i64>,
    index: Option<String>,
    name: String,
    rating: Option<i64>,
    #[serde(default)]
    tags: Vec<String>,
}

impl CfProblem {
    /// Stable problem identity: "123A. Theatre Square" style, falling back to
    /// the bare name for problems without a contest id.
    fn key(&self) -> String {
        match (self.contest_id, self.index.as_deref()) {
            (Some(id), Some(index)) => format!("{id}{index}. {}", self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfRatingChange {
    contest_name: String,
    old_rating: i64,
    new_rating: i64,
    rating_update_time_seconds: i64,
}
