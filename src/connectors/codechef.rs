//! CodeChef connector.
//!
//! CodeChef has no stable public API; this uses the community profile proxy
//! that serves the scraped profile page as JSON. Solved problems come back as
//! a bare count without names or timestamps, so neither the daily log nor the
//! tag distribution ever receives CodeChef entries.

use axum::async_trait;
use serde::Deserialize;

use super::{Connector, ConnectorError, Platform, RawContestResult, RawPlatformData};

const PROFILE_URL: &str = "https://codechef-api.vercel.app/handle";

pub struct CodeChefConnector {
    client: reqwest::Client,
}

impl CodeChefConnector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Connector for CodeChefConnector {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch(&self, username: &str) -> Result<RawPlatformData, ConnectorError> {
        let resp = self
            .client
            .get(format!("{PROFILE_URL}/{username}"))
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ConnectorError::UserNotFound {
                platform: Platform::CodeChef,
                username: username.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ConnectorError::Status {
                platform: Platform::CodeChef,
                status: status.as_u16(),
            });
        }

        let profile: CcProfile = resp.json().await?;
        if !profile.success {
            return Err(ConnectorError::UserNotFound {
                platform: Platform::CodeChef,
                username: username.to_string(),
            });
        }

        let contest_results = profile
            .rating_data
            .iter()
            .scan(0_i64, |prev, entry| {
                let old_rating = if *prev == 0 { entry.rating } else { *prev };
                *prev = entry.rating;
                Some(RawContestResult {
                    contest_name: entry.name.clone(),
                    old_rating,
                    new_rating: entry.rating,
                    timestamp: entry.end_timestamp(),
                })
            })
            .collect::<Vec<_>>();

        Ok(RawPlatformData {
            problems_solved: profile.problems_solved,
            rating: profile.current_rating,
            max_rating: profile.highest_rating,
            rank: profile.stars,
            contests_participated: Some(contest_results.len() as u64),
            tag_distribution: Default::default(),
            solved_problems: Vec::new(),
            contest_results,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CcProfile {
    success: bool,
    current_rating: Option<i64>,
    highest_rating: Option<i64>,
    stars: Option<String>,
    problems_solved: Option<u64>,
    #[serde(default)]
    rating_data: Vec<CcContest>,
}

#[derive(Debug, Deserialize)]
struct CcContest {
    name: String,
    rating: i64,
    end_date: Option<String>,
}

impl CcContest {
    fn end_timestamp(&self) -> i64 {
        self.end_date
            .as_deref()
            .and_then(|raw| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
            })
            .map(|t| t.and_utc().timestamp())
            .unwrap_or_default()
    }
}
