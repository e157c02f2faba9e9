//! LeetCode GraphQL connector.
//!
//! LeetCode exposes no solved-problem timestamps through the public profile
//! query, so this connector never populates `solved_at` (see the capability
//! table on [`Platform`]). The daily-log merger skips such batches by design.

use std::collections::BTreeMap;

use axum::async_trait;
use serde::Deserialize;

use super::{Connector, ConnectorError, Platform, RawPlatformData};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    profile { ranking }
    submitStatsGlobal {
      acSubmissionNum { difficulty count }
    }
    tagProblemCounts {
      advanced { tagName problemsSolved }
      intermediate { tagName problemsSolved }
      fundamental { tagName problemsSolved }
    }
  }
  userContestRanking(username: $username) {
    rating
    attendedContestsCount
  }
}
"#;

pub struct LeetCodeConnector {
    client: reqwest::Client,
}

impl LeetCodeConnector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Connector for LeetCodeConnector {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch(&self, username: &str) -> Result<RawPlatformData, ConnectorError> {
        let body = serde_json::json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });

        let resp = self
            .client
            .post(GRAPHQL_URL)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConnectorError::Status {
                platform: Platform::LeetCode,
                status: status.as_u16(),
            });
        }

        let payload: LcResponse = resp.json().await?;
        let data = payload.data.ok_or_else(|| ConnectorError::Payload {
            platform: Platform::LeetCode,
            message: "missing data".to_string(),
        })?;
        let user = data.matched_user.ok_or_else(|| ConnectorError::UserNotFound {
            platform: Platform::LeetCode,
            username: username.to_string(),
        })?;

        let solved = user
            .submit_stats_global
            .as_ref()
            .and_then(|s| {
                s.ac_submission_num
                    .iter()
                    .find(|n| n.difficulty == "All")
                    .map(|n| n.count)
            })
            .unwrap_or(0);

        let mut tags: BTreeMap<String, u64> = BTreeMap::new();
        if let Some(tpc) = &user.tag_problem_counts {
            for bucket in [&tpc.advanced, &tpc.intermediate, &tpc.fundamental] {
                for tag in bucket {
                    *tags.entry(tag.tag_name.clone()).or_insert(0) += tag.problems_solved;
                }
            }
        }

        let (rating, contests) = match &data.user_contest_ranking {
            Some(c) => (Some(c.rating.round() as i64), Some(c.attended_contests_count)),
            None => (None, None),
        };

        Ok(RawPlatformData {
            problems_solved: Some(solved),
            rating,
            max_rating: None,
            rank: user.profile.and_then(|p| p.ranking).map(|r| r.to_string()),
            contests_participated: contests,
            tag_distribution: tags,
            solved_problems: Vec::new(),
            contest_results: Vec::new(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LcResponse {
    data: Option<LcData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcData {
    matched_user: Option<LcMatchedUser>,
    user_contest_ranking: Option<LcContestRanking>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcMatchedUser {
    profile: Option<LcProfile>,
    submit_stats_global: Option<LcSubmitStats>,
    tag_problem_counts: Option<LcTagCounts>,
}

#[derive(Debug, Deserialize)]
struct LcProfile {
    ranking: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcSubmitStats {
    ac_submission_num: Vec<LcAcCount>,
}

#[derive(Debug, Deserialize)]
struct LcAcCount {
    difficulty: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct LcTagCounts {
    #[serde(default)]
    advanced: Vec<LcTagCount>,
    #[serde(default)]
    intermediate: Vec<LcTagCount>,
    #[serde(default)]
    fundamental: Vec<LcTagCount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcTagCount {
    tag_name: String,
    problems_solved: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcContestRanking {
    rating: f64,
    attended_contests_count: u64,
}
