pub mod atcoder;
pub mod codechef;
pub mod codeforces;
pub mod leetcode;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConnectorConfig;

/// Supported judge platforms.
///
/// Capability table, listing which raw fields a connector can ever populate:
///
/// | platform   | solved | rating | max_rating | rank | tags | solved_at | contests |
/// |------------|--------|--------|------------|------|------|-----------|----------|
/// | codeforces | yes    | yes    | yes        | yes  | yes  | yes       | yes      |
/// | leetcode   | yes    | yes    | no         | yes  | yes  | no        | yes      |
/// | atcoder    | yes    | yes    | yes        | no   | no   | yes       | yes      |
/// | codechef   | yes    | yes    | yes        | yes  | no   | no        | yes      |
///
/// Everything a connector cannot populate stays `None`/empty in
/// [`RawPlatformData`]; the normalizer fills defaults downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    LeetCode,
    AtCoder,
    CodeChef,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Codeforces,
        Platform::LeetCode,
        Platform::AtCoder,
        Platform::CodeChef,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::LeetCode => "leetcode",
            Platform::AtCoder => "atcoder",
            Platform::CodeChef => "codechef",
        }
    }

    pub fn parse(raw: &str) -> Option<Platform> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "codeforces" => Some(Platform::Codeforces),
            "leetcode" => Some(Platform::LeetCode),
            "atcoder" => Some(Platform::AtCoder),
            "codechef" => Some(Platform::CodeChef),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common raw record every connector maps its payload into.
///
/// Deliberately untagged: optional fields instead of per-platform variants,
/// so downstream code never matches on platform shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlatformData {
    pub problems_solved: Option<u64>,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub contests_participated: Option<u64>,
    #[serde(default)]
    pub tag_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub solved_problems: Vec<RawSolvedProblem>,
    #[serde(default)]
    pub contest_results: Vec<RawContestResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSolvedProblem {
    pub name: String,
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Epoch seconds of the accepted submission, when the platform reports it.
    pub solved_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContestResult {
    pub contest_name: String,
    pub old_rating: i64,
    pub new_rating: i64,
    /// Epoch seconds of the contest end.
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {status} from {platform}")]
    Status { platform: Platform, status: u16 },
    #[error("user not found on {platform}: {username}")]
    UserNotFound { platform: Platform, username: String },
    #[error("unparseable payload from {platform}: {message}")]
    Payload { platform: Platform, message: String },
}

/// One async fetch operation per platform. Implementations own all
/// transport and payload quirks; callers only see `RawPlatformData`.
#[async_trait]
pub trait Connector: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch(&self, username: &str) -> Result<RawPlatformData, ConnectorError>;
}

/// Registry mapping platform ids to connector implementations.
///
/// All connectors share one reqwest client so the configured deadline bounds
/// every fetch in a sync pass.
#[derive(Clone)]
pub struct ConnectorRegistry {
    connectors: BTreeMap<Platform, Arc<dyn Connector>>,
}

impl ConnectorRegistry {
    pub fn new(config: &ConnectorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let mut connectors: BTreeMap<Platform, Arc<dyn Connector>> = BTreeMap::new();
        connectors.insert(
            Platform::Codeforces,
            Arc::new(codeforces::CodeforcesConnector::new(client.clone())),
        );
        connectors.insert(
            Platform::LeetCode,
            Arc::new(leetcode::LeetCodeConnector::new(client.clone())),
        );
        connectors.insert(
            Platform::AtCoder,
            Arc::new(atcoder::AtCoderConnector::new(client.clone())),
        );
        connectors.insert(
            Platform::CodeChef,
            Arc::new(codechef::CodeChefConnector::new(client)),
        );

        Self { connectors }
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn Connector>> {
        self.connectors.get(&platform).cloned()
    }
}
