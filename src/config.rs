use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::SYNC_PERIODS_HOURS;

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub connector: ConnectorConfig,
    pub worker: WorkerConfig,
    pub default_sync_period_hours: u64,
}

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub is_leader: bool,
    pub enable_store_flush: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("enable_file_logs", &self.enable_file_logs)
            .field("log_dir", &self.log_dir)
            .field("sled_path", &self.sled_path)
            .field("cors_origin", &self.cors_origin)
            .field("connector", &self.connector)
            .field("worker", &self.worker)
            .field("default_sync_period_hours", &self.default_sync_period_hours)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut period = env_or_parse("DEFAULT_SYNC_PERIOD_HOURS", 6_u64);
        if !SYNC_PERIODS_HOURS.contains(&period) {
            tracing::warn!(period, "Unsupported sync period, falling back to 6h");
            period = 6;
        }

        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3400_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/codetrack.sled"),
            cors_origin: env_or("CORS_ORIGIN", "*"),
            connector: ConnectorConfig {
                timeout_secs: env_or_parse("CONNECTOR_TIMEOUT_SECS", 20_u64),
                user_agent: env_or("CONNECTOR_USER_AGENT", "codetrack-backend/0.1"),
            },
            worker: WorkerConfig {
                is_leader: env_or_bool("WORKER_LEADER", true),
                enable_store_flush: env_or_bool("ENABLE_STORE_FLUSH_WORKER", true),
            },
            default_sync_period_hours: period,
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
