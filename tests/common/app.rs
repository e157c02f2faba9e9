use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use codetrack_backend::config::{Config, ConnectorConfig, WorkerConfig};
use codetrack_backend::connectors::ConnectorRegistry;
use codetrack_backend::routes::build_router;
use codetrack_backend::state::AppState;
use codetrack_backend::store::Store;
use codetrack_backend::sync::SyncEngine;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("codetrack-test.sled");

    // Construct the config directly; set_var would race between parallel tests.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3400,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        connector: ConnectorConfig {
            timeout_secs: 2,
            user_agent: "codetrack-test".to_string(),
        },
        worker: WorkerConfig {
            is_leader: false,
            enable_store_flush: false,
        },
        default_sync_period_hours: 6,
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let registry = ConnectorRegistry::new(&config.connector);
    let sync_engine = Arc::new(SyncEngine::new(store.clone(), registry));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(store, sync_engine, &config, shutdown_tx);

    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}
