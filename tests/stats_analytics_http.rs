mod common;

use std::collections::BTreeMap;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Local, Utc};

use codetrack_backend::analytics::aggregate::compute_aggregates;
use codetrack_backend::connectors::Platform;
use codetrack_backend::store::operations::platform_stats::{PlatformStats, SolvedProblem};
use codetrack_backend::store::Store;

use common::app::spawn_test_app;
use common::http::{assert_json_error, assert_status_ok_json, request, response_json};

fn stats(platform: Platform, solved: u64, rating: Option<i64>) -> PlatformStats {
    PlatformStats {
        platform,
        problems_solved: solved,
        rating,
        max_rating: rating,
        rank: None,
        contests_participated: 1,
        tag_distribution: BTreeMap::from([("dp".to_string(), solved)]),
        solved_problems: Vec::new(),
        rating_history: Vec::new(),
        last_updated: Utc::now(),
        error: None,
    }
}

fn seed_recent_activity(store: &Store, days_back: &[i64]) {
    for &back in days_back {
        let ts = (Local::now() - Duration::days(back)).timestamp();
        let mut s = stats(Platform::Codeforces, 1, Some(1500));
        s.solved_problems = vec![SolvedProblem {
            name: format!("problem-{back}"),
            rating: Some(1200),
            tags: vec!["dp".to_string()],
            solved_at: Some(ts),
        }];
        store.merge_daily_logs(&s).expect("merge daily logs");
    }
}

#[tokio::test]
async fn it_stats_listing_and_lookup() {
    let app = spawn_test_app().await;
    app.state
        .store()
        .put_platform_stats(&stats(Platform::Codeforces, 42, Some(1500)))
        .unwrap();

    let list = request(&app.app, Method::GET, "/api/stats", None).await;
    let (status, body) = response_json(list).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["codeforces"]["problemsSolved"], 42);

    let one = request(&app.app, Method::GET, "/api/stats/codeforces", None).await;
    let (status, body) = response_json(one).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["rating"], 1500);

    let missing = request(&app.app, Method::GET, "/api/stats/atcoder", None).await;
    let (status, _) = response_json(missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let unknown = request(&app.app, Method::GET, "/api/stats/topcoder", None).await;
    let (status, body) = response_json(unknown).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "UNKNOWN_PLATFORM");
}

#[tokio::test]
async fn it_aggregated_stats_requires_a_sync() {
    let app = spawn_test_app().await;

    let before = request(&app.app, Method::GET, "/api/stats/aggregated", None).await;
    let (status, _) = response_json(before).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut all = BTreeMap::new();
    all.insert(Platform::Codeforces, stats(Platform::Codeforces, 10, Some(1500)));
    all.insert(Platform::LeetCode, stats(Platform::LeetCode, 5, None));
    app.state
        .store()
        .put_aggregated_stats(&compute_aggregates(&all, Utc::now()))
        .unwrap();

    let after = request(&app.app, Method::GET, "/api/stats/aggregated", None).await;
    let (status, body) = response_json(after).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["totalProblemsSolved"], 15);
    // only the rated platform contributes to the average
    assert_eq!(body["data"]["averageRating"], 1500.0);
}

#[tokio::test]
async fn it_daily_logs_listing_and_validation() {
    let app = spawn_test_app().await;
    seed_recent_activity(app.state.store(), &[0, 1, 2]);

    let logs = request(&app.app, Method::GET, "/api/logs?days=2", None).await;
    let (status, body) = response_json(logs).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"].as_array().expect("array").len(), 2);

    let bad = request(&app.app, Method::GET, "/api/logs?days=0", None).await;
    let (status, body) = response_json(bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "INVALID_DAYS");
}

#[tokio::test]
async fn it_streaks_reflect_consecutive_days() {
    let app = spawn_test_app().await;
    seed_recent_activity(app.state.store(), &[0, 1, 2]);

    let resp = request(&app.app, Method::GET, "/api/analytics/streaks", None).await;
    let (status, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["current"], 3);
    assert_eq!(body["data"]["longest"], 3);
}

#[tokio::test]
async fn it_compare_validates_window() {
    let app = spawn_test_app().await;
    seed_recent_activity(app.state.store(), &[0, 1]);

    let ok_resp = request(
        &app.app,
        Method::GET,
        "/api/analytics/compare?days=14",
        None,
    )
    .await;
    let (status, body) = response_json(ok_resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["windowDays"], 14);

    let bad = request(
        &app.app,
        Method::GET,
        "/api/analytics/compare?days=1",
        None,
    )
    .await;
    let (status, body) = response_json(bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "INVALID_DAYS");
}

#[tokio::test]
async fn it_insights_work_before_first_sync() {
    let app = spawn_test_app().await;
    app.state
        .store()
        .put_platform_stats(&stats(Platform::Codeforces, 30, Some(1500)))
        .unwrap();

    let resp = request(&app.app, Method::GET, "/api/analytics/insights", None).await;
    let (status, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    // three platforms have no activity yet
    assert_eq!(
        body["data"]["recommendations"]
            .as_array()
            .expect("array")
            .iter()
            .filter(|r| !r["platform"].is_null())
            .count(),
        3
    );
}

#[tokio::test]
async fn it_ratings_endpoints_return_histories() {
    let app = spawn_test_app().await;
    app.state
        .store()
        .upsert_combined_rating("2024-03-01", Platform::Codeforces, 1500)
        .unwrap();

    let combined = request(&app.app, Method::GET, "/api/ratings", None).await;
    let (status, body) = response_json(combined).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"][0]["ratings"]["codeforces"], 1500);

    let per_platform = request(&app.app, Method::GET, "/api/ratings/codeforces", None).await;
    let (status, body) = response_json(per_platform).await;
    assert_status_ok_json(status, &body);
    assert!(body["data"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn it_analytics_degrade_gracefully_on_empty_store() {
    let app = spawn_test_app().await;

    let streaks = request(&app.app, Method::GET, "/api/analytics/streaks", None).await;
    let (status, body) = response_json(streaks).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["current"], 0);
    assert_eq!(body["data"]["longest"], 0);

    let compare = request(&app.app, Method::GET, "/api/analytics/compare", None).await;
    let (status, body) = response_json(compare).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["percentChange"], "0");
}
