//! Router-level tests for the feed endpoints and the app shell fallback.
//!
//! Run with: cargo test --package metabolab-web --test api_routes

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use metabolab_feed::{
    DataResponse, FeedConfig, FeedService, FixedClock, InitialResponse, RandSource,
    SampleGenerator,
};
use metabolab_test_utils::{assert_eq, fixed_instant, sequences};
use metabolab_web::{router::{build_router, data_url, DATA_PATH}, state::AppState};

fn seeded_feed(config: FeedConfig) -> FeedService {
    let generator = SampleGenerator::new(RandSource::seeded(7), FixedClock(fixed_instant()));
    FeedService::new(config, generator)
}

fn app_with(config: FeedConfig, static_dir: &std::path::Path) -> Router {
    build_router(AppState::new(seeded_feed(config), static_dir))
}

fn app() -> Router {
    app_with(FeedConfig::default(), std::path::Path::new("does-not-exist"))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn initial_right_after_start_returns_seeded_history() {
    let app = app();
    let (status, body) = get(&app, "/api/initial").await;
    assert_eq!(status, StatusCode::OK);

    let initial: InitialResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(initial.total, 20);
    assert_eq!(sequences(&initial.history), (1..=20).collect::<Vec<_>>());

    // Reading the initial history never generates.
    let (_, again) = get(&app, "/api/initial").await;
    let again: InitialResponse = serde_json::from_slice(&again).unwrap();
    assert_eq!(again.total, 20);
}

#[tokio::test]
async fn data_returns_new_point_and_trailing_window() {
    let app = app();
    let (status, body) = get(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);

    let data: DataResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(data.current.sequence, 21);
    assert_eq!(data.total, 21);
    assert_eq!(data.history.len(), 20);
    assert_eq!(data.history.last(), Some(&data.current));
    assert_eq!(sequences(&data.history), (2..=21).collect::<Vec<_>>());
}

#[tokio::test]
async fn point_json_uses_chart_field_names() {
    let app = app();
    let (_, body) = get(&app, "/api/data").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    let current = json["current"].as_object().unwrap();

    let mut keys: Vec<&str> = current.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["category", "confidence", "metabolites", "time", "timestamp", "value"]);
    assert_eq!(current["time"], 21);
    assert_eq!(current["timestamp"], "2024-05-14T09:30:00.000Z");
    assert!(json["history"].is_array());
    assert_eq!(json["total"], 21);
}

#[tokio::test]
async fn history_is_capped_and_kept_in_order() {
    let app = app();
    for _ in 0..100 {
        let (status, _) = get(&app, "/api/data").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get(&app, "/api/initial").await;
    let initial: InitialResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(initial.total, 100);
    assert_eq!(sequences(&initial.history), (21..=120).collect::<Vec<_>>());
}

#[tokio::test]
async fn window_follows_feed_config() {
    let config = FeedConfig { history_capacity: 8, seed_points: 3, window: 5 };
    let app = app_with(config, std::path::Path::new("does-not-exist"));

    let (_, body) = get(&app, "/api/data").await;
    let data: DataResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(data.history.len(), 4);

    for _ in 0..10 {
        get(&app, "/api/data").await;
    }
    let (_, body) = get(&app, "/api/data").await;
    let data: DataResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(data.total, 8);
    assert_eq!(sequences(&data.history), (11..=15).collect::<Vec<_>>());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/initial")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn unknown_paths_get_the_app_shell() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static/app.js"), "console.log('metabolab');").unwrap();

    let app = app_with(FeedConfig::default(), dir.path());

    let (status, body) = get(&app, "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "console.log('metabolab');");

    let (status, body) = get(&app, "/case-study/sample-42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<div id=\"root\"></div>");

    // API routes still win over the fallback.
    let (_, body) = get(&app, "/api/initial").await;
    let initial: InitialResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(initial.total, 20);
}

#[tokio::test]
async fn missing_shell_is_not_found() {
    let (status, _) = get(&app(), "/anything").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn advertised_data_url_is_a_served_route() {
    let url = data_url(3001);
    assert_eq!(url, "http://localhost:3001/api/data");

    let path = url.trim_start_matches("http://localhost:3001");
    assert_eq!(path, DATA_PATH);
    let (status, body) = get(&app(), path).await;
    assert_eq!(status, StatusCode::OK);
    let data: DataResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(data.total, 21);
}
