//! End-to-end tests for the TheWind HTTP API against mocked providers

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use std::process::Command;
use thewind::WindConfig;
use thewind::api::AppState;
use thewind::web;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> Value {
    let hours: Vec<String> = (0..24u32).map(|h| format!("2026-10-19T{h:02}:00")).collect();
    let temps: Vec<f64> = (0..24u32).map(|h| 20.0 + f64::from(h) * 0.25).collect();
    let probs: Vec<u32> = (0..24u32).map(|h| h * 3).collect();
    let days: Vec<String> = (0..7).map(|d| format!("2026-10-{:02}", 19 + d)).collect();

    json!({
        "current": {
            "temperature_2m": 22.6,
            "relative_humidity_2m": 64,
            "weather_code": 61,
            "wind_speed_10m": 18.2
        },
        "hourly": {
            "time": hours,
            "temperature_2m": temps,
            "precipitation_probability": probs
        },
        "daily": {
            "time": days,
            "temperature_2m_max": [23.1, 24.0, 22.5, 21.9, 23.3, 24.8, 25.2],
            "temperature_2m_min": [17.0, 17.5, 16.9, 16.0, 16.8, 18.1, 18.4],
            "precipitation_sum": [0.2, 0.0, 0.0, 1.4, 0.0, 0.0, 0.0],
            "precipitation_probability_max": [35, 10, 5, 60, 8, 4, 2]
        }
    })
}

fn rss_with_item(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>search</title>
<item><title>{title}</title><link>https://news.example/1</link>
<pubDate>{}</pubDate><source url="https://ynet.example">Ynet</source></item>
</channel></rss>"#,
        Utc::now().to_rfc2822()
    )
}

const EMPTY_RSS: &str = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>x</title></channel></rss>"#;

async fn mock_providers() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Tel Aviv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Tel Aviv-Yafo", "lat": 32.08, "lon": 34.78, "country": "IL"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Atlantis-Nonexistent-City"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "32.08"))
        .and(query_param("longitude", "34.78"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "weather Haifa"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_item("Storm over Haifa bay")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "weather Eilat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_RSS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "weather in Israel"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_item("Heat across the country")))
        .mount(&server)
        .await;

    server
}

fn app_for(server: &MockServer) -> axum::Router {
    let mut config = WindConfig::default();
    config.geocoding.api_key = Some("test-key".to_string());
    config.geocoding.base_url = server.uri();
    config.forecast.base_url = server.uri();
    config.news.base_url = server.uri();

    let state = AppState::from_config(&config).unwrap();
    web::app(state)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_weather_for_known_city() {
    let server = mock_providers().await;
    let app = app_for(&server);

    let (status, view) = get_json(app.clone(), "/api/weather?city=Tel%20Aviv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["city"], "Tel Aviv-Yafo");
    assert_eq!(view["metrics"]["temperature_c"], 23);
    assert_eq!(view["metrics"]["status"], "Light rain");
    assert_eq!(view["advice"]["driving"], "caution");
    assert_eq!(view["advice"]["clothing"], "warm");
    assert_eq!(view["hourly"].as_array().unwrap().len(), 24);
    assert_eq!(view["week"].as_array().unwrap().len(), 7);
    assert_eq!(view["month"].as_array().unwrap().len(), 30);
    assert_eq!(view["month"][7]["label"], "26/10");

    // second request is served from cache
    let (status, mobile) = get_json(app, "/api/weather?city=Tel%20Aviv&view_mode=mobile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mobile["layout"]["week_columns"], 2);

    let forecast_calls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/v1/forecast")
        .count();
    assert_eq!(forecast_calls, 1);
}

#[tokio::test]
async fn test_weather_for_unknown_city_is_404() {
    let server = mock_providers().await;

    let (status, body) = get_json(
        app_for(&server),
        "/api/weather?city=Atlantis-Nonexistent-City",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No data found"}));
}

#[tokio::test]
async fn test_news_local_then_fallback() {
    let server = mock_providers().await;
    let app = app_for(&server);

    let (status, local) = get_json(app.clone(), "/api/news?city=Haifa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(local[0]["title"], "Storm over Haifa bay");
    assert_eq!(local[0]["source_name"], "Ynet");

    let (_, fallback) = get_json(app, "/api/news?city=Eilat").await;
    assert_eq!(fallback.as_array().unwrap().len(), 1);
    assert_eq!(fallback[0]["title"], "Heat across the country");
}

#[tokio::test]
async fn test_ui_interaction_round_trip() {
    let server = mock_providers().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/ui")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "state": {"theme": "light", "selected_city": "Tel Aviv"},
                "interaction": {"quick_pick": 2}
            })
            .to_string(),
        ))
        .unwrap();

    let response = app_for(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let state: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(state["selected_city"], "Haifa");
    assert_eq!(state["theme"], "light");
}

#[tokio::test]
async fn test_health() {
    let server = mock_providers().await;
    let response = app_for(&server)
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

/// The binary documents its flags
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_thewind"))
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--port"));
}
