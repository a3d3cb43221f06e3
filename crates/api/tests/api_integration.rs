//! Integration tests for the API server.

use std::sync::OnceLock;

use analytics::EngineOptions;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use derived_store::InMemoryDerivedStore;
use metrics_exporter_prometheus::PrometheusHandle;
use movements::{InMemoryMovementSource, MovementRecord, MovementType, parse_timestamp};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn rec(id: i64, ty: MovementType, quantity: i64, ts: &str) -> MovementRecord {
    MovementRecord::new(id, ty, quantity, parse_timestamp(ts).unwrap())
}

/// Three products: 1 sells 50 of 100 received, 2 oversells to -70,
/// 3 only receives 20.
fn sample_records() -> Vec<MovementRecord> {
    vec![
        rec(1, MovementType::Inbound, 100, "2024-01-01 00:00:00").with_name("Tornillos"),
        rec(1, MovementType::Outbound, 30, "2024-01-15 00:00:00"),
        rec(1, MovementType::Outbound, 20, "2024-02-01 00:00:00"),
        rec(2, MovementType::Outbound, 70, "2024-03-01 00:00:00"),
        rec(3, MovementType::Inbound, 20, "2024-01-01 00:00:00"),
    ]
}

fn setup(records: Vec<MovementRecord>) -> axum::Router {
    let source = InMemoryMovementSource::new(records);
    let store = InMemoryDerivedStore::new();
    let state = api::create_state(source, store, EngineOptions::default());
    api::create_app(state, get_metrics_handle())
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn post_sync(app: &axum::Router) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sync")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = setup(sample_records());

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_sync_returns_run_summary() {
    let app = setup(sample_records());

    let (status, json) = post_sync(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["records_processed"], 5);
    assert_eq!(json["sales_totals"], 2);
    assert_eq!(json["stock_alerts"], 3);
    assert_eq!(json["seasonality"], 2);
    assert!(json["run_id"].as_str().is_some());
}

#[tokio::test]
async fn test_sync_can_run_repeatedly() {
    let app = setup(sample_records());

    let (first, _) = post_sync(&app).await;
    let (second, _) = post_sync(&app).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn test_top_sales_orders_descending() {
    let app = setup(sample_records());
    post_sync(&app).await;

    let (status, json) = get_json(&app, "/sales/top").await;
    assert_eq!(status, StatusCode::OK);
    // Product 2 sold 70, product 1 sold 50.
    assert_eq!(json["labels"][0], "Producto 2");
    assert_eq!(json["values"][0], 70);
    assert_eq!(json["labels"][1], "Tornillos");
    assert_eq!(json["values"][1], 50);
}

#[tokio::test]
async fn test_top_sales_respects_limit() {
    let app = setup(sample_records());
    post_sync(&app).await;

    let (status, json) = get_json(&app, "/sales/top?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["labels"].as_array().unwrap().len(), 1);
    assert_eq!(json["values"][0], 70);
}

#[tokio::test]
async fn test_alert_distribution_counts() {
    let app = setup(sample_records());
    post_sync(&app).await;

    let (status, json) = get_json(&app, "/stock/alerts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["labels"],
        serde_json::json!(["CRITICAL", "LOW", "NORMAL"])
    );
    // Product 2 at -70 is CRITICAL, product 3 at 20 is LOW,
    // product 1 at 50 is NORMAL.
    assert_eq!(json["values"], serde_json::json!([1, 1, 1]));
}

#[tokio::test]
async fn test_seasonality_is_404_before_first_sync() {
    let app = setup(sample_records());

    let (status, json) = get_json(&app, "/sales/seasonality").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_seasonality_serves_sampled_curves() {
    let app = setup(sample_records());
    post_sync(&app).await;

    let (status, json) = get_json(&app, "/sales/seasonality").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["labels"][0], "enero");
    assert_eq!(json["labels"][11], "diciembre");

    // Only products 1 and 2 have outbound activity.
    let datasets = json["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    for dataset in datasets {
        assert_eq!(dataset["data"].as_array().unwrap().len(), 12);
    }
}

#[tokio::test]
async fn test_seasonality_sample_caps_dataset_count() {
    let app = setup(sample_records());
    post_sync(&app).await;

    let (status, json) = get_json(&app, "/sales/seasonality?sample=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["datasets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup(sample_records());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
