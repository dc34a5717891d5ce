use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use panelquote_core::config::AppConfig;
use panelquote_db::{connect_with_settings, migrations, SeedDataset};

use crate::bootstrap::Application;
use crate::state::AppState;

async fn test_router() -> Router {
    // A single-connection pool keeps the whole test on one in-memory db.
    let db_pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    migrations::run_pending(&db_pool).await.expect("migrate");
    SeedDataset::load(&db_pool).await.expect("seed");

    let app = Application { config: AppConfig::default(), db_pool };
    super::router(AppState::new(&app).expect("state"))
}

async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn generate_estimation_returns_bom_and_breakdown_for_defaults() {
    let router = test_router().await;

    let (status, body) =
        send_json(&router, "POST", "/api/generate-estimation", json!({"panelType": "MCC"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let items = body["bomItems"].as_array().expect("bomItems array");
    assert_eq!(items.len(), 13);
    assert_eq!(items[0]["componentCode"], json!("ENC-800"));
    assert_eq!(items[0]["unitPrice"], json!("18000"));

    let breakdown = &body["costBreakdown"];
    for field in ["materialCost", "productionCost", "totalCost", "taxAmount", "finalAmount"] {
        assert!(breakdown.get(field).is_some(), "missing `{field}` in costBreakdown");
    }
}

#[tokio::test]
async fn unknown_panel_type_is_a_bad_request_with_correlation_id() {
    let router = test_router().await;

    let (status, body) =
        send_json(&router, "POST", "/api/generate-estimation", json!({"panelType": "DB"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("unknown panel type"));
    assert!(body["correlationId"].as_str().is_some());
}

#[tokio::test]
async fn custom_panel_estimation_carries_supplied_lines_before_commons() {
    let router = test_router().await;

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/generate-estimation",
        json!({
            "panelType": "custom",
            "motorCount": 0,
            "customComponents": [{
                "name": "Harmonic Filter",
                "category": "Accessory",
                "brand": "Epcos",
                "specifications": "7% Detuned",
                "quantity": 2,
                "unitPrice": "9500"
            }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["bomItems"].as_array().expect("bomItems array");
    assert_eq!(items[0]["name"], json!("Harmonic Filter"));
    assert_eq!(items[0]["componentCode"], Value::Null);
    assert_eq!(items[1]["name"], json!("Terminal Block"));
}

#[tokio::test]
async fn quotation_flow_persists_and_serves_a_document() {
    let router = test_router().await;

    let (_, estimation) =
        send_json(&router, "POST", "/api/generate-estimation", json!({"panelType": "MCC"})).await;

    let (status, created) = send_json(
        &router,
        "POST",
        "/api/quotations",
        json!({
            "customerName": "Acme Switchgear",
            "customerAddress": "Plot 12, Industrial Estate",
            "panelType": "MCC",
            "panelSize": "800x800x300",
            "busbarType": "copper",
            "ipRating": "IP55",
            "feederCount": 4,
            "motorCount": 1,
            "bomItems": estimation["bomItems"],
            "costBreakdown": estimation["costBreakdown"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let quotation_id = created["quotationId"].as_i64().expect("quotation id");
    let quotation_number = created["quotationNumber"].as_str().expect("quotation number");
    assert!(quotation_number.ends_with("/QUO/001"));

    let (status, fetched) = get(&router, &format!("/api/quotations/{quotation_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched["items"].as_array().expect("items").len(),
        estimation["bomItems"].as_array().expect("bomItems").len()
    );

    let (status, _) = send_json(
        &router,
        "PUT",
        &format!("/api/quotations/{quotation_id}/status"),
        json!({"status": "sent"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri(format!("/api/quotations/{quotation_id}/document"))
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert!(!bytes.is_empty(), "document body must not be empty");
}

#[tokio::test]
async fn component_routes_expose_the_seeded_catalog() {
    let router = test_router().await;

    let (status, body) = get(&router, "/api/components?category=Busbar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("components").len(), 4);

    let (status, body) = get(&router, "/api/components/TB-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unitPrice"], json!("45"));

    let (status, _) = get(&router, "/api/components/NOPE-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &router,
        "POST",
        "/api/components",
        json!({
            "code": "TB-10",
            "name": "Terminal Block",
            "category": "Accessory",
            "brand": "Phoenix",
            "specifications": "10A, 600V, Screw Type",
            "unitPrice": "45",
            "stockUnit": "Pcs"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn panel_type_detail_includes_its_rule_set() {
    let router = test_router().await;

    let (status, body) = get(&router, "/api/panel-types").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("panel types").len(), 6);

    let (status, body) = get(&router, "/api/panel-types/MCC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], json!("MCC"));
    assert_eq!(body["bomRules"].as_array().expect("rules").len(), 4);
}
