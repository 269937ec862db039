use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mealadvisor::{app::build_app, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_app(AppState::fake())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn create_profile(app: &Router, body: Value) -> String {
    let (status, profile) = call(app, Method::POST, "/api/v1/profiles", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    profile["id"].as_str().unwrap().to_string()
}

async fn create_item(app: &Router, body: Value) -> String {
    let (status, item) = call(app, Method::POST, "/api/v1/items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    item["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(&app(), Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn metrics_for_reference_profile() {
    let app = app();
    let id = create_profile(
        &app,
        json!({ "name": "sam", "weight_kg": 70.0, "height_cm": 175.0, "age": 30, "sex": "M" }),
    )
    .await;

    let (status, m) = call(&app, Method::GET, &format!("/api/v1/profiles/{id}/metrics"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!((m["bmr"].as_f64().unwrap() - 1695.667).abs() < 0.01);
    assert!((m["recommended_calories"].as_f64().unwrap() - 2543.5).abs() < 0.01);
}

#[tokio::test]
async fn metrics_without_age_or_sex_still_report_bmi() {
    let app = app();
    let id = create_profile(&app, json!({ "name": "sam", "weight_kg": 70.0, "height_cm": 175.0 })).await;
    let (status, m) = call(&app, Method::GET, &format!("/api/v1/profiles/{id}/metrics"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!((m["bmi"].as_f64().unwrap() - 22.857).abs() < 0.001);
    assert!(m["bmr"].is_null());
    assert!(m["recommended_calories"].is_null());
}

#[tokio::test]
async fn metrics_without_height_is_unprocessable() {
    let app = app();
    let id = create_profile(&app, json!({ "name": "sam", "weight_kg": 70.0 })).await;
    let (status, _) = call(&app, Method::GET, &format!("/api/v1/profiles/{id}/metrics"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_profile_is_404() {
    let app = app();
    let uri = format!("/api/v1/recommendations/simple/{}", uuid::Uuid::new_v4());
    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn allergens_are_never_recommended() {
    let app = app();
    let profile = create_profile(&app, json!({ "name": "kim", "allergies": ["peanut"] })).await;
    create_item(&app, json!({ "name": "satay", "allergens": ["peanut"] })).await;
    create_item(&app, json!({ "name": "congee", "cuisine": "cantonese" })).await;

    let (status, recs) = call(
        &app,
        Method::POST,
        "/api/v1/recommendations",
        Some(json!({ "profile_id": profile, "preferred_cuisines": ["cantonese"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["item_name"], "congee");
    assert_eq!(recs[0]["cuisine_match"], 1.0);

    let rec_id = recs[0]["id"].as_str().unwrap();
    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/recommendations/{rec_id}/feedback"),
        Some(json!({ "clicked": true, "rating": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/recommendations/{rec_id}/feedback"),
        Some(json!({ "clicked": true, "ordered": true, "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = call(
        &app,
        Method::GET,
        &format!("/api/v1/recommendations/stats/{profile}"),
        None,
    )
    .await;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["conversion_rate"], 1.0);
}

#[tokio::test]
async fn report_for_excess_calories() {
    let app = app();
    let profile = create_profile(&app, json!({ "name": "lee" })).await;
    let feast = create_item(
        &app,
        json!({ "name": "feast", "calories": 2500.0, "protein": 60.0, "fat": 80.0, "carbohydrate": 370.0 }),
    )
    .await;

    let (status, report) = call(
        &app,
        Method::POST,
        &format!("/api/v1/nutrition/reports/{profile}"),
        Some(json!({ "item_ids": [feast], "report_date": "2024-03-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["report_date"], "2024-03-01");
    assert_eq!(report["targets"]["calories"], 2000.0);
    assert!(report["health_score"].as_i64().unwrap() <= 80);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/v1/nutrition/reports/{profile}"),
        Some(json!({ "item_ids": [feast], "report_date": "March 1st" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, history) = call(
        &app,
        Method::GET,
        &format!("/api/v1/nutrition/history/{profile}?from=2024-03-01&to=2024-03-31"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    let (status, history) = call(
        &app,
        Method::GET,
        &format!("/api/v1/nutrition/history/{profile}?to=2024-03-31"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn item_details_include_derived_fields() {
    let app = app();
    let id = create_item(
        &app,
        json!({ "name": "chicken breast", "calories": 165.0, "protein": 31.0, "fat": 3.6 }),
    )
    .await;
    let (status, item) = call(&app, Method::GET, &format!("/api/v1/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "chicken breast");
    assert_eq!(item["is_healthy"], true);
    assert!(item["nutrient_density"].as_f64().unwrap() > 18.0);

    let (status, found) = call(&app, Method::GET, "/api/v1/items?max_calories=100", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(found.as_array().unwrap().is_empty());
}
