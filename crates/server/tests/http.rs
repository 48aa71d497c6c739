use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::Value;
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::ServerState;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// POST a urlencoded form and return the status and `Location` header.
async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    (response.status(), location)
}

#[tokio::test]
async fn dashboard_for_an_empty_month() {
    let app = app().await;

    let (status, body) = get(&app, "/?year=2024&month=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month_label"], "May 2024");
    assert_eq!(body["total_spent"], "0.00");
    assert_eq!(body["top_category"], "N/A");
    assert_eq!(body["transactions_count"], 0);
    assert_eq!(body["month_options"].as_array().unwrap().len(), 12);
    assert_eq!(body["month_options"][0]["name"], "January");
    assert_eq!(body["year_options"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_period_fallbacks() {
    let app = app().await;

    let (status, body) = get(&app, "/?year=abc&month=0").await;
    assert_eq!(status, StatusCode::OK);
    let today = engine::today();
    assert_eq!(body["selected_month"], Value::from(chrono::Datelike::month(&today)));

    let (status, _) = get(&app, "/?year=2024&month=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_redirects_to_list_with_notice() {
    let app = app().await;

    let (status, location) = post_form(
        &app,
        "/expenses/new",
        "amount=12.50&date=2024-05-03&category=&new_category=Books&description=Novel",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/expenses?notice=expense_added"));

    let (status, body) = get(&app, "/expenses?notice=expense_added").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "expense_added");
    let expenses = body["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["amount"], "12.50");
    assert_eq!(expenses[0]["category"], "Books");
    assert_eq!(expenses[0]["description"], "Novel");
}

#[tokio::test]
async fn invalid_form_redirects_back_with_error() {
    let app = app().await;

    let (status, location) =
        post_form(&app, "/expenses/new", "amount=abc&date=2024-05-03").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/expenses/new?error=invalid_amount")
    );

    let (_, location) = post_form(&app, "/expenses/new", "amount=&date=").await;
    assert_eq!(
        location.as_deref(),
        Some("/expenses/new?error=missing_fields")
    );

    let (_, body) = get(&app, "/expenses").await;
    assert!(body["expenses"].as_array().unwrap().is_empty());
    assert_eq!(body["notice"], Value::Null);

    let (status, body) = get(&app, "/expenses/new?error=invalid_amount").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "invalid_amount");
    assert_eq!(body["expense"], Value::Null);
}

#[tokio::test]
async fn edit_flow() {
    let app = app().await;

    post_form(&app, "/expenses/new", "amount=10&date=2024-05-01&category=Food").await;
    let (_, body) = get(&app, "/expenses").await;
    let id = body["expenses"][0]["id"].as_i64().unwrap();

    let (status, body) = get(&app, &format!("/expenses/{id}/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expense"]["amount"], "10.00");
    assert_eq!(body["categories"][0]["name"], "Food");

    let (_, location) = post_form(
        &app,
        &format!("/expenses/{id}/edit"),
        "amount=10&date=2024-02-30&category=Food",
    )
    .await;
    assert_eq!(
        location,
        Some(format!("/expenses/{id}/edit?error=invalid_date"))
    );

    let (status, location) = post_form(
        &app,
        &format!("/expenses/{id}/edit"),
        "amount=7.25&date=2024-05-02&category=Rent",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/expenses?notice=expense_updated"));

    let (_, body) = get(&app, "/expenses").await;
    assert_eq!(body["expenses"][0]["amount"], "7.25");
    assert_eq!(body["expenses"][0]["category"], "Rent");
}

#[tokio::test]
async fn missing_expense_is_404() {
    let app = app().await;

    let (status, _) = get(&app, "/expenses/99/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form(
        &app,
        "/expenses/99/edit",
        "amount=1&date=2024-05-01&category=Ghost",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form(&app, "/expenses/99/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/expenses/abc/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = post_form(
        &app,
        "/expenses/abc/edit",
        "amount=1&date=2024-05-01&category=Ghost",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form(&app, "/expenses/99999999999/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/expenses/99999999999/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/expenses/new").await;
    assert!(body["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_redirects_with_notice() {
    let app = app().await;

    post_form(&app, "/expenses/new", "amount=3&date=2024-05-01").await;
    let (_, body) = get(&app, "/expenses").await;
    let id = body["expenses"][0]["id"].as_i64().unwrap();

    let (status, location) = post_form(&app, &format!("/expenses/{id}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/expenses?notice=expense_deleted"));

    let (_, body) = get(&app, "/expenses").await;
    assert!(body["expenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn breakdown_values_are_numbers() {
    let app = app().await;

    post_form(&app, "/expenses/new", "amount=10&date=2024-05-01&category=Food").await;
    post_form(&app, "/expenses/new", "amount=5&date=2024-05-02&category=Rent").await;
    post_form(&app, "/expenses/new", "amount=5&date=2024-05-03&category=Food").await;

    let (status, body) = get(&app, "/api/monthly-category-breakdown?year=2024&month=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"], serde_json::json!(["Food", "Rent"]));
    assert_eq!(body["values"], serde_json::json!([15.0, 5.0]));

    let (_, body) = get(&app, "/?year=2024&month=5").await;
    assert_eq!(body["top_category"], "Food");
    assert_eq!(body["top_category_amount"], "15.00");
    assert_eq!(body["total_spent_minor"], 2000);
}

#[tokio::test]
async fn init_db_resets_and_seeds() {
    let app = app().await;

    post_form(&app, "/expenses/new", "amount=3&date=2020-01-01&category=Old").await;

    let response = app
        .clone()
        .oneshot(Request::get("/init-db").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get(&app, "/expenses").await;
    assert_eq!(body["expenses"].as_array().unwrap().len(), 5);

    let (_, body) = get(&app, "/expenses/new").await;
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);

    let (_, body) = get(&app, "/").await;
    assert_eq!(body["transactions_count"], 5);
    assert_eq!(body["top_category"], "Rent");
}
