use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::screening::router::{submit_handler, AnswersPayload};
use crate::screening::ScreeningService;

fn json_request(uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_lists_the_bank() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/screener/questions")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let questions = body["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 9);
    assert_eq!(questions[2]["kind"], "boolean");
    assert_eq!(questions[7]["minChars"], 80);
    assert_eq!(body["dimensions"]["hospitality"], 1.5);
}

#[tokio::test]
async fn submission_route_returns_created_receipt() {
    let (service, sink) = build_service();
    let router = router_with_service(service);
    let answers = serde_json::to_value(strong_answers()).expect("answers serialize");

    let response = router
        .oneshot(json_request(
            "/api/v1/screener/submissions",
            json!({ "answers": answers }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["stored_at"], "memory://records/1");
    assert_eq!(body["scorecard"]["tier"], "Strong Match");
    assert_eq!(body["record"]["overallScore"], 100);
    assert_eq!(sink.records().len(), 1);
}

#[tokio::test]
async fn evaluation_route_scores_without_storing() {
    let (service, sink) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/screener/evaluations",
            json!({ "answers": { "availability_evenings": false, "sales_comfort": "2" } }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["record"]["knockoutFailed"],
        json!([
            "availability_evenings",
            "availability_weekends",
            "sales_comfort"
        ])
    );
    assert_eq!(body["outcome"]["tier"], "Review (Knockout unmet)");
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn submission_without_answers_is_still_scored() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("/api/v1/screener/submissions", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["scorecard"]["candidate"]["email"], "—");
}

#[tokio::test]
async fn submit_handler_reports_unavailable_sink() {
    let service = Arc::new(ScreeningService::new(
        Arc::new(question_bank()),
        Arc::new(UnavailableSink),
        LOCATION,
    ));

    let response = submit_handler::<UnavailableSink>(
        State(service),
        axum::Json(AnswersPayload {
            answers: strong_answers(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert_eq!(body["detail"], "export queue offline");
}
