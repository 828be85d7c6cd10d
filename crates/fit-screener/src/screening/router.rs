use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::answers::AnswerSet;
use super::service::{ScreeningService, ScreeningServiceError};
use super::sink::{RecordSink, SinkError};

/// Body accepted by the evaluation and submission endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswersPayload {
    #[serde(default)]
    pub answers: AnswerSet,
}

/// Router builder exposing the question bank and the scoring endpoints.
pub fn screening_router<S>(service: Arc<ScreeningService<S>>) -> Router
where
    S: RecordSink + 'static,
{
    Router::new()
        .route("/api/v1/screener/questions", get(questions_handler::<S>))
        .route("/api/v1/screener/evaluations", post(evaluate_handler::<S>))
        .route("/api/v1/screener/submissions", post(submit_handler::<S>))
        .with_state(service)
}

pub(crate) async fn questions_handler<S>(State(service): State<Arc<ScreeningService<S>>>) -> Response
where
    S: RecordSink + 'static,
{
    (StatusCode::OK, axum::Json(service.questions().clone())).into_response()
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    axum::Json(payload): axum::Json<AnswersPayload>,
) -> Response
where
    S: RecordSink + 'static,
{
    let report = service.evaluate(payload.answers);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    axum::Json(payload): axum::Json<AnswersPayload>,
) -> Response
where
    S: RecordSink + 'static,
{
    match service.submit(payload.answers) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(ScreeningServiceError::Sink(SinkError::Unavailable(reason))) => {
            let payload = json!({
                "error": "record sink unavailable",
                "detail": reason,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
