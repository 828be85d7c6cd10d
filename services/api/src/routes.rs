use crate::infra::{AppState, ExportSettings};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fit_screener::error::AppError;
use fit_screener::screening::{
    screening_router, CandidateRecord, RecordSink, ScreeningService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_screening_routes<S>(service: Arc<ScreeningService<S>>) -> axum::Router
where
    S: RecordSink + 'static,
{
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/screener/exports",
            axum::routing::post(export_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Re-serve a candidate record as a JSON attachment named after the candidate.
pub(crate) async fn export_endpoint(
    Extension(settings): Extension<ExportSettings>,
    Json(record): Json<CandidateRecord>,
) -> Result<impl IntoResponse, AppError> {
    let body = record.to_pretty_json()?;
    let file_name = record.export_file_name(&settings.prefix);
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fit_screener::screening::{AnswerSet, DimensionScores, KnockoutCheck};

    fn record(email: &str) -> CandidateRecord {
        CandidateRecord {
            answers: AnswerSet::new()
                .with("email", email)
                .with("availability_evenings", false),
            score_by_dimension: [("hospitality", 88u8), ("sales", 71u8)].into_iter().collect::<DimensionScores>(),
            overall_score: 80,
            knockout_failed: vec![KnockoutCheck::AvailabilityEvenings],
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 14)
                .and_then(|date| date.and_hms_opt(9, 15, 0))
                .expect("valid timestamp"),
            location: "Hammer & Nails – Echo Park".to_string(),
        }
    }

    fn settings() -> ExportSettings {
        ExportSettings {
            prefix: "H&N-EP".to_string(),
        }
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn export_endpoint_names_the_attachment() {
        let response = export_endpoint(Extension(settings()), Json(record("sam@example.com")))
            .await
            .expect("export builds")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("disposition header");
        assert_eq!(
            disposition,
            "attachment; filename=\"H&N-EP-candidate-sam@example.com.json\""
        );

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(json["overallScore"], 80);
        assert_eq!(json["knockoutFailed"][0], "availability_evenings");
    }

    #[tokio::test]
    async fn export_endpoint_falls_back_to_anonymous() {
        let response = export_endpoint(Extension(settings()), Json(record("")))
            .await
            .expect("export builds")
            .into_response();

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("disposition header");
        assert!(disposition.contains("H&N-EP-candidate-anonymous.json"));
    }
}
