use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::screening::record::CandidateRecord;
use crate::screening::sink::{RecordSink, SinkError};
use crate::screening::{
    screening_router, AnswerOption, AnswerSet, DimensionWeights, Question, QuestionBank,
    QuestionKind, ScenarioChoice, ScreeningEngine, ScreeningService,
};

pub(super) const LOCATION: &str = "Hammer & Nails – Echo Park";

pub(super) fn dimension_weights() -> DimensionWeights {
    [
        ("hospitality", 1.5),
        ("sales", 1.2),
        ("reliability", 1.3),
        ("teamwork", 1.0),
    ]
    .into_iter()
    .collect()
}

fn likert(id: &str, dimension: &str) -> Question {
    Question::new(
        id,
        dimension,
        QuestionKind::Likert {
            labels: Some(["Not at all".to_string(), "Very".to_string()]),
        },
    )
}

fn option(value: &str, score: f64) -> AnswerOption {
    AnswerOption {
        value: value.to_string(),
        label: value.to_string(),
        score: Some(score),
    }
}

fn choice(key: &str, score: f64) -> ScenarioChoice {
    ScenarioChoice {
        key: key.to_string(),
        label: format!("Choice {key}"),
        score: Some(score),
    }
}

pub(super) fn question_bank() -> QuestionBank {
    let questions = vec![
        Question::new("name", "reliability", QuestionKind::Text { min_chars: 0 })
            .with_weight(0.0)
            .with_label("Full name"),
        Question::new("email", "reliability", QuestionKind::Text { min_chars: 0 })
            .with_weight(0.0)
            .with_label("Email"),
        Question::new("availability_evenings", "reliability", QuestionKind::Boolean),
        Question::new("availability_weekends", "reliability", QuestionKind::Boolean),
        likert("sales_comfort", "sales"),
        Question::new(
            "membership_pitch",
            "sales",
            QuestionKind::Sjt {
                scenario: "A first-time guest loved the service but hesitates on membership."
                    .to_string(),
                choices: vec![choice("A", 5.0), choice("B", 2.0), choice("C", 1.0)],
            },
        ),
        likert("greeting", "hospitality"),
        Question::new("best_day", "hospitality", QuestionKind::Text { min_chars: 80 }),
        Question::new(
            "pace",
            "teamwork",
            QuestionKind::Select {
                options: vec![option("fast", 5.0), option("steady", 4.0), option("quiet", 2.0)],
            },
        ),
    ];

    QuestionBank::new(dimension_weights(), questions)
        .expect("fixture bank is valid")
        .with_interview_probes(vec![
            "Walk me through converting a happy first-time guest into a member.".to_string(),
            "How do you keep the lobby immaculate during peak times?".to_string(),
        ])
}

pub(super) fn strong_answers() -> AnswerSet {
    AnswerSet::new()
        .with("name", "Jordan Lee")
        .with("email", "jordan@example.com")
        .with("availability_evenings", true)
        .with("availability_weekends", true)
        .with("sales_comfort", 5)
        .with("membership_pitch", "A")
        .with("greeting", 5)
        .with(
            "best_day",
            "A regular came in stressed before a wedding and left relaxed, then booked a membership.",
        )
        .with("pace", "fast")
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(Arc::new(question_bank()))
}

pub(super) fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|date| date.and_hms_opt(16, 30, 0))
        .expect("valid timestamp")
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl MemorySink {
    pub(super) fn records(&self) -> Vec<CandidateRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }
}

impl RecordSink for MemorySink {
    fn store(&self, record: &CandidateRecord) -> Result<String, SinkError> {
        let mut guard = self.records.lock().expect("sink mutex poisoned");
        guard.push(record.clone());
        Ok(format!("memory://records/{}", guard.len()))
    }
}

pub(super) struct UnavailableSink;

impl RecordSink for UnavailableSink {
    fn store(&self, _record: &CandidateRecord) -> Result<String, SinkError> {
        Err(SinkError::Unavailable("export queue offline".to_string()))
    }
}

pub(super) fn build_service() -> (ScreeningService<MemorySink>, MemorySink) {
    let sink = MemorySink::default();
    let service = ScreeningService::new(
        Arc::new(question_bank()),
        Arc::new(sink.clone()),
        LOCATION,
    );
    (service, sink)
}

pub(super) fn router_with_service<S>(service: ScreeningService<S>) -> axum::Router
where
    S: RecordSink + 'static,
{
    screening_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
