use crate::infra::{load_question_bank, read_answers_file};
use clap::Args;
use fit_screener::config::AppConfig;
use fit_screener::error::AppError;
use fit_screener::telemetry;
use fit_screener::screening::{
    JsonFileSink, QuestionBank, QuestionKind, Scorecard, ScreeningService,
};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the candidate's answers (bare map or `{"answers": {...}}`)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Question bank to score against (defaults to SCREENER_QUESTION_BANK)
    #[arg(long)]
    pub(crate) bank: Option<PathBuf>,
    /// Write the candidate record into the export directory
    #[arg(long)]
    pub(crate) export: bool,
    /// Override the export directory (defaults to SCREENER_EXPORT_DIR)
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Print the candidate record as JSON instead of the scorecard
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Question bank to list (defaults to SCREENER_QUESTION_BANK)
    #[arg(long)]
    pub(crate) bank: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        bank,
        export,
        export_dir,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let bank = load_question_bank(bank, &config.screener)?;
    let answers = read_answers_file(&answers)?;

    let export_dir = export_dir.unwrap_or_else(|| config.screener.export_dir.clone());
    let sink = JsonFileSink::new(export_dir, config.screener.export_prefix.clone());
    let service = ScreeningService::new(bank, Arc::new(sink), config.screener.location.clone());

    let (report, stored_at) = if export {
        let receipt = service.submit(answers)?;
        (receipt.report, Some(receipt.stored_at))
    } else {
        (service.evaluate(answers), None)
    };

    if json {
        println!("{}", report.record.to_pretty_json()?);
    } else {
        print!("{}", render_scorecard(&report.scorecard));
    }

    if let Some(path) = stored_at {
        eprintln!("Candidate record written to {path}");
    }

    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let bank = load_question_bank(args.bank, &config.screener)?;
    print!("{}", render_questions(&bank));
    Ok(())
}

pub(crate) fn render_scorecard(scorecard: &Scorecard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", scorecard.headline());

    let _ = writeln!(out, "\nStrengths by dimension");
    for strength in &scorecard.strengths {
        let _ = writeln!(out, "- {}: {}", strength.dimension, strength.score);
    }

    if scorecard.all_knockouts_met {
        let _ = writeln!(out, "\nKnockouts: all must-have requirements met");
    } else {
        let _ = writeln!(out, "\nKnockouts unmet");
        for knockout in &scorecard.knockouts {
            let _ = writeln!(out, "- {}", knockout.label);
        }
    }

    let _ = writeln!(out, "\nCandidate details");
    let _ = writeln!(out, "- Name: {}", scorecard.candidate.name);
    let _ = writeln!(out, "- Email: {}", scorecard.candidate.email);

    if !scorecard.interview_probes.is_empty() {
        let _ = writeln!(out, "\nSuggested interview probes");
        for probe in &scorecard.interview_probes {
            let _ = writeln!(out, "- {probe}");
        }
    }

    out
}

pub(crate) fn render_questions(bank: &QuestionBank) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} questions", bank.questions.len());

    for question in &bank.questions {
        let _ = writeln!(
            out,
            "\n[{}] {} ({}, dimension {}, weight {})",
            question.id,
            question.label,
            question.kind.name(),
            question.dimension,
            question.weight
        );
        if let Some(help) = &question.help {
            let _ = writeln!(out, "  {help}");
        }

        match &question.kind {
            QuestionKind::Likert { labels } => {
                let [low, high] = labels
                    .clone()
                    .unwrap_or_else(|| ["Low".to_string(), "High".to_string()]);
                let _ = writeln!(out, "  1 = {low} ... 5 = {high}");
            }
            QuestionKind::Boolean => {
                let _ = writeln!(out, "  yes / no");
            }
            QuestionKind::Select { options } => {
                for option in options {
                    let _ = writeln!(out, "  - {}: {}", option.value, option.label);
                }
            }
            QuestionKind::Sjt { scenario, choices } => {
                let _ = writeln!(out, "  {scenario}");
                for choice in choices {
                    let _ = writeln!(out, "  {}: {}", choice.key, choice.label);
                }
            }
            QuestionKind::Text { min_chars } => {
                if *min_chars > 0 {
                    let _ = writeln!(out, "  Aim for at least {min_chars} characters.");
                }
            }
            QuestionKind::Unrecognized => {
                let _ = writeln!(out, "  (unsupported question kind; scores 0)");
            }
        }
    }

    out
}
