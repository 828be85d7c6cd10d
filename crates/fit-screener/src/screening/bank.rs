use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUESTION_WEIGHT: f64 = 1.0;
pub const DEFAULT_DIMENSION_WEIGHT: f64 = 1.0;

/// Weight applied to each dimension when rolling question scores up into an overall score.
///
/// Dimensions missing from the table weigh [`DEFAULT_DIMENSION_WEIGHT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionWeights(BTreeMap<String, f64>);

impl DimensionWeights {
    pub fn weight(&self, dimension: &str) -> f64 {
        self.0
            .get(dimension)
            .copied()
            .unwrap_or(DEFAULT_DIMENSION_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for DimensionWeights {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
        )
    }
}

/// One screener question as defined in the bank document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub dimension: String,
    #[serde(default = "default_question_weight")]
    pub weight: f64,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

fn default_question_weight() -> f64 {
    DEFAULT_QUESTION_WEIGHT
}

impl Question {
    pub fn new(id: impl Into<String>, dimension: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            help: None,
            dimension: dimension.into(),
            weight: DEFAULT_QUESTION_WEIGHT,
            kind,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Kind-specific question shape, tagged by the document's `kind` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionKind {
    /// 1–5 rating scale with optional `[low, high]` endpoint captions.
    Likert {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        labels: Option<[String; 2]>,
    },
    Boolean,
    Select {
        #[serde(default)]
        options: Vec<AnswerOption>,
    },
    /// Situational-judgment scenario with keyed choices.
    Sjt {
        #[serde(default)]
        scenario: String,
        #[serde(default)]
        choices: Vec<ScenarioChoice>,
    },
    Text {
        #[serde(default, rename = "minChars")]
        min_chars: usize,
    },
    /// Any kind string the engine does not know; scores zero.
    #[serde(other)]
    Unrecognized,
}

impl QuestionKind {
    pub const fn name(&self) -> &'static str {
        match self {
            QuestionKind::Likert { .. } => "likert",
            QuestionKind::Boolean => "boolean",
            QuestionKind::Select { .. } => "select",
            QuestionKind::Sjt { .. } => "sjt",
            QuestionKind::Text { .. } => "text",
            QuestionKind::Unrecognized => "unrecognized",
        }
    }
}

/// Selectable option of a `select` question. `score` is on the 1–5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Choice of a situational-judgment question, keyed by a short code such as `"A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioChoice {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Read-only screener definition: dimension weights, ordered questions, interview probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    #[serde(default)]
    pub dimensions: DimensionWeights,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interview_probes: Vec<String>,
}

impl QuestionBank {
    pub fn new(
        dimensions: DimensionWeights,
        questions: Vec<Question>,
    ) -> Result<Self, QuestionBankError> {
        let bank = Self {
            dimensions,
            questions,
            interview_probes: Vec::new(),
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| QuestionBankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        let bank: Self = serde_json::from_reader(reader)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, QuestionBankError> {
        let bank: Self = serde_json::from_str(raw)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn with_interview_probes(mut self, probes: Vec<String>) -> Self {
        self.interview_probes = probes;
        self
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn dimension_weight(&self, dimension: &str) -> f64 {
        self.dimensions.weight(dimension)
    }

    fn validate(&self) -> Result<(), QuestionBankError> {
        for (dimension, weight) in self.dimensions.iter() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(QuestionBankError::InvalidDimensionWeight {
                    dimension: dimension.to_string(),
                    weight,
                });
            }
        }

        let mut seen = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                return Err(QuestionBankError::MissingField { index, field: "id" });
            }
            if question.dimension.trim().is_empty() {
                return Err(QuestionBankError::MissingField {
                    index,
                    field: "dimension",
                });
            }
            if !question.weight.is_finite() || question.weight < 0.0 {
                return Err(QuestionBankError::InvalidQuestionWeight {
                    id: question.id.clone(),
                    weight: question.weight,
                });
            }
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionBankError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(())
    }
}

/// Failure to load a question bank. Raised only at startup, never while scoring.
#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("failed to read question bank {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question bank document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question `{0}` is defined more than once")]
    DuplicateQuestion(String),
    #[error("question `{id}` has weight {weight}; question weights must be finite and non-negative")]
    InvalidQuestionWeight { id: String, weight: f64 },
    #[error("dimension `{dimension}` has weight {weight}; dimension weights must be finite and positive")]
    InvalidDimensionWeight { dimension: String, weight: f64 },
    #[error("question #{index} is missing its {field}")]
    MissingField { index: usize, field: &'static str },
}
