use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of the cooperative that owns an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooperativeId(pub u64);

impl fmt::Display for CooperativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a stored assessment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub u64);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer value as submitted: questionnaires post either JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Integer score carried by the value, truncating any fractional part toward zero.
    pub fn to_score(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(number) => truncate(*number),
            AnswerValue::Text(raw) => {
                let trimmed = raw.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate))
            }
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(number) => write!(f, "{number}"),
            AnswerValue::Text(raw) => write!(f, "{raw}"),
        }
    }
}

fn truncate(number: f64) -> Option<i64> {
    if number.is_finite() && number.abs() < i64::MAX as f64 {
        Some(number.trunc() as i64)
    } else {
        None
    }
}

/// One questionnaire answer exactly as received from the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub value: Option<AnswerValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RawAnswer {
    pub fn new(question_id: impl Into<String>, value: i64) -> Self {
        Self {
            question_id: Some(question_id.into()),
            value: Some(AnswerValue::Number(value as f64)),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Answer after validation and category resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAnswer {
    pub question_id: String,
    pub category: String,
    pub value: i64,
}

/// Category averages keyed by category name, kept in order of first appearance in the
/// submission. Serialized as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoresByCategory(Vec<(String, f64)>);

impl ScoresByCategory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score for `category`, keeping its original position when already present.
    pub fn insert(&mut self, category: impl Into<String>, score: f64) {
        let category = category.into();
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = score,
            None => self.0.push((category, score)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ScoresByCategory {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (category, score) in iter {
            scores.insert(category, score);
        }
        scores
    }
}

impl Serialize for ScoresByCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, score) in &self.0 {
            map.serialize_entry(category, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoresByCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = ScoresByCategory;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = ScoresByCategory::new();
                while let Some((category, score)) = access.next_entry::<String, f64>()? {
                    scores.insert(category, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Fully derived outcome of one questionnaire submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub cooperative_id: CooperativeId,
    pub answers: Vec<EnrichedAnswer>,
    pub overall_score: f64,
    pub scores_by_category: ScoresByCategory,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// Score written back onto the owning cooperative.
    pub fn cooperative_score(&self) -> i64 {
        cooperative_score(self.overall_score)
    }
}

/// Maps the 1.0–5.0 assessment scale onto the cooperative's 20–100 scale.
pub fn cooperative_score(overall_score: f64) -> i64 {
    (overall_score * 20.0).round() as i64
}

/// Validation failures that reject a whole submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("answers must be a non-empty list")]
    EmptyAnswerSet,
    #[error("answer #{index} is missing required field `{field}`")]
    MissingAnswerField { index: usize, field: &'static str },
    #[error("answer to question `{question_id}` has non-numeric value `{raw}`")]
    InvalidAnswerValue { question_id: String, raw: String },
    #[error("question id `{0}` does not belong to any taxonomy category")]
    UnknownQuestionId(String),
}
