use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{AnswerValue, RawAnswer};

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answers file: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answers CSV: {}", err),
            AnswerImportError::Json(err) => write!(f, "invalid answers JSON: {}", err),
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
            AnswerImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for AnswerImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads raw answers from questionnaire exports. Values stay unparsed so the pipeline
/// reports bad input the same way it does for HTTP submissions.
pub struct AnswerImporter;

impl AnswerImporter {
    /// Files ending in `.csv` are read as CSV, anything else as a JSON array.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawAnswer>, AnswerImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    /// Expects a `questionId,value[,category]` header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<RawAnswer>, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut answers = Vec::new();
        for record in csv_reader.deserialize::<AnswerRow>() {
            let row = record?;
            answers.push(RawAnswer {
                question_id: row.question_id,
                value: row.value.map(AnswerValue::Text),
                category: row.category,
            });
        }

        Ok(answers)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<RawAnswer>, AnswerImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "questionId", default, deserialize_with = "empty_string_as_none")]
    question_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
