//! Reference taxonomy: questions grouped by category, interpretation bands, and per-axis
//! recommendation templates.
//!
//! The taxonomy is parsed from the JSON reference document once, validated eagerly, and
//! then shared read-only (usually behind an `Arc`) by every scoring component.

mod document;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use document::{parse_range, AxisEntry, TaxonomyDocument};

/// Taxonomy document compiled into the library.
pub const DEFAULT_TAXONOMY_DOCUMENT: &str = include_str!("../../../data/taxonomy.json");

/// Largest gap tolerated between adjacent bands before a warning is logged. Band bounds
/// are written with two decimals, so `1.59` followed by `1.6` is contiguous.
const BAND_GAP_TOLERANCE: f64 = 0.011;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub expected_answer_text: String,
    /// Parsed and kept with the question; scoring does not apply it.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Closed score interval `[range_min, range_max]` and its qualitative label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBand {
    pub range_min: f64,
    pub range_max: f64,
    pub label: String,
}

impl ScaleBand {
    pub fn new(range_min: f64, range_max: f64, label: impl Into<String>) -> Self {
        Self {
            range_min,
            range_max,
            label: label.into(),
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.range_min <= score && score <= self.range_max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "texts")]
pub enum AxisRecommendations {
    /// Low, medium, and high tier texts.
    Tiered([String; 3]),
    /// Candidates filtered by the category's sub-domain keyword.
    Summary(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub name: String,
    pub recommendations: AxisRecommendations,
}

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy document: {0}")]
    Io(#[from] std::io::Error),
    #[error("taxonomy document does not match the expected schema: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question group #{index} must hold exactly one category, found {found}")]
    CategoryEntry { index: usize, found: usize },
    #[error("category `{0}` declares no questions")]
    EmptyCategory(String),
    #[error("category `{category}` declares a question with an empty id")]
    EmptyQuestionId { category: String },
    #[error("question id `{id}` appears in both `{first}` and `{second}`")]
    DuplicateQuestionId {
        id: String,
        first: String,
        second: String,
    },
    #[error("question `{id}` has an invalid weight")]
    InvalidWeight { id: String },
    #[error("taxonomy declares no interpretation bands")]
    NoBands,
    #[error("interpretation range `{0}` must look like `min - max`")]
    MalformedRange(String),
    #[error("interpretation band `{label}` has min {min} above max {max}")]
    InvertedBand { label: String, min: f64, max: f64 },
    #[error("interpretation band `{next}` overlaps or precedes `{previous}`")]
    BandOrder { previous: String, next: String },
    #[error("axis `{axis}` must declare exactly one of `recommendations` or `recommendations_summary`")]
    AxisShape { axis: String },
    #[error("axis `{axis}` must declare 3 tiered recommendations, found {found}")]
    TierCount { axis: String, found: usize },
    #[error("axis `{axis}` declares an empty recommendation summary")]
    EmptySummary { axis: String },
}

/// Validated, immutable taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    categories: Vec<Category>,
    scale_bands: Vec<ScaleBand>,
    axes: Vec<Axis>,
}

impl Taxonomy {
    /// Builds a taxonomy from already-typed parts, applying the same checks as document
    /// loading.
    pub fn new(
        categories: Vec<Category>,
        scale_bands: Vec<ScaleBand>,
        axes: Vec<Axis>,
    ) -> Result<Self, TaxonomyError> {
        validate_categories(&categories)?;
        validate_bands(&scale_bands)?;
        for axis in &axes {
            validate_axis(axis)?;
        }

        Ok(Self {
            categories,
            scale_bands,
            axes,
        })
    }

    /// The taxonomy bundled with the library.
    pub fn standard() -> Result<Self, TaxonomyError> {
        Self::from_json_str(DEFAULT_TAXONOMY_DOCUMENT)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaxonomyError> {
        let document: TaxonomyDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let document: TaxonomyDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    fn from_document(document: TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let mut categories = Vec::with_capacity(document.questions.len());
        for (index, group) in document.questions.into_iter().enumerate() {
            if group.len() != 1 {
                return Err(TaxonomyError::CategoryEntry {
                    index,
                    found: group.len(),
                });
            }

            for (name, entries) in group {
                let questions = entries
                    .into_iter()
                    .map(|entry| Question {
                        id: entry.id,
                        text: entry.question,
                        expected_answer_text: entry.answer,
                        weight: entry.weight.unwrap_or(1.0),
                    })
                    .collect();
                categories.push(Category { name, questions });
            }
        }

        let scale_bands = document
            .scales
            .general_interpretation
            .into_iter()
            .map(|entry| {
                let (range_min, range_max) = parse_range(&entry.range)
                    .ok_or_else(|| TaxonomyError::MalformedRange(entry.range.clone()))?;
                Ok(ScaleBand {
                    range_min,
                    range_max,
                    label: entry.interpretation,
                })
            })
            .collect::<Result<Vec<_>, TaxonomyError>>()?;

        let axes = document
            .scales
            .axes
            .into_iter()
            .map(|(name, entry)| axis_from_entry(name, entry))
            .collect::<Result<Vec<_>, TaxonomyError>>()?;

        Self::new(categories, scale_bands, axes)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn scale_bands(&self) -> &[ScaleBand] {
        &self.scale_bands
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }
}

fn axis_from_entry(name: String, entry: AxisEntry) -> Result<Axis, TaxonomyError> {
    let recommendations = match (entry.recommendations, entry.recommendations_summary) {
        (Some(tiers), None) => {
            let found = tiers.len();
            let tiers: [String; 3] = tiers.try_into().map_err(|_| TaxonomyError::TierCount {
                axis: name.clone(),
                found,
            })?;
            AxisRecommendations::Tiered(tiers)
        }
        (None, Some(summary)) => AxisRecommendations::Summary(summary),
        _ => return Err(TaxonomyError::AxisShape { axis: name }),
    };

    Ok(Axis {
        name,
        recommendations,
    })
}

fn validate_categories(categories: &[Category]) -> Result<(), TaxonomyError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for category in categories {
        if category.questions.is_empty() {
            return Err(TaxonomyError::EmptyCategory(category.name.clone()));
        }

        for question in &category.questions {
            if question.id.trim().is_empty() {
                return Err(TaxonomyError::EmptyQuestionId {
                    category: category.name.clone(),
                });
            }
            if !question.weight.is_finite() || question.weight < 0.0 {
                return Err(TaxonomyError::InvalidWeight {
                    id: question.id.clone(),
                });
            }
            if let Some(first) = owners.insert(&question.id, &category.name) {
                return Err(TaxonomyError::DuplicateQuestionId {
                    id: question.id.clone(),
                    first: first.to_string(),
                    second: category.name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn validate_bands(bands: &[ScaleBand]) -> Result<(), TaxonomyError> {
    if bands.is_empty() {
        return Err(TaxonomyError::NoBands);
    }

    for band in bands {
        if band.range_min > band.range_max {
            return Err(TaxonomyError::InvertedBand {
                label: band.label.clone(),
                min: band.range_min,
                max: band.range_max,
            });
        }
    }

    for pair in bands.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        // A shared endpoint is allowed; classification hands it to the earlier band.
        if next.range_min < previous.range_max {
            return Err(TaxonomyError::BandOrder {
                previous: previous.label.clone(),
                next: next.label.clone(),
            });
        }
        if next.range_min - previous.range_max > BAND_GAP_TOLERANCE {
            warn!(
                previous = %previous.label,
                next = %next.label,
                "interpretation bands leave a gap; scores inside it classify as out of range"
            );
        }
    }

    Ok(())
}

fn validate_axis(axis: &Axis) -> Result<(), TaxonomyError> {
    match &axis.recommendations {
        AxisRecommendations::Summary(candidates) if candidates.is_empty() => {
            Err(TaxonomyError::EmptySummary {
                axis: axis.name.clone(),
            })
        }
        _ => Ok(()),
    }
}
