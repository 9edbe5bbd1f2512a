use clap::Args;
use coop_assess::assessment::{
    AnswerImporter, AssessmentPipeline, AssessmentResult, AssessmentServiceError,
    AxisRecommendations, CooperativeId, Taxonomy,
};
use coop_assess::config::AppConfig;
use coop_assess::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answers export: `.csv` with a questionId,value[,category] header, otherwise a JSON array
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Cooperative the answers belong to
    #[arg(long, default_value_t = 1)]
    pub(crate) cooperative_id: u64,
    /// Taxonomy document to score against (defaults to APP_TAXONOMY_PATH, then the bundled one)
    #[arg(long)]
    pub(crate) taxonomy: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TaxonomyCheckArgs {
    /// Taxonomy document to validate (defaults to APP_TAXONOMY_PATH, then the bundled one)
    #[arg(long)]
    pub(crate) taxonomy: Option<PathBuf>,
}

/// An explicit `--taxonomy` wins over the configured path.
fn load_taxonomy(path: Option<PathBuf>) -> Result<Taxonomy, AppError> {
    let mut config = AppConfig::load()?.assessment;
    if path.is_some() {
        config.taxonomy_path = path;
    }
    Ok(config.load_taxonomy()?)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        cooperative_id,
        taxonomy,
        json,
    } = args;

    let taxonomy = Arc::new(load_taxonomy(taxonomy)?);
    let pipeline = AssessmentPipeline::new(taxonomy);
    let raw_answers = AnswerImporter::from_path(&answers)?;
    let result = pipeline
        .run(CooperativeId(cooperative_id), &raw_answers)
        .map_err(AssessmentServiceError::from)?;

    if json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_result(&result);
    }

    Ok(())
}

fn render_result(result: &AssessmentResult) {
    println!("Cooperative {} assessment", result.cooperative_id);
    println!(
        "- {} answers across {} categories",
        result.answers.len(),
        result.scores_by_category.len()
    );
    println!(
        "- Overall score {:.2} ({}) | cooperative score {}",
        result.overall_score,
        result.interpretation,
        result.cooperative_score()
    );
    println!("Category scores:");
    for (category, score) in result.scores_by_category.iter() {
        println!("  - {category}: {score:.2}");
    }
    if result.recommendations.is_empty() {
        println!("No recommendations for these categories.");
    } else {
        println!("Recommendations:");
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }
}

pub(crate) fn run_taxonomy_check(args: TaxonomyCheckArgs) -> Result<(), AppError> {
    let taxonomy = load_taxonomy(args.taxonomy)?;

    println!(
        "Taxonomy OK: {} categories, {} questions",
        taxonomy.categories().len(),
        taxonomy.question_count()
    );
    for category in taxonomy.categories() {
        println!("  - {} ({} questions)", category.name, category.questions.len());
    }
    println!("Interpretation bands:");
    for band in taxonomy.scale_bands() {
        println!("  - {:.2} - {:.2}: {}", band.range_min, band.range_max, band.label);
    }
    println!("Recommendation axes:");
    for axis in taxonomy.axes() {
        let shape = match &axis.recommendations {
            AxisRecommendations::Tiered(_) => "3 tiers".to_string(),
            AxisRecommendations::Summary(candidates) => {
                format!("{} summary candidates", candidates.len())
            }
        };
        println!("  - {}: {shape}", axis.name);
    }

    Ok(())
}
