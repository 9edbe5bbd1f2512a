use std::sync::Arc;

use coop_assess::assessment::{
    AnswerImportError, AnswerImporter, AssessmentError, AssessmentPipeline, CooperativeId,
    Taxonomy,
};

fn pipeline() -> AssessmentPipeline {
    AssessmentPipeline::new(Arc::new(Taxonomy::standard().expect("standard taxonomy")))
}

#[test]
fn csv_export_scores_like_a_json_submission() {
    let csv = "questionId,value,category\n\
m1,4,\n\
m2, 2 ,\n\
o1,5,Diagnostic Opérationnel - Logistique\n";

    let answers = AnswerImporter::from_csv_reader(csv.as_bytes()).expect("csv parses");
    let result = pipeline()
        .run(CooperativeId(11), &answers)
        .expect("imported answers score");

    assert_eq!(result.overall_score, 4.0);
    assert_eq!(result.interpretation, "Bon");
    assert_eq!(
        result.scores_by_category.get("Diagnostic Marketing - Digital"),
        Some(3.0)
    );
}

#[test]
fn non_numeric_csv_values_are_rejected_by_the_pipeline() {
    let csv = "questionId,value\nm1,souvent\n";

    let answers = AnswerImporter::from_csv_reader(csv.as_bytes()).expect("csv parses");

    assert_eq!(
        pipeline().run(CooperativeId(11), &answers),
        Err(AssessmentError::InvalidAnswerValue {
            question_id: "m1".to_string(),
            raw: "souvent".to_string(),
        })
    );
}

#[test]
fn importer_picks_format_from_extension() {
    let dir = std::env::temp_dir();
    let csv_path = dir.join(format!("coop-answers-{}.csv", std::process::id()));
    let json_path = dir.join(format!("coop-answers-{}.json", std::process::id()));
    std::fs::write(&csv_path, "questionId,value\ns1,3\n").expect("write csv");
    std::fs::write(&json_path, r#"[{"questionId": "s1", "value": 3}]"#).expect("write json");

    let from_csv = AnswerImporter::from_path(&csv_path);
    let from_json = AnswerImporter::from_path(&json_path);
    std::fs::remove_file(&csv_path).ok();
    std::fs::remove_file(&json_path).ok();

    let from_csv = pipeline()
        .run(CooperativeId(1), &from_csv.expect("csv file loads"))
        .expect("csv answers score");
    let from_json = pipeline()
        .run(CooperativeId(1), &from_json.expect("json file loads"))
        .expect("json answers score");
    assert_eq!(from_csv.scores_by_category, from_json.scores_by_category);
}

#[test]
fn missing_files_surface_io_errors() {
    let result = AnswerImporter::from_path("/nonexistent/answers.csv");
    assert!(matches!(result, Err(AnswerImportError::Io(_))));
}
