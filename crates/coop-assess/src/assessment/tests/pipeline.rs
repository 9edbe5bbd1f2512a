use super::common::*;
use chrono::{TimeZone, Utc};

use crate::assessment::{
    AnswerValue, AssessmentError, CooperativeId, EnrichedAnswer, RawAnswer, OUT_OF_RANGE_LABEL,
};

#[test]
fn scores_sample_submission_end_to_end() {
    let result = pipeline()
        .run(COOPERATIVE, &sample_answers())
        .expect("sample submission scores");

    assert_eq!(result.cooperative_id, COOPERATIVE);
    let categories: Vec<(&str, f64)> = result.scores_by_category.iter().collect();
    assert_eq!(
        categories,
        vec![
            ("Diagnostic Marketing - Digital", 3.0),
            ("Diagnostic Opérationnel - Logistique", 5.0),
        ]
    );
    assert_eq!(result.overall_score, 4.0);
    assert_eq!(result.interpretation, "Bon");
    assert_eq!(result.cooperative_score(), 80);
    assert_eq!(
        result.recommendations,
        vec![
            "Diagnostic Marketing - Digital: Structurer un plan de communication et suivre les ventes par canal.".to_string(),
            "Diagnostic Opérationnel - Logistique: Mettre en place un suivi des stocks et un planning de livraison pour fiabiliser la logistique.".to_string(),
        ]
    );
}

#[test]
fn enrichment_fills_categories_and_keeps_order() {
    let answers = pipeline()
        .enrich(&sample_answers())
        .expect("answers enrich");

    assert_eq!(
        answers,
        vec![
            EnrichedAnswer {
                question_id: "m1".to_string(),
                category: "Diagnostic Marketing - Digital".to_string(),
                value: 4,
            },
            EnrichedAnswer {
                question_id: "m2".to_string(),
                category: "Diagnostic Marketing - Digital".to_string(),
                value: 2,
            },
            EnrichedAnswer {
                question_id: "o1".to_string(),
                category: "Diagnostic Opérationnel - Logistique".to_string(),
                value: 5,
            },
        ]
    );
}

#[test]
fn provided_category_is_kept_even_for_unknown_questions() {
    let answers = vec![RawAnswer::new("externe-1", 3).with_category("Diagnostic Libre")];

    let result = pipeline()
        .run(COOPERATIVE, &answers)
        .expect("categorised answer scores");

    assert_eq!(result.answers[0].category, "Diagnostic Libre");
    assert_eq!(result.scores_by_category.get("Diagnostic Libre"), Some(3.0));
    assert!(
        result.recommendations.is_empty(),
        "category without axis keyword gets no recommendation"
    );
}

#[test]
fn unknown_question_without_category_rejects_submission() {
    let mut answers = sample_answers();
    answers.push(RawAnswer::new("zz9", 4));

    let error = pipeline()
        .run(COOPERATIVE, &answers)
        .expect_err("unknown question rejected");

    assert_eq!(error, AssessmentError::UnknownQuestionId("zz9".to_string()));
}

#[test]
fn empty_submission_is_rejected() {
    assert_eq!(
        pipeline().run(COOPERATIVE, &[]),
        Err(AssessmentError::EmptyAnswerSet)
    );
}

#[test]
fn missing_fields_are_reported_with_their_position() {
    let answers = vec![
        RawAnswer::new("m1", 4),
        RawAnswer {
            question_id: Some("m2".to_string()),
            value: None,
            category: None,
        },
    ];
    assert_eq!(
        pipeline().run(COOPERATIVE, &answers),
        Err(AssessmentError::MissingAnswerField {
            index: 1,
            field: "value",
        })
    );

    let answers = vec![RawAnswer {
        question_id: Some(String::new()),
        value: Some(AnswerValue::Number(3.0)),
        category: None,
    }];
    assert_eq!(
        pipeline().run(COOPERATIVE, &answers),
        Err(AssessmentError::MissingAnswerField {
            index: 0,
            field: "questionId",
        })
    );
}

#[test]
fn validation_runs_before_category_resolution() {
    let answers = vec![
        RawAnswer::new("zz9", 4),
        RawAnswer {
            question_id: Some("m1".to_string()),
            value: Some(AnswerValue::Text("souvent".to_string())),
            category: None,
        },
    ];

    assert_eq!(
        pipeline().run(COOPERATIVE, &answers),
        Err(AssessmentError::InvalidAnswerValue {
            question_id: "m1".to_string(),
            raw: "souvent".to_string(),
        })
    );
}

#[test]
fn string_values_are_accepted() {
    let answers = vec![
        RawAnswer {
            question_id: Some("s1".to_string()),
            value: Some(AnswerValue::Text(" 2 ".to_string())),
            category: None,
        },
        RawAnswer::new("s2", 1),
    ];

    let result = pipeline()
        .run(COOPERATIVE, &answers)
        .expect("string values parse");

    assert_eq!(
        result.scores_by_category.get("Diagnostic Stratégique - Gouvernance"),
        Some(1.5)
    );
    assert_eq!(result.interpretation, "Très faible");
    assert_eq!(
        result.recommendations,
        vec!["Diagnostic Stratégique - Gouvernance: Clarifier la gouvernance et tenir une comptabilité régulière.".to_string()]
    );
}

#[test]
fn out_of_scale_values_are_scored_and_flagged() {
    let answers = vec![RawAnswer::new("m1", 9)];

    let result = pipeline()
        .run(COOPERATIVE, &answers)
        .expect("out of scale values still score");

    assert_eq!(result.overall_score, 9.0);
    assert_eq!(result.interpretation, OUT_OF_RANGE_LABEL);
}

#[test]
fn identical_inputs_produce_identical_results() {
    let created_at = Utc.with_ymd_and_hms(2025, 4, 2, 10, 30, 0).unwrap();
    let pipeline = pipeline();

    let first = pipeline
        .run_at(CooperativeId(3), &sample_answers(), created_at)
        .expect("first run");
    let second = pipeline
        .run_at(CooperativeId(3), &sample_answers(), created_at)
        .expect("second run");

    assert_eq!(first, second);
}

#[test]
fn huge_numeric_and_string_values_score_without_overflow() {
    let answers = vec![
        RawAnswer {
            question_id: Some("m1".to_string()),
            value: Some(AnswerValue::Number(5e18)),
            category: None,
        },
        RawAnswer {
            question_id: Some("m2".to_string()),
            value: Some(AnswerValue::Text("5000000000000000000".to_string())),
            category: None,
        },
    ];

    let result = pipeline()
        .run(COOPERATIVE, &answers)
        .expect("huge values still score");

    assert_eq!(
        result.scores_by_category.get("Diagnostic Marketing - Digital"),
        Some(5e18)
    );
    assert_eq!(result.interpretation, OUT_OF_RANGE_LABEL);
}
