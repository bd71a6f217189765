//! Scoring items read from files on disk

use std::io::Write;

use llm_quality_cli::commands::score::{build_report, effective_scoring, ScoreOptions};
use llm_quality_cli::input::read_records;
use llm_quality_cli::output::{Formattable, OutputFormat};
use llm_quality_common::EvalConfig;
use llm_quality_domain::{EvaluationItem, FeedbackScore};
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn jsonl(records: &[serde_json::Value]) -> String {
    records.iter().map(|r| format!("{}\n", r)).collect()
}

fn feedback_record(metric_name: &str, value: f64) -> serde_json::Value {
    serde_json::json!({
        "trace_id": "01890a5d-ac96-774b-bcce-b302099a8057",
        "metric_name": metric_name,
        "value": value,
        "recorded_at": "2024-01-15T10:30:00Z"
    })
}

#[test]
fn test_score_json_lines_file_with_feedback() {
    // Arrange
    let items = write_file(&jsonl(&[
        serde_json::json!({
            "question": "What is 2 + 2?",
            "output": "4",
            "expected_answer": "4",
            "category": "math"
        }),
        serde_json::json!({
            "question": "What is the capital of France?",
            "output": "Paris.",
            "category": "geo"
        }),
    ]));
    let feedback = write_file(&jsonl(&[feedback_record("user_rating", 0.8)]));
    let options = ScoreOptions {
        file: items.path().to_path_buf(),
        feedback: Some(feedback.path().to_path_buf()),
        by_category: true,
        experiment: Some("file-run".to_string()),
        ..Default::default()
    };

    // Act
    let scoring = effective_scoring(&EvalConfig::default(), &options).unwrap();
    let items: Vec<EvaluationItem> = read_records(&options.file).unwrap();
    let feedback: Vec<FeedbackScore> = read_records(feedback.path()).unwrap();
    let report = build_report(&scoring, &options, &items, &feedback).unwrap();

    // Assert
    assert_eq!(report.items, 2);
    assert_eq!(report.feedback, 1);
    let names: Vec<&str> = report.report.iter().map(|(name, _)| name).collect();
    assert_eq!(names.last(), Some(&"user_rating"));
    assert_eq!(report.report.get("accuracy").unwrap().count, 1);
    assert_eq!(report.by_category.as_ref().unwrap().len(), 2);
}

#[test]
fn test_json_output_is_machine_readable() {
    // Arrange
    let items = write_file(
        r#"[{
            "question": "What is machine learning?",
            "output": "Machine learning is a field of AI.",
            "expected_answer": "learning from data"
        }]"#,
    );
    let options = ScoreOptions {
        file: items.path().to_path_buf(),
        metrics: vec!["accuracy".to_string(), "similarity".to_string()],
        ..Default::default()
    };

    // Act
    let scoring = effective_scoring(&EvalConfig::default(), &options).unwrap();
    let items: Vec<EvaluationItem> = read_records(&options.file).unwrap();
    let report = build_report(&scoring, &options, &items, &[]).unwrap();
    let json = report.format(OutputFormat::Json).unwrap();

    // Assert
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["items"], 1);
    assert!(value["report"]["accuracy"].is_object());
    assert!(value["report"]["similarity"].is_object());
    assert!(value.get("faults").is_none());
}

#[test]
fn test_malformed_line_is_reported() {
    // Arrange
    let items = write_file("{\"question\": \"q\", \"output\": \"a\"}\nnot json\n");

    // Act
    let err = read_records::<EvaluationItem>(items.path()).unwrap_err();

    // Assert
    assert!(format!("{:#}", err).contains("line 2"));
}

#[test]
fn test_out_of_range_feedback_is_rejected_on_read() {
    // Arrange
    let feedback = write_file(&jsonl(&[
        feedback_record("user_rating", 0.6),
        feedback_record("user_rating", 4.0),
    ]));

    // Act
    let err = read_records::<FeedbackScore>(feedback.path()).unwrap_err();

    // Assert
    let message = format!("{:#}", err);
    assert!(message.contains("line 2"));
    assert!(message.contains("must be within [0, 1]"));
}

#[test]
fn test_feedback_named_like_a_metric_is_rejected() {
    // Arrange
    let items = vec![EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4")];
    let feedback = write_file(&jsonl(&[
        feedback_record("user_rating", 0.8),
        feedback_record("relevance", 0.3),
    ]));
    let options = ScoreOptions::default();
    let scoring = effective_scoring(&EvalConfig::default(), &options).unwrap();

    // Act
    let feedback: Vec<FeedbackScore> = read_records(feedback.path()).unwrap();
    let err = build_report(&scoring, &options, &items, &feedback).unwrap_err();

    // Assert
    assert!(format!("{:#}", err).contains("'relevance' collides with a registered metric"));
}

#[test]
fn test_feedback_means_stay_in_unit_range() {
    // Arrange
    let items = vec![EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4")];
    let feedback = vec![
        feedback_record("user_rating", 1.0),
        feedback_record("user_rating", 0.2),
        feedback_record("helpful", 0.0),
    ];
    let feedback: Vec<FeedbackScore> = feedback
        .into_iter()
        .map(|r| serde_json::from_value(r).unwrap())
        .collect();
    let options = ScoreOptions::default();
    let scoring = effective_scoring(&EvalConfig::default(), &options).unwrap();

    // Act
    let report = build_report(&scoring, &options, &items, &feedback).unwrap();

    // Assert
    for (_, summary) in report.report.iter() {
        assert!((0.0..=1.0).contains(&summary.mean));
    }
    assert!((report.report.mean("user_rating").unwrap() - 0.6).abs() < 1e-12);
    assert_eq!(report.report.mean("helpful"), Some(0.0));
}
