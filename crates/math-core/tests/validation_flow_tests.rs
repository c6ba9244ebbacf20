//! Whole-flow validation tests: raw text in, typed verdicts out.

use math_core::{dispatch, validate_sequence, ErrorKind, Shape, StepVerdict};
use math_core::classify::classify;
use math_domain::normalize;

fn seq(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn factorization_transition() {
    let prev = normalize("x^2+5x+6=0");
    let curr = normalize("(x+2)(x+3)=0");
    assert_eq!(classify(&prev, &curr), Shape::Factorization);
    assert_eq!(dispatch(&prev, &curr), StepVerdict::valid());
}

#[test]
fn zero_product_split_transition() {
    let prev = normalize("(x+2)(x+3)=0");
    let curr = normalize("x+2=0 or x+3=0");
    assert_eq!(classify(&prev, &curr), Shape::ZeroProductSplit);
    assert_eq!(dispatch(&prev, &curr), StepVerdict::valid());
}

#[test]
fn solution_extraction_with_sign_error() {
    let prev = normalize("x+2=0 or x+3=0");
    let curr = normalize("x=2 or x=3");
    assert_eq!(classify(&prev, &curr), Shape::SolutionExtraction);
    assert_eq!(
        dispatch(&prev, &curr),
        StepVerdict::invalid(ErrorKind::SolutionCalculationError)
    );
}

#[test]
fn full_sequence_with_late_error() {
    let report = validate_sequence(&seq(&[
        "x^2+5x+6=0",
        "(x+2)(x+3)=0",
        "x+2=0 or x+3=0",
        "x=2 or x=3",
    ]));
    let verdicts: Vec<Option<bool>> = report.steps.iter().map(|s| s.is_valid).collect();
    assert_eq!(
        verdicts,
        vec![Some(true), Some(true), Some(true), Some(false)]
    );
    assert_eq!(report.first_error_index, Some(3));
}

#[test]
fn first_step_valid_for_any_text() {
    for text in ["x=1", "not even math", ""] {
        let report = validate_sequence(&seq(&[text]));
        assert_eq!(report.steps[0].is_valid, Some(true));
    }
}

#[test]
fn propagation_forces_every_later_step_invalid() {
    let report = validate_sequence(&seq(&[
        "x^2+5x+6=0",
        "x^2+5x+7=0",
        "(x+2)(x+3)=0",
        "x+2=0 or x+3=0",
    ]));
    assert_eq!(report.first_error_index, Some(1));
    for step in &report.steps[1..] {
        assert_eq!(step.is_valid, Some(false));
    }
    // the final split is locally sound, so its invalidity is inherited
    assert!(report.steps[3].inherited);
}

#[test]
fn classifier_is_deterministic() {
    let prev = normalize("(x+2)(x+3)=0");
    let curr = normalize("x+2=0 or x+3=0");
    let first = classify(&prev, &curr);
    for _ in 0..10 {
        assert_eq!(classify(&prev, &curr), first);
    }
}

#[test]
fn garbage_mid_sequence_does_not_abort() {
    let report = validate_sequence(&seq(&["x+1=0", "???", "x=-1"]));
    assert_eq!(report.steps.len(), 3);
    assert_eq!(report.steps[1].is_valid, Some(false));
    assert_eq!(report.steps[1].error_kind, Some(ErrorKind::ParsingError));
    assert_eq!(report.first_error_index, Some(1));
}

#[test]
fn report_serializes_to_json() {
    let report = validate_sequence(&seq(&["x+1=0", "1+x=0"]));
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"first_error_index\":null"));
    assert!(json.contains("\"canonical_text\""));
}
