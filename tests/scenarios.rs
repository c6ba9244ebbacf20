//! Acceptance scenarios for the whole crate, driven through the
//! top-level re-exports only.

use mathsteps_rust::{
    dispatch, extract_added_content, normalize, validate_sequence, ErrorKind, StepVerdict,
};

fn seq(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn factorization_step_is_accepted() {
    let v = dispatch(&normalize("x^2+5x+6=0"), &normalize("(x+2)(x+3)=0"));
    assert_eq!(v, StepVerdict::valid());
}

#[test]
fn zero_product_split_is_accepted() {
    let v = dispatch(&normalize("(x+2)(x+3)=0"), &normalize("x+2=0 or x+3=0"));
    assert_eq!(v, StepVerdict::valid());
}

#[test]
fn sign_error_in_solution_extraction_is_caught() {
    let v = dispatch(&normalize("x+2=0 or x+3=0"), &normalize("x=2 or x=3"));
    assert_eq!(
        v,
        StepVerdict::invalid(ErrorKind::SolutionCalculationError)
    );
}

#[test]
fn quadratic_walkthrough_with_final_sign_error() {
    let report = validate_sequence(&seq(&[
        "x^2+5x+6=0",
        "(x+2)(x+3)=0",
        "x+2=0 or x+3=0",
        "x=2 or x=3",
    ]));
    assert_eq!(report.first_error_index, Some(3));
    assert_eq!(report.steps[3].is_valid, Some(false));
    assert!(report.steps[..3].iter().all(|s| s.is_valid == Some(true)));
}

#[test]
fn added_line_is_extracted() {
    assert_eq!(extract_added_content("2x+6=12", "2x+6=12\n2x=6"), "2x=6");
}

#[test]
fn propagation_holds_for_every_suffix() {
    let report = validate_sequence(&seq(&[
        "x^2+5x+6=0",
        "(x+1)(x+6)=0",
        "x+1=0 or x+6=0",
        "x=-1 or x=-6",
    ]));
    let k = report.first_error_index.unwrap();
    for step in &report.steps[k..] {
        assert_eq!(step.is_valid, Some(false));
    }
}

#[test]
fn delta_identities() {
    assert_eq!(extract_added_content("", "x=1"), "x=1");
    assert_eq!(extract_added_content("x=1", "x=1"), "");
}
