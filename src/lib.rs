//! mathsteps-rust
//!
//! Step validation and change extraction for handwritten algebra
//! snapshots. This crate re-exports the public surface of the
//! workspace members so clients depend on a single entry point:
//!
//! - `math_engine`: symbolic algebra over exact rationals
//! - `math_domain`: normalization, parsing adapters, domain model
//! - `math_core`: classifiers, validators, sequence and delta engines

pub use math_core::{
    dispatch, extract_added_content, extract_delta, validate_sequence, DeltaResult, ErrorKind,
    SequenceReport, Shape, Step, StepNote, StepVerdict,
};
pub use math_domain::normalize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_round_trip() {
        let steps = vec!["x+2=0".to_string(), "2+x=0".to_string()];
        let report = validate_sequence(&steps);
        assert_eq!(report.steps.len(), 2);
        assert!(report.steps.iter().all(|s| s.is_valid == Some(true)));
    }

    #[test]
    fn normalize_is_reachable_from_the_root() {
        assert_eq!(normalize("$5x$"), "5*x");
    }
}
