//! Domain values shared by the validators and the sequence report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of diagnostic codes attached to invalid steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ParsingError,
    NotEquation,
    NotEquivalent,
    FactorizationError,
    ZeroProductRuleError,
    SolutionCalculationError,
    EquationFormatError,
    GeneralError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ParsingError => "parsing_error",
            ErrorKind::NotEquation => "not_equation",
            ErrorKind::NotEquivalent => "not_equivalent",
            ErrorKind::FactorizationError => "factorization_error",
            ErrorKind::ZeroProductRuleError => "zero_product_rule_error",
            ErrorKind::SolutionCalculationError => "solution_calculation_error",
            ErrorKind::EquationFormatError => "equation_format_error",
            ErrorKind::GeneralError => "general_error",
        };
        write!(f, "{s}")
    }
}

/// Transition shape between two consecutive steps. Classification is
/// first match wins, in this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Factorization,
    ZeroProductSplit,
    SolutionExtraction,
    General,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shape::Factorization => "factorization",
            Shape::ZeroProductSplit => "zero_product_split",
            Shape::SolutionExtraction => "solution_extraction",
            Shape::General => "general",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a single validation. Invariant: `error_kind` is present
/// exactly when the verdict is invalid, which the constructors enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepVerdict {
    pub is_valid: bool,
    pub error_kind: Option<ErrorKind>,
}

impl StepVerdict {
    pub fn valid() -> Self {
        StepVerdict {
            is_valid: true,
            error_kind: None,
        }
    }

    pub fn invalid(kind: ErrorKind) -> Self {
        StepVerdict {
            is_valid: false,
            error_kind: Some(kind),
        }
    }
}

/// Annotation attached to a step besides the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepNote {
    /// The step is textually identical to the previous one after
    /// normalization; no algebra was consulted.
    Unchanged,
}

/// One validated entry of a step sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub raw_text: String,
    pub canonical_text: String,
    pub is_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// True when the step was locally fine but a previous step already
    /// failed, so its validity cannot be trusted.
    pub inherited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<StepNote>,
}

impl Step {
    pub fn new(index: usize, raw_text: &str, canonical_text: &str) -> Self {
        Step {
            index,
            raw_text: raw_text.to_string(),
            canonical_text: canonical_text.to_string(),
            is_valid: None,
            error_kind: None,
            inherited: false,
            note: None,
        }
    }

    pub fn apply(&mut self, verdict: StepVerdict) {
        self.is_valid = Some(verdict.is_valid);
        self.error_kind = verdict.error_kind;
    }
}

/// Output of the snapshot delta extractor.
/// Invariant: `changed == false` implies `added_text` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaResult {
    pub changed: bool,
    pub added_text: String,
    /// Which strategy produced the content, for observability.
    pub strategy: String,
}

impl DeltaResult {
    pub fn unchanged() -> Self {
        DeltaResult {
            changed: false,
            added_text: String::new(),
            strategy: "identical".to_string(),
        }
    }

    pub fn added(text: String, strategy: &str) -> Self {
        DeltaResult {
            changed: true,
            added_text: text,
            strategy: strategy.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_snake_case() {
        let s = serde_json::to_string(&ErrorKind::ZeroProductRuleError).unwrap();
        assert_eq!(s, "\"zero_product_rule_error\"");
    }

    #[test]
    fn verdict_constructors_keep_the_invariant() {
        let ok = StepVerdict::valid();
        assert!(ok.is_valid && ok.error_kind.is_none());
        let bad = StepVerdict::invalid(ErrorKind::NotEquivalent);
        assert!(!bad.is_valid);
        assert_eq!(bad.error_kind, Some(ErrorKind::NotEquivalent));
    }

    #[test]
    fn step_serialization_skips_empty_fields() {
        let step = Step::new(0, "x=1", "x=1");
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("error_kind"));
        assert!(!json.contains("note"));
    }
}
