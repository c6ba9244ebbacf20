//! Validator-internal error plumbing.
//!
//! Validators work with `Result` internally; before anything reaches
//! the sequence report every error is converted into a typed
//! `ErrorKind` on an invalid verdict. Nothing here aborts a sequence.

use math_domain::{AdapterError, ErrorKind, Shape};
use math_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidatorError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Engine(EngineError),
}

// EngineError arrives either bare or already wrapped by the adapter;
// flatten both into the same variant.
impl From<EngineError> for ValidatorError {
    fn from(e: EngineError) -> Self {
        ValidatorError::Engine(e)
    }
}

/// Map an internal error to the diagnostic code for the shape being
/// validated. Unclassifiable failures degrade to `GeneralError`.
pub fn error_kind_for(err: &ValidatorError, shape: Shape) -> ErrorKind {
    match err {
        ValidatorError::Adapter(AdapterError::Engine(EngineError::Parse(_)))
        | ValidatorError::Engine(EngineError::Parse(_)) => ErrorKind::ParsingError,
        ValidatorError::Adapter(AdapterError::MultipleEquals)
        | ValidatorError::Adapter(AdapterError::MissingEquals) => match shape {
            Shape::General => ErrorKind::NotEquation,
            _ => ErrorKind::EquationFormatError,
        },
        ValidatorError::Adapter(AdapterError::FactorShape)
        | ValidatorError::Adapter(AdapterError::DegenerateDisjunction) => {
            ErrorKind::EquationFormatError
        }
        ValidatorError::Adapter(AdapterError::Engine(_)) | ValidatorError::Engine(_) => {
            match shape {
                Shape::Factorization => ErrorKind::FactorizationError,
                Shape::ZeroProductSplit => ErrorKind::ZeroProductRuleError,
                Shape::SolutionExtraction => ErrorKind::SolutionCalculationError,
                Shape::General => ErrorKind::GeneralError,
            }
        }
    }
}
