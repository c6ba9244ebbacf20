use math_engine::EngineError;
use thiserror::Error;

/// Errors raised while reshaping raw step text into domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("more than one '=' in a single relation")]
    MultipleEquals,

    #[error("expected an equation but found no '='")]
    MissingEquals,

    #[error("a disjunction needs at least two branches")]
    DegenerateDisjunction,

    #[error("right-hand side is not a product of two parenthesized factors")]
    FactorShape,
}
