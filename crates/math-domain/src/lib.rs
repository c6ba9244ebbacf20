// math-domain library entry point
pub mod adapter;
pub mod error;
pub mod model;
pub mod normalize;

pub use adapter::{Equation, ParsedForm};
pub use error::AdapterError;
pub use model::{DeltaResult, ErrorKind, Shape, Step, StepNote, StepVerdict};
pub use normalize::{normalize, OR_TOKEN};
