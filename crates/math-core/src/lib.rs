//! math-core: validación de pasos y extracción de cambios.
//!
//! The step validation and change extraction engine. Input is raw
//! snapshot text from OCR; output is a typed, ordered verdict list and
//! the textual delta between consecutive full-page snapshots.
//!
//! The two entry points collaborators call:
//! - [`validate_sequence`] over an ordered list of raw step texts
//! - [`extract_added_content`] / [`extract_delta`] over two snapshots
//!
//! Everything in this crate is pure computation over the input
//! strings; there is no I/O and no shared state across calls.

pub mod cascade;
pub mod classify;
pub mod delta;
pub mod errors;
pub mod sequence;
pub mod validators;

pub use delta::{extract_added_content, extract_delta};
pub use errors::ValidatorError;
pub use sequence::{validate_sequence, SequenceReport};
pub use validators::dispatch;

pub use math_domain::{DeltaResult, ErrorKind, Shape, Step, StepNote, StepVerdict};
