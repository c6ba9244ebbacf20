//! Sequence validator.
//!
//! Runs the pairwise dispatch over an ordered list of raw snapshot
//! texts and applies the error propagation rule: a conclusion built on
//! a false premise cannot be trusted, so everything after the first
//! invalid step is forced invalid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use math_domain::{normalize, Step, StepNote, StepVerdict};

use crate::validators::dispatch;

/// Result of validating one ordered snapshot sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub steps: Vec<Step>,
    /// Index of the first invalid step, recorded once.
    pub first_error_index: Option<usize>,
}

/// Validate an ordered sequence of raw step texts.
///
/// Step 0 is valid by construction (no predecessor). Local verdicts
/// are computed pairwise first; the propagation pass then runs as a
/// strictly sequential left-to-right scan.
pub fn validate_sequence(raw_steps: &[String]) -> SequenceReport {
    let mut steps: Vec<Step> = raw_steps
        .iter()
        .enumerate()
        .map(|(i, raw)| Step::new(i, raw, &normalize(raw)))
        .collect();

    for i in 0..steps.len() {
        if i == 0 {
            steps[i].apply(StepVerdict::valid());
            continue;
        }
        let prev = steps[i - 1].canonical_text.clone();
        let curr = steps[i].canonical_text.clone();
        if prev == curr {
            // identical after normalization: nothing to validate
            steps[i].apply(StepVerdict::valid());
            steps[i].note = Some(StepNote::Unchanged);
            continue;
        }
        let verdict = dispatch(&prev, &curr);
        log::debug!("step {i}: {verdict:?}");
        steps[i].apply(verdict);
    }

    let first_error_index = steps.iter().position(|s| s.is_valid == Some(false));
    if let Some(k) = first_error_index {
        for step in steps.iter_mut().skip(k + 1) {
            if step.is_valid == Some(true) {
                // locally fine, but built on a bad premise
                step.inherited = true;
            }
            step.is_valid = Some(false);
        }
    }

    SequenceReport {
        analysis_id: Uuid::new_v4(),
        created_at: Utc::now(),
        steps,
        first_error_index,
    }
}
