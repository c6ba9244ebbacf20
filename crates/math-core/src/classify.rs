//! Shape classifier.
//!
//! Pure and total: unmatched pairs fall back to `Shape::General`.

use math_domain::adapter::{is_two_factor_zero, is_var_equals_value};
use math_domain::{Shape, OR_TOKEN};

/// Label the transition between two canonical texts.
///
/// First match wins. Factorization is checked first because it is the
/// most specific pattern; a disjunction of `(..)(..)=0` lines would
/// otherwise be misread as a split.
pub fn classify(prev: &str, curr: &str) -> Shape {
    if is_two_factor_zero(curr) {
        return Shape::Factorization;
    }
    if is_two_factor_zero(prev) && curr.contains(OR_TOKEN) {
        return Shape::ZeroProductSplit;
    }
    if prev.contains(OR_TOKEN)
        && curr.contains(OR_TOKEN)
        && all_branches_var_equals_value(curr)
    {
        return Shape::SolutionExtraction;
    }
    Shape::General
}

fn all_branches_var_equals_value(text: &str) -> bool {
    let mut branches = text
        .split(OR_TOKEN)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .peekable();
    if branches.peek().is_none() {
        return false;
    }
    branches.all(is_var_equals_value)
}
