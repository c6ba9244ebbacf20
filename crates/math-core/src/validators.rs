//! Per-shape validators and the dispatch entry point.
//!
//! Each validator answers one question about a `(prev, curr)` pair of
//! canonical texts. Internal failures never escape: `dispatch` converts
//! them into an invalid verdict with the shape's diagnostic code.

use math_domain::adapter::{
    constant_value, extract_factors, parse_form, split_disjunction, Equation, ParsedForm,
};
use math_domain::{ErrorKind, Shape, StepVerdict};
use math_engine::{Expr, Rational};

use crate::cascade::{are_equivalent, equations_equivalent};
use crate::classify::classify;
use crate::errors::{error_kind_for, ValidatorError};

type VResult = Result<StepVerdict, ValidatorError>;

/// Classify the transition and run the matching validator.
///
/// Total: any internal error degrades to an invalid verdict instead of
/// propagating, so one bad pair can never abort a sequence.
pub fn dispatch(prev: &str, curr: &str) -> StepVerdict {
    let shape = classify(prev, curr);
    let result = match shape {
        Shape::Factorization => validate_factorization(prev, curr),
        Shape::ZeroProductSplit => validate_zero_product_split(prev, curr),
        Shape::SolutionExtraction => validate_solution_extraction(prev, curr),
        Shape::General => validate_general(prev, curr),
    };
    match result {
        Ok(verdict) => verdict,
        Err(e) => {
            let kind = error_kind_for(&e, shape);
            log::warn!("validator failed (shape {shape}): {e} -> {kind}");
            StepVerdict::invalid(kind)
        }
    }
}

/// General rewrite: both texts must denote the same object, side by
/// side for equations, branch by branch for disjunctions.
fn validate_general(prev: &str, curr: &str) -> VResult {
    let a = parse_form(prev)?;
    let b = parse_form(curr)?;
    let equivalent = match (&a, &b) {
        (ParsedForm::Equation(ea), ParsedForm::Equation(eb)) => equations_equivalent(ea, eb),
        (ParsedForm::Expression(xa), ParsedForm::Expression(xb)) => are_equivalent(xa, xb),
        (ParsedForm::Disjunction(da), ParsedForm::Disjunction(db)) => {
            disjunctions_match(da, db)
        }
        // an equation cannot be a rewrite of a bare expression
        _ => false,
    };
    if equivalent {
        Ok(StepVerdict::valid())
    } else {
        Ok(StepVerdict::invalid(ErrorKind::NotEquivalent))
    }
}

/// Order-independent matching: every branch of `a` pairs with exactly
/// one unused branch of `b`.
fn disjunctions_match(a: &[Equation], b: &[Equation]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    for ea in a {
        let found = b.iter().enumerate().find(|(j, eb)| {
            !used[*j] && equations_equivalent(ea, eb)
        });
        match found {
            Some((j, _)) => used[j] = true,
            None => return false,
        }
    }
    true
}

/// `prev` is `P = 0`, `curr` is `(f1)(f2) = 0`; the product of the
/// factors must expand back to `P`.
fn validate_factorization(prev: &str, curr: &str) -> VResult {
    let prev_eq = match parse_form(prev)? {
        ParsedForm::Equation(eq) => eq,
        _ => return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError)),
    };
    if !prev_eq.rhs_is_zero() {
        return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError));
    }
    let [f1, f2] = match extract_factors(curr) {
        Ok(fs) => fs,
        Err(e) => {
            log::debug!("factor extraction failed: {e}");
            return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError));
        }
    };

    let product = Expr::mul(vec![f1.clone(), f2.clone()]);
    if are_equivalent(&product, &prev_eq.lhs) {
        return Ok(StepVerdict::valid());
    }

    // inconclusive direct comparison: compare root sets instead
    match root_sets_match(&prev_eq.lhs, &f1, &f2) {
        Ok(true) => Ok(StepVerdict::valid()),
        Ok(false) => Ok(StepVerdict::invalid(ErrorKind::FactorizationError)),
        Err(e) => {
            log::debug!("root set fallback failed: {e}");
            Ok(StepVerdict::invalid(ErrorKind::FactorizationError))
        }
    }
}

fn root_sets_match(lhs: &Expr, f1: &Expr, f2: &Expr) -> Result<bool, ValidatorError> {
    let var = single_variable(&[lhs.clone(), f1.clone(), f2.clone()])
        .ok_or(ValidatorError::Engine(math_engine::EngineError::Unsupported(
            "factorization is not univariate".into(),
        )))?;
    let zero = Expr::num_int(0);
    let expected = math_engine::solve(lhs, &zero, &var)?;
    let mut implied = math_engine::solve(f1, &zero, &var)?;
    implied.extend(math_engine::solve(f2, &zero, &var)?);
    implied.sort();
    implied.dedup();
    Ok(expected == implied)
}

/// `prev` is `(f1)(f2) = 0`, `curr` is `g1 = 0 or g2 = 0`; factors must
/// match branch left-hand sides one to one, in either order.
fn validate_zero_product_split(prev: &str, curr: &str) -> VResult {
    let [f1, f2] = extract_factors(prev)?;
    let branches = split_disjunction(curr)?;
    if branches.len() != 2 {
        return Ok(StepVerdict::invalid(ErrorKind::ZeroProductRuleError));
    }
    if !branches.iter().all(Equation::rhs_is_zero) {
        return Ok(StepVerdict::invalid(ErrorKind::ZeroProductRuleError));
    }
    let (g1, g2) = (&branches[0].lhs, &branches[1].lhs);
    let straight = are_equivalent(&f1, g1) && are_equivalent(&f2, g2);
    let crossed = are_equivalent(&f1, g2) && are_equivalent(&f2, g1);
    if straight || crossed {
        Ok(StepVerdict::valid())
    } else {
        Ok(StepVerdict::invalid(ErrorKind::ZeroProductRuleError))
    }
}

/// `prev` is a disjunction of `expr = 0` branches, `curr` a disjunction
/// of `x = value` branches; solving `prev` must yield exactly the
/// claimed value set.
fn validate_solution_extraction(prev: &str, curr: &str) -> VResult {
    let prev_branches = split_disjunction(prev)?;
    let curr_branches = split_disjunction(curr)?;
    if prev_branches.len() != curr_branches.len() {
        return Ok(StepVerdict::invalid(ErrorKind::SolutionCalculationError));
    }
    if !prev_branches.iter().all(Equation::rhs_is_zero) {
        return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError));
    }

    // every curr branch must bind the same single variable
    let mut var: Option<String> = None;
    for branch in &curr_branches {
        match &branch.lhs {
            Expr::Sym(name) => match &var {
                Some(v) if v != name => {
                    return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError))
                }
                _ => var = Some(name.clone()),
            },
            _ => return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError)),
        }
    }
    let Some(var) = var else {
        return Ok(StepVerdict::invalid(ErrorKind::EquationFormatError));
    };

    let mut claimed: Vec<Rational> = Vec::with_capacity(curr_branches.len());
    for branch in &curr_branches {
        match constant_value(&branch.rhs) {
            Some(v) => claimed.push(v),
            None => return Ok(StepVerdict::invalid(ErrorKind::SolutionCalculationError)),
        }
    }
    claimed.sort();
    claimed.dedup();

    let mut actual: Vec<Rational> = Vec::new();
    for branch in &prev_branches {
        match math_engine::solve(&branch.lhs, &branch.rhs, &var) {
            Ok(roots) => actual.extend(roots),
            Err(e) => {
                log::debug!("solving a branch failed: {e}");
                return Ok(StepVerdict::invalid(ErrorKind::SolutionCalculationError));
            }
        }
    }
    actual.sort();
    actual.dedup();

    if claimed == actual {
        Ok(StepVerdict::valid())
    } else {
        Ok(StepVerdict::invalid(ErrorKind::SolutionCalculationError))
    }
}

/// The only variable mentioned across the expressions, if there is
/// exactly one.
fn single_variable(exprs: &[Expr]) -> Option<String> {
    let mut vars = std::collections::BTreeSet::new();
    for e in exprs {
        vars.extend(math_engine::free_symbols(e));
    }
    if vars.len() == 1 {
        vars.into_iter().next()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(prev: &str, curr: &str) -> StepVerdict {
        let p = math_domain::normalize(prev);
        let c = math_domain::normalize(curr);
        dispatch(&p, &c)
    }

    #[test]
    fn correct_factorization_is_valid() {
        let v = check("x^2+5x+6=0", "(x+2)(x+3)=0");
        assert_eq!(v, StepVerdict::valid());
    }

    #[test]
    fn wrong_factorization_is_flagged() {
        let v = check("x^2+5x+6=0", "(x+1)(x+6)=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::FactorizationError));
    }

    #[test]
    fn factorization_of_non_zero_rhs_is_a_format_error() {
        let v = check("x^2+5x+6=1", "(x+2)(x+3)=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::EquationFormatError));
    }

    #[test]
    fn zero_product_split_accepts_either_order() {
        let v = check("(x+2)(x+3)=0", "x+2=0 or x+3=0");
        assert_eq!(v, StepVerdict::valid());
        let v = check("(x+2)(x+3)=0", "x+3=0 or x+2=0");
        assert_eq!(v, StepVerdict::valid());
    }

    #[test]
    fn zero_product_split_rejects_foreign_branches() {
        let v = check("(x+2)(x+3)=0", "x+2=0 or x+4=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::ZeroProductRuleError));
    }

    #[test]
    fn solution_extraction_checks_signs() {
        let v = check("x+2=0 or x+3=0", "x=-2 or x=-3");
        assert_eq!(v, StepVerdict::valid());
        // classic sign error
        let v = check("x+2=0 or x+3=0", "x=2 or x=3");
        assert_eq!(
            v,
            StepVerdict::invalid(ErrorKind::SolutionCalculationError)
        );
    }

    #[test]
    fn solution_extraction_order_is_free() {
        let v = check("x+2=0 or x+3=0", "x=-3 or x=-2");
        assert_eq!(v, StepVerdict::valid());
    }

    #[test]
    fn general_rewrite_of_equations_is_side_by_side() {
        let v = check("x^2+5x+6=0", "6+5x+x^2=0");
        assert_eq!(v, StepVerdict::valid());
        let v = check("x^2+5x+6=0", "x^2+5x+7=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::NotEquivalent));
    }

    #[test]
    fn variable_exponent_is_not_misread_as_a_product() {
        // `x^{2x}` must stay grouped; reading it as x**2*x would make
        // this transition look like a correct power rewrite
        let v = check("x^{2x}=0", "x^{3}=0");
        assert_ne!(v, StepVerdict::valid());
        assert_eq!(v, StepVerdict::invalid(ErrorKind::NotEquivalent));
    }

    #[test]
    fn unparsable_input_is_a_parsing_error() {
        let v = check("x^2+5x+6=0", "x^2+5x+?=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::ParsingError));
    }

    #[test]
    fn multiple_equals_is_not_an_equation() {
        let v = check("x+1=0", "x=1=0");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::NotEquation));
    }

    #[test]
    fn equation_against_expression_is_not_equivalent() {
        let v = check("x+1=0", "x+1");
        assert_eq!(v, StepVerdict::invalid(ErrorKind::NotEquivalent));
    }
}
