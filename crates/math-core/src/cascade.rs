//! Equivalence cascade.
//!
//! Ordered comparison strategies of increasing looseness. Only a
//! definitive `true` short-circuits; a strategy that errors is skipped
//! and the next one runs. The final string comparison is syntactic and
//! unsound in general, so the strict variant leaves it out.

use math_domain::Equation;
use math_engine::Expr;

/// Full cascade: engine equality, difference-is-zero, factored
/// comparison, then verbatim canonical strings.
pub fn are_equivalent(a: &Expr, b: &Expr) -> bool {
    equivalent_with(a, b, true)
}

/// Sound strategies only (1-3). Used where a syntactic coincidence
/// must not count as mathematical equality.
pub fn are_equivalent_strict(a: &Expr, b: &Expr) -> bool {
    equivalent_with(a, b, false)
}

fn equivalent_with(a: &Expr, b: &Expr, allow_syntactic: bool) -> bool {
    // 1. engine oracle, tri-valued
    if math_engine::equals(a, b) == Some(true) {
        return true;
    }

    // 2. simplify(a - b) == 0
    let difference = Expr::sub(a.clone(), b.clone());
    match math_engine::simplify(&difference) {
        Ok(d) => {
            if math_engine::is_zero(&d) == Some(true) {
                return true;
            }
        }
        Err(e) => log::debug!("difference strategy inconclusive: {e}"),
    }

    // 3. factored normal forms
    match (math_engine::factor(a), math_engine::factor(b)) {
        (Ok(fa), Ok(fb)) => {
            if fa == fb {
                return true;
            }
        }
        (ra, rb) => log::debug!(
            "factor strategy inconclusive: {:?} / {:?}",
            ra.err(),
            rb.err()
        ),
    }

    // 4. verbatim canonical rendering
    if allow_syntactic && a.to_string() == b.to_string() {
        log::debug!("equivalence decided by string comparison only");
        return true;
    }

    false
}

/// Two equations are equivalent when their sides match pairwise.
pub fn equations_equivalent(a: &Equation, b: &Equation) -> bool {
    are_equivalent(&a.lhs, &b.lhs) && are_equivalent(&a.rhs, &b.rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_engine::parse;

    #[test]
    fn expanded_and_factored_forms_are_equivalent() {
        let a = parse("x**2+5*x+6").unwrap();
        let b = parse("(x+2)*(x+3)").unwrap();
        assert!(are_equivalent(&a, &b));
        assert!(are_equivalent_strict(&a, &b));
    }

    #[test]
    fn different_polynomials_are_not() {
        let a = parse("x**2+5*x+6").unwrap();
        let b = parse("x**2+5*x+7").unwrap();
        assert!(!are_equivalent(&a, &b));
    }

    #[test]
    fn strict_reflexivity_outside_the_fragment() {
        // 1/x is beyond the polynomial fragment; the structural check
        // in the engine oracle still decides a == a
        let a = parse("1/x").unwrap();
        assert!(are_equivalent_strict(&a, &a));
    }

    #[test]
    fn strict_variant_skips_string_comparison() {
        // two trees that render identically but are structurally
        // different and outside the polynomial fragment
        let a = Expr::pow(Expr::sym("x"), Expr::sym("n"));
        let b = Expr::Mul(vec![Expr::pow(Expr::sym("x"), Expr::sym("n"))]);
        assert_eq!(a.to_string(), b.to_string());
        assert!(are_equivalent(&a, &b));
        assert!(!are_equivalent_strict(&a, &b));
    }

    #[test]
    fn equation_equivalence_is_pairwise() {
        let a = math_domain::adapter::parse_equation("x**2+5*x+6=0").unwrap();
        let b = math_domain::adapter::parse_equation("(x+2)(x+3)=0").unwrap();
        assert!(equations_equivalent(&a, &b));
    }
}
