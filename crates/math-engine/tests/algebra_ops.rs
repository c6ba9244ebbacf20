//! End-to-end checks of the public operation set.

use math_engine::{equals, expand, factor, free_symbols, parse, simplify, solve};
use math_engine::{EngineError, Rational};

#[test]
fn parse_and_expand_pipeline() {
    let e = parse("(x+2)(x+3)").unwrap();
    assert_eq!(expand(&e).unwrap().to_string(), "x**2 + 5*x + 6");
}

#[test]
fn simplify_cancels_a_difference_to_zero() {
    let e = parse("(x+2)*(x+3) - (x**2+5*x+6)").unwrap();
    assert_eq!(simplify(&e).unwrap().to_string(), "0");
}

#[test]
fn equals_decides_both_ways() {
    let a = parse("x**2+5x+6").unwrap();
    let b = parse("(x+2)(x+3)").unwrap();
    assert_eq!(equals(&a, &b), Some(true));

    let c = parse("(x+2)(x+4)").unwrap();
    assert_eq!(equals(&a, &c), Some(false));
}

#[test]
fn equals_is_inconclusive_outside_the_fragment() {
    let a = parse("1/x").unwrap();
    let b = parse("x").unwrap();
    assert_eq!(equals(&a, &b), None);
}

#[test]
fn factor_and_refactor_round() {
    let e = parse("x**2 - 5*x + 6").unwrap();
    let f = factor(&e).unwrap();
    assert_eq!(f.to_string(), "(x - 3)*(x - 2)");
    assert_eq!(equals(&f, &e), Some(true));
}

#[test]
fn factor_with_leading_coefficient() {
    let e = parse("2*x**2+10*x+12").unwrap();
    assert_eq!(factor(&e).unwrap().to_string(), "2*(x + 2)*(x + 3)");
}

#[test]
fn solve_returns_sorted_roots() {
    let lhs = parse("x**2+5*x+6").unwrap();
    let rhs = parse("0").unwrap();
    assert_eq!(
        solve(&lhs, &rhs, "x").unwrap(),
        vec![Rational::int(-3), Rational::int(-2)]
    );
}

#[test]
fn solve_with_nonzero_rhs() {
    let lhs = parse("2*x+1").unwrap();
    let rhs = parse("5").unwrap();
    assert_eq!(solve(&lhs, &rhs, "x").unwrap(), vec![Rational::int(2)]);
}

#[test]
fn solve_double_root_is_deduped() {
    let lhs = parse("x**2+2*x+1").unwrap();
    let rhs = parse("0").unwrap();
    assert_eq!(solve(&lhs, &rhs, "x").unwrap(), vec![Rational::int(-1)]);
}

#[test]
fn solve_cubic_is_out_of_scope() {
    let lhs = parse("x**3-1").unwrap();
    let rhs = parse("0").unwrap();
    assert!(matches!(
        solve(&lhs, &rhs, "x"),
        Err(EngineError::Unsupported(_))
    ));
}

#[test]
fn free_symbols_are_sorted() {
    let e = parse("y*x + z").unwrap();
    let syms: Vec<String> = free_symbols(&e).into_iter().collect();
    assert_eq!(syms, vec!["x", "y", "z"]);
}
