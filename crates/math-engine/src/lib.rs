//! math-engine: motor algebraico simbólico para el fragmento escolar.
//!
//! Expression trees over exact rational coefficients, restricted to the
//! fragment the step validators need: polynomials in a handful of
//! symbols, linear and quadratic equations with rational roots.
//!
//! Public operation set (the contract consumed by math-core):
//! - `parse(text) -> Expr`
//! - `expand(e)` / `simplify(e)` — polynomial normal form
//! - `factor(e)` — content extraction + quadratic root factoring
//! - `solve(lhs, rhs, var) -> [Rational]`
//! - `equals(a, b) -> Option<bool>` — tri-valued equality oracle
//!
//! Everything outside the fragment surfaces as `EngineError::Unsupported`
//! instead of a wrong answer.

mod expr;
mod parser;
mod poly;
mod rational;

pub use expr::Expr;
pub use rational::Rational;

use poly::Poly;
use std::collections::BTreeSet;
use thiserror::Error;

/// Error type for symbolic operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot parse expression: {0}")]
    Parse(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("numeric overflow")]
    NumericOverflow,

    #[error("equation has no rational roots")]
    NonRationalRoots,
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Parse canonical algebraic text into an expression tree.
///
/// Accepts `**` and `^` for powers and implicit multiplication by
/// adjacency (`5*x`, `5x`, `(x+1)(x+2)`).
pub fn parse(text: &str) -> Result<Expr> {
    parser::parse(text)
}

/// Expand into polynomial normal form (terms sorted by degree).
pub fn expand(e: &Expr) -> Result<Expr> {
    Ok(Poly::from_expr(e)?.to_expr())
}

/// Simplify an expression.
///
/// In this engine simplification is the same polynomial normal form as
/// `expand`; the two names are kept because callers treat them as
/// distinct oracles in the equivalence cascade.
pub fn simplify(e: &Expr) -> Result<Expr> {
    expand(e)
}

/// Whether the expression denotes the zero polynomial.
/// `None` when the expression falls outside the polynomial fragment.
pub fn is_zero(e: &Expr) -> Option<bool> {
    match Poly::from_expr(e) {
        Ok(p) => Some(p.is_zero()),
        Err(err) => {
            log::debug!("is_zero inconclusive: {err}");
            None
        }
    }
}

/// Tri-valued equality oracle.
///
/// `Some(_)` is definitive (both sides normalized into the polynomial
/// fragment); `None` means the oracle cannot decide.
pub fn equals(a: &Expr, b: &Expr) -> Option<bool> {
    if a == b {
        return Some(true);
    }
    match (Poly::from_expr(a), Poly::from_expr(b)) {
        (Ok(pa), Ok(pb)) => Some(pa == pb),
        (ra, rb) => {
            log::debug!("equals inconclusive: {:?} / {:?}", ra.err(), rb.err());
            None
        }
    }
}

/// The free symbols of an expression, sorted.
pub fn free_symbols(e: &Expr) -> BTreeSet<String> {
    e.symbols()
}

/// Factor an expression.
///
/// Supported forms: integer content extraction for any degree, and
/// full root factoring for univariate quadratics with rational roots
/// (`x**2+5*x+6` -> `(x + 2)*(x + 3)`). Anything else comes back in
/// polynomial normal form.
pub fn factor(e: &Expr) -> Result<Expr> {
    let p = Poly::from_expr(e)?;
    if let Some(c) = p.as_constant() {
        return Ok(Expr::Num(c));
    }
    let vars = p.vars();
    if vars.len() == 1 {
        // len checked above, iterator cannot be empty
        if let Some(var) = vars.iter().next() {
            if let Some(coeffs) = p.univariate_coeffs(var) {
                match coeffs.len() {
                    3 => return factor_quadratic(&p, var, &coeffs),
                    _ => return factor_content(&p),
                }
            }
        }
    }
    factor_content(&p)
}

fn factor_quadratic(p: &Poly, var: &str, coeffs: &[Rational]) -> Result<Expr> {
    let (c, b, a) = (coeffs[0], coeffs[1], coeffs[2]);
    // discriminante: b^2 - 4ac
    let disc = b.mul(b)?.sub(Rational::int(4).mul(a)?.mul(c)?)?;
    let root = match disc.sqrt_exact() {
        Some(r) => r,
        None => return Ok(p.to_expr()), // irrational roots: leave expanded
    };
    let two_a = Rational::int(2).mul(a)?;
    let r1 = b.neg()?.sub(root)?.div(two_a)?;
    let r2 = b.neg()?.add(root)?.div(two_a)?;
    let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

    let linear = |r: Rational| -> Result<Expr> {
        let mut terms = vec![Expr::sym(var)];
        let shift = r.neg()?;
        if !shift.is_zero() {
            terms.push(Expr::Num(shift));
        }
        Ok(Expr::add(terms))
    };

    // larger root first so the smaller shift prints first: (x + 2)*(x + 3)
    let body = if lo == hi {
        Expr::pow(linear(lo)?, Expr::num_int(2))
    } else {
        Expr::mul(vec![linear(hi)?, linear(lo)?])
    };
    if a.is_one() {
        Ok(body)
    } else {
        Ok(Expr::mul(vec![Expr::Num(a), body]))
    }
}

fn factor_content(p: &Poly) -> Result<Expr> {
    match p.integer_content()? {
        Some((content, primitive)) if !content.is_one() => Ok(Expr::mul(vec![
            Expr::Num(content),
            primitive.to_expr(),
        ])),
        _ => Ok(p.to_expr()),
    }
}

/// Solve `lhs = rhs` for `var`. Roots are returned sorted and deduped.
///
/// Only linear and quadratic univariate equations with rational roots
/// are in scope; everything else errors.
pub fn solve(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Vec<Rational>> {
    let residual = Expr::sub(lhs.clone(), rhs.clone());
    let p = Poly::from_expr(&residual)?;
    let coeffs = p
        .univariate_coeffs(var)
        .ok_or_else(|| EngineError::Unsupported(format!("equation is not univariate in {var}")))?;
    let mut roots = match coeffs.len() {
        0 => return Err(EngineError::Unsupported("identity equation".into())),
        1 => Vec::new(), // nonzero constant: no solutions
        2 => vec![coeffs[0].neg()?.div(coeffs[1])?],
        3 => {
            let (c, b, a) = (coeffs[0], coeffs[1], coeffs[2]);
            let disc = b.mul(b)?.sub(Rational::int(4).mul(a)?.mul(c)?)?;
            let root = disc.sqrt_exact().ok_or(EngineError::NonRationalRoots)?;
            let two_a = Rational::int(2).mul(a)?;
            vec![
                b.neg()?.sub(root)?.div(two_a)?,
                b.neg()?.add(root)?.div(two_a)?,
            ]
        }
        _ => {
            return Err(EngineError::Unsupported(format!(
                "degree {} is beyond the solver fragment",
                coeffs.len() - 1
            )))
        }
    };
    roots.sort();
    roots.dedup();
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_reaches_normal_form() {
        let e = parse("(x+2)*(x+3)").unwrap();
        let expanded = expand(&e).unwrap();
        assert_eq!(expanded.to_string(), "x**2 + 5*x + 6");
    }

    #[test]
    fn equals_is_definitive_inside_fragment() {
        let a = parse("(x+1)**2").unwrap();
        let b = parse("x**2+2*x+1").unwrap();
        assert_eq!(equals(&a, &b), Some(true));
        let c = parse("x**2+2*x+2").unwrap();
        assert_eq!(equals(&a, &c), Some(false));
    }

    #[test]
    fn factor_quadratic_with_rational_roots() {
        let e = parse("x**2+5*x+6").unwrap();
        assert_eq!(factor(&e).unwrap().to_string(), "(x + 2)*(x + 3)");
    }

    #[test]
    fn factor_double_root_uses_square() {
        let e = parse("x**2+2*x+1").unwrap();
        assert_eq!(factor(&e).unwrap().to_string(), "(x + 1)**2");
    }

    #[test]
    fn factor_extracts_integer_content() {
        let e = parse("2*x+6").unwrap();
        assert_eq!(factor(&e).unwrap().to_string(), "2*(x + 3)");
    }

    #[test]
    fn solve_linear() {
        let lhs = parse("x+2").unwrap();
        let rhs = parse("0").unwrap();
        assert_eq!(solve(&lhs, &rhs, "x").unwrap(), vec![Rational::int(-2)]);
    }

    #[test]
    fn solve_quadratic() {
        let lhs = parse("x**2+5*x+6").unwrap();
        let rhs = parse("0").unwrap();
        assert_eq!(
            solve(&lhs, &rhs, "x").unwrap(),
            vec![Rational::int(-3), Rational::int(-2)]
        );
    }

    #[test]
    fn solve_rejects_irrational_roots() {
        let lhs = parse("x**2-2").unwrap();
        let rhs = parse("0").unwrap();
        assert_eq!(solve(&lhs, &rhs, "x"), Err(EngineError::NonRationalRoots));
    }

    #[test]
    fn is_zero_on_cancelling_difference() {
        let e = parse("(x+1)**2 - (x**2+2*x+1)").unwrap();
        assert_eq!(is_zero(&e), Some(true));
    }
}
