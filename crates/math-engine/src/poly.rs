//! Multivariate polynomial normal form.
//!
//! Terms are stored as `monomial -> coefficient` where a monomial maps
//! symbol names to exponents. This is the single normal form behind
//! `expand`, `simplify`, `equals` and the solver.

use std::collections::{BTreeMap, BTreeSet};

use crate::{EngineError, Expr, Rational, Result};

pub(crate) type Monomial = BTreeMap<String, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Poly {
    terms: BTreeMap<Monomial, Rational>,
}

impl Poly {
    fn zero() -> Poly {
        Poly::default()
    }

    fn constant(c: Rational) -> Poly {
        let mut p = Poly::zero();
        if !c.is_zero() {
            p.terms.insert(Monomial::new(), c);
        }
        p
    }

    fn var(name: &str) -> Poly {
        let mut m = Monomial::new();
        m.insert(name.to_string(), 1);
        let mut p = Poly::zero();
        p.terms.insert(m, Rational::ONE);
        p
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::ZERO),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_empty())
                .map(|(_, c)| *c),
            _ => None,
        }
    }

    pub(crate) fn vars(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.keys().cloned())
            .collect()
    }

    fn insert_term(&mut self, m: Monomial, c: Rational) -> Result<()> {
        if c.is_zero() {
            return Ok(());
        }
        match self.terms.get(&m).copied() {
            Some(existing) => {
                let sum = existing.add(c)?;
                if sum.is_zero() {
                    self.terms.remove(&m);
                } else {
                    self.terms.insert(m, sum);
                }
            }
            None => {
                self.terms.insert(m, c);
            }
        }
        Ok(())
    }

    fn add(&self, other: &Poly) -> Result<Poly> {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.insert_term(m.clone(), *c)?;
        }
        Ok(out)
    }

    fn mul(&self, other: &Poly) -> Result<Poly> {
        let mut out = Poly::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                let mut m = ma.clone();
                for (var, exp) in mb {
                    let slot = m.entry(var.clone()).or_insert(0);
                    *slot = slot
                        .checked_add(*exp)
                        .ok_or(EngineError::NumericOverflow)?;
                }
                out.insert_term(m, ca.mul(*cb)?)?;
            }
        }
        Ok(out)
    }

    fn pow(&self, exp: u32) -> Result<Poly> {
        let mut out = Poly::constant(Rational::ONE);
        for _ in 0..exp {
            out = out.mul(self)?;
        }
        Ok(out)
    }

    pub(crate) fn from_expr(e: &Expr) -> Result<Poly> {
        match e {
            Expr::Num(r) => Ok(Poly::constant(*r)),
            Expr::Sym(s) => Ok(Poly::var(s)),
            Expr::Add(terms) => {
                let mut out = Poly::zero();
                for t in terms {
                    out = out.add(&Poly::from_expr(t)?)?;
                }
                Ok(out)
            }
            Expr::Mul(factors) => {
                let mut out = Poly::constant(Rational::ONE);
                for f in factors {
                    out = out.mul(&Poly::from_expr(f)?)?;
                }
                Ok(out)
            }
            Expr::Pow(base, exp) => {
                let n = Poly::from_expr(exp)?
                    .as_constant()
                    .and_then(|c| c.as_integer())
                    .ok_or_else(|| {
                        EngineError::Unsupported("non-integer exponent".into())
                    })?;
                let base_poly = Poly::from_expr(base)?;
                if n >= 0 {
                    let exp_u32 =
                        u32::try_from(n).map_err(|_| EngineError::NumericOverflow)?;
                    base_poly.pow(exp_u32)
                } else {
                    // negative exponents only over nonzero constants (division)
                    let c = base_poly.as_constant().ok_or_else(|| {
                        EngineError::Unsupported("division by a non-constant".into())
                    })?;
                    if c.is_zero() {
                        return Err(EngineError::DivisionByZero);
                    }
                    let exp_u32 =
                        u32::try_from(-n).map_err(|_| EngineError::NumericOverflow)?;
                    let inv = Rational::ONE.div(c)?;
                    Ok(Poly::constant(inv.pow_u32(exp_u32)?))
                }
            }
        }
    }

    /// Canonical expression rendering: terms by descending total degree,
    /// ties broken by monomial order.
    pub(crate) fn to_expr(&self) -> Expr {
        if self.terms.is_empty() {
            return Expr::num_int(0);
        }
        let mut entries: Vec<(&Monomial, &Rational)> = self.terms.iter().collect();
        entries.sort_by(|(ma, _), (mb, _)| {
            let da: u64 = ma.values().map(|e| *e as u64).sum();
            let db: u64 = mb.values().map(|e| *e as u64).sum();
            db.cmp(&da).then_with(|| ma.cmp(mb))
        });
        let terms: Vec<Expr> = entries
            .into_iter()
            .map(|(m, c)| {
                let mut factors: Vec<Expr> = Vec::new();
                if !c.is_one() || m.is_empty() {
                    factors.push(Expr::Num(*c));
                }
                for (var, exp) in m {
                    if *exp == 1 {
                        factors.push(Expr::sym(var));
                    } else {
                        factors.push(Expr::pow(Expr::sym(var), Expr::num_int(*exp as i128)));
                    }
                }
                Expr::mul(factors)
            })
            .collect();
        Expr::add(terms)
    }

    /// Coefficients `[c0, c1, ..., cn]` when the polynomial mentions no
    /// symbol other than `var`. Trailing zero coefficients are trimmed,
    /// so the returned length is `degree + 1` (empty for the zero poly).
    pub(crate) fn univariate_coeffs(&self, var: &str) -> Option<Vec<Rational>> {
        let mut coeffs: Vec<Rational> = Vec::new();
        for (m, c) in &self.terms {
            for name in m.keys() {
                if name != var {
                    return None;
                }
            }
            let deg = m.get(var).copied().unwrap_or(0) as usize;
            if coeffs.len() <= deg {
                coeffs.resize(deg + 1, Rational::ZERO);
            }
            coeffs[deg] = *c;
        }
        Some(coeffs)
    }

    /// Integer content and primitive part, when all coefficients are
    /// integers. `Ok(None)` when a coefficient is fractional.
    pub(crate) fn integer_content(&self) -> Result<Option<(Rational, Poly)>> {
        let mut g: i128 = 0;
        for c in self.terms.values() {
            match c.as_integer() {
                Some(n) => {
                    g = gcd_i128(g, n);
                }
                None => return Ok(None),
            }
        }
        if g <= 1 {
            return Ok(None);
        }
        let content = Rational::int(g);
        let mut primitive = Poly::zero();
        for (m, c) in &self.terms {
            primitive.insert_term(m.clone(), c.div(content)?)?;
        }
        Ok(Some((content, primitive)))
    }
}

fn gcd_i128(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn expansion_collects_terms() {
        let p = Poly::from_expr(&parse("(x+2)*(x+3)").unwrap()).unwrap();
        let q = Poly::from_expr(&parse("x**2+5*x+6").unwrap()).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn cancelling_terms_leave_zero() {
        let p = Poly::from_expr(&parse("x - x").unwrap()).unwrap();
        assert!(p.is_zero());
        assert_eq!(p.to_expr(), Expr::num_int(0));
    }

    #[test]
    fn constant_division_is_exact() {
        let p = Poly::from_expr(&parse("x/2").unwrap()).unwrap();
        let coeffs = p.univariate_coeffs("x").unwrap();
        assert_eq!(coeffs[1], Rational::new(1, 2).unwrap());
    }

    #[test]
    fn division_by_symbol_is_unsupported() {
        let err = Poly::from_expr(&parse("1/x").unwrap()).unwrap_err();
        assert!(matches!(err, EngineError::Unsupported(_)));
    }

    #[test]
    fn univariate_coeffs_reject_foreign_symbols() {
        let p = Poly::from_expr(&parse("x + y").unwrap()).unwrap();
        assert_eq!(p.univariate_coeffs("x"), None);
    }

    #[test]
    fn multivariate_expansion() {
        let p = Poly::from_expr(&parse("(x+y)**2").unwrap()).unwrap();
        let q = Poly::from_expr(&parse("x**2+2*x*y+y**2").unwrap()).unwrap();
        assert_eq!(p, q);
    }
}
