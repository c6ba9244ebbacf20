//! Expression tree.
//!
//! Flat n-ary sums and products; unary minus is represented as
//! multiplication by `-1`, division as a power with exponent `-1`.
//! `Display` renders the canonical text the cascade's last-resort
//! string comparison relies on, so the format is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::Rational;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Num(Rational),
    Sym(String),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn num_int(n: i128) -> Expr {
        Expr::Num(Rational::int(n))
    }

    pub fn sym(name: &str) -> Expr {
        Expr::Sym(name.to_string())
    }

    /// N-ary sum; flattens nested sums and collapses trivial cases.
    pub fn add(terms: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(terms.len());
        for t in terms {
            match t {
                Expr::Add(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Expr::num_int(0),
            1 => flat.into_iter().next().unwrap_or(Expr::num_int(0)),
            _ => Expr::Add(flat),
        }
    }

    /// N-ary product; flattens nested products.
    pub fn mul(factors: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(factors.len());
        for f in factors {
            match f {
                Expr::Mul(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Expr::num_int(1),
            1 => flat.into_iter().next().unwrap_or(Expr::num_int(1)),
            _ => Expr::Mul(flat),
        }
    }

    pub fn pow(base: Expr, exp: Expr) -> Expr {
        Expr::Pow(Box::new(base), Box::new(exp))
    }

    pub fn neg(e: Expr) -> Expr {
        Expr::mul(vec![Expr::num_int(-1), e])
    }

    pub fn sub(a: Expr, b: Expr) -> Expr {
        Expr::add(vec![a, Expr::neg(b)])
    }

    /// Free symbols, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Num(_) => {}
            Expr::Sym(s) => {
                out.insert(s.clone());
            }
            Expr::Add(ts) | Expr::Mul(ts) => {
                for t in ts {
                    t.collect_symbols(out);
                }
            }
            Expr::Pow(b, e) => {
                b.collect_symbols(out);
                e.collect_symbols(out);
            }
        }
    }

    /// Split a term into (true, |term|) when it renders with a leading
    /// minus sign; used by the sum printer.
    fn sign_split(&self) -> (bool, Expr) {
        match self {
            Expr::Num(r) if r.is_negative() => (true, Expr::Num(r.abs())),
            Expr::Mul(fs) => match fs.first() {
                Some(Expr::Num(r)) if r.is_negative() => {
                    let mut rest: Vec<Expr> = fs[1..].to_vec();
                    let abs = r.abs();
                    if !abs.is_one() {
                        rest.insert(0, Expr::Num(abs));
                    }
                    (true, Expr::mul(rest))
                }
                _ => (false, self.clone()),
            },
            _ => (false, self.clone()),
        }
    }
}

fn write_factor(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    match e {
        Expr::Add(_) => write!(f, "({e})"),
        Expr::Num(r) if r.is_negative() || !r.is_integer() => write!(f, "({r})"),
        _ => write!(f, "{e}"),
    }
}

fn write_pow_operand(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    match e {
        Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) => write!(f, "({e})"),
        Expr::Num(r) if r.is_negative() || !r.is_integer() => write!(f, "({r})"),
        _ => write!(f, "{e}"),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(r) => write!(f, "{r}"),
            Expr::Sym(s) => write!(f, "{s}"),
            Expr::Add(terms) => {
                for (i, t) in terms.iter().enumerate() {
                    let (negative, body) = t.sign_split();
                    if i == 0 {
                        if negative {
                            write!(f, "-")?;
                        }
                    } else if negative {
                        write!(f, " - ")?;
                    } else {
                        write!(f, " + ")?;
                    }
                    write!(f, "{body}")?;
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                // `-1 * rest` prints as a leading minus
                let mut rest = factors.as_slice();
                match factors.first() {
                    Some(Expr::Num(r)) if r.is_negative() && factors.len() > 1 => {
                        write!(f, "-")?;
                        let abs = r.abs();
                        if !abs.is_one() {
                            write!(f, "{abs}*")?;
                        }
                        rest = &factors[1..];
                    }
                    _ => {}
                }
                for (i, x) in rest.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write_factor(f, x)?;
                }
                Ok(())
            }
            Expr::Pow(base, exp) => {
                write_pow_operand(f, base)?;
                write!(f, "**")?;
                write_pow_operand(f, exp)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_sum_with_signs() {
        let e = Expr::add(vec![
            Expr::pow(Expr::sym("x"), Expr::num_int(2)),
            Expr::mul(vec![Expr::num_int(-5), Expr::sym("x")]),
            Expr::num_int(6),
        ]);
        assert_eq!(e.to_string(), "x**2 - 5*x + 6");
    }

    #[test]
    fn display_product_parenthesizes_sums() {
        let e = Expr::mul(vec![
            Expr::add(vec![Expr::sym("x"), Expr::num_int(2)]),
            Expr::add(vec![Expr::sym("x"), Expr::num_int(3)]),
        ]);
        assert_eq!(e.to_string(), "(x + 2)*(x + 3)");
    }

    #[test]
    fn flattening_collapses_trivial_nodes() {
        assert_eq!(Expr::add(vec![]), Expr::num_int(0));
        assert_eq!(Expr::mul(vec![Expr::sym("x")]), Expr::sym("x"));
        let nested = Expr::add(vec![
            Expr::add(vec![Expr::sym("x"), Expr::num_int(1)]),
            Expr::num_int(2),
        ]);
        assert_eq!(
            nested,
            Expr::Add(vec![Expr::sym("x"), Expr::num_int(1), Expr::num_int(2)])
        );
    }
}
