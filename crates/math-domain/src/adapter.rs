//! Expression adapter: canonical text to engine values.
//!
//! Bridges normalized step text and the algebra engine, plus the
//! structural extractors the validators pattern-match with.

use math_engine::{Expr, Rational};

use crate::error::AdapterError;
use crate::normalize::OR_TOKEN;

/// An equation `lhs = rhs` over engine expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    /// `lhs - rhs`, the form the solver and the cascade work on.
    pub fn residual(&self) -> Expr {
        Expr::sub(self.lhs.clone(), self.rhs.clone())
    }

    pub fn rhs_is_zero(&self) -> bool {
        math_engine::is_zero(&self.rhs) == Some(true)
    }
}

/// What a piece of canonical text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedForm {
    Equation(Equation),
    Expression(Expr),
    Disjunction(Vec<Equation>),
}

/// Parse canonical text into its structural form.
///
/// Disjunctions are detected first (each branch must be an equation),
/// then equations by a single `=`, then bare expressions.
pub fn parse_form(text: &str) -> Result<ParsedForm, AdapterError> {
    if text.contains(OR_TOKEN) {
        let branches = split_disjunction(text)?;
        return Ok(ParsedForm::Disjunction(branches));
    }
    match text.matches('=').count() {
        0 => Ok(ParsedForm::Expression(math_engine::parse(text)?)),
        1 => Ok(ParsedForm::Equation(parse_equation(text)?)),
        _ => Err(AdapterError::MultipleEquals),
    }
}

/// Split text on `=` into exactly two sides.
pub fn extract_equation_sides(text: &str) -> Result<(&str, &str), AdapterError> {
    let parts: Vec<&str> = text.split('=').collect();
    match parts.len() {
        0 | 1 => Err(AdapterError::MissingEquals),
        2 => Ok((parts[0], parts[1])),
        _ => Err(AdapterError::MultipleEquals),
    }
}

/// Parse a single-`=` relation into an `Equation`.
pub fn parse_equation(text: &str) -> Result<Equation, AdapterError> {
    let (lhs, rhs) = extract_equation_sides(text)?;
    Ok(Equation {
        lhs: math_engine::parse(lhs)?,
        rhs: math_engine::parse(rhs)?,
    })
}

/// Split a disjunction into its branch equations. Needs at least two
/// non-empty branches, each a well-formed equation.
pub fn split_disjunction(text: &str) -> Result<Vec<Equation>, AdapterError> {
    let branches: Vec<&str> = text
        .split(OR_TOKEN)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if branches.len() < 2 {
        return Err(AdapterError::DegenerateDisjunction);
    }
    branches.iter().map(|b| parse_equation(b)).collect()
}

/// Extract the two parenthesized factors from a `(..)(..)=0` equation.
///
/// The right-hand side must be literally `0`; the left-hand side must
/// consist of exactly two balanced parenthesized groups, optionally
/// joined by `*`.
pub fn extract_factors(text: &str) -> Result<[Expr; 2], AdapterError> {
    let (lhs, rhs) = extract_equation_sides(text)?;
    if rhs.trim() != "0" {
        return Err(AdapterError::FactorShape);
    }
    let groups = paren_groups(lhs.trim()).ok_or(AdapterError::FactorShape)?;
    let [a, b] = groups;
    Ok([math_engine::parse(a)?, math_engine::parse(b)?])
}

/// Whether the text matches "product of two parenthesized factors
/// equals zero". Pure structural test, never fails.
pub fn is_two_factor_zero(text: &str) -> bool {
    extract_factors(text).is_ok()
}

/// Whether the text is a "variable = constant value" equation.
pub fn is_var_equals_value(text: &str) -> bool {
    match parse_equation(text) {
        Ok(eq) => {
            matches!(eq.lhs, Expr::Sym(_))
                && math_engine::expand(&eq.rhs)
                    .map(|e| matches!(e, Expr::Num(_)))
                    .unwrap_or(false)
        }
        Err(_) => false,
    }
}

/// The constant value of a "variable = value" right-hand side.
pub fn constant_value(e: &Expr) -> Option<Rational> {
    match math_engine::expand(e) {
        Ok(Expr::Num(r)) => Some(r),
        _ => None,
    }
}

/// Scan for exactly two top-level balanced `(..)` groups covering the
/// whole string, with an optional `*` between them.
fn paren_groups(lhs: &str) -> Option<[&str; 2]> {
    let bytes = lhs.as_bytes();
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                let start = i;
                let mut depth = 1usize;
                i += 1;
                while i < bytes.len() && depth > 0 {
                    match bytes[i] {
                        b'(' => depth += 1,
                        b')' => depth -= 1,
                        _ => {}
                    }
                    i += 1;
                }
                if depth != 0 {
                    return None;
                }
                groups.push((start + 1, i - 1));
            }
            b'*' => i += 1,
            _ => return None, // anything outside the groups breaks the shape
        }
        if groups.len() > 2 {
            return None;
        }
    }
    if groups.len() == 2 {
        let (s1, e1) = groups[0];
        let (s2, e2) = groups[1];
        Some([&lhs[s1..e1], &lhs[s2..e2]])
    } else {
        None
    }
}
