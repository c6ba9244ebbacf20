//! Recursive-descent parser for canonical algebraic text.
//!
//! Grammar (whitespace insensitive):
//!   expr   := term (('+' | '-') term)*
//!   term   := unary (('*' | '/')? unary)*      -- implicit product by adjacency
//!   unary  := '-'* power
//!   power  := atom (('**' | '^') unary)?       -- right associative
//!   atom   := number | symbol | '(' expr ')'

use crate::{EngineError, Expr, Rational, Result};

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(Rational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn lex(text: &str) -> Result<Vec<Tok>> {
    let chars: Vec<char> = text.chars().collect();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '+' => {
                toks.push(Tok::Plus);
                i += 1;
            }
            '-' => {
                toks.push(Tok::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    toks.push(Tok::Caret);
                    i += 2;
                } else {
                    toks.push(Tok::Star);
                    i += 1;
                }
            }
            '/' => {
                toks.push(Tok::Slash);
                i += 1;
            }
            '^' => {
                toks.push(Tok::Caret);
                i += 1;
            }
            '(' => {
                toks.push(Tok::LParen);
                i += 1;
            }
            ')' => {
                toks.push(Tok::RParen);
                i += 1;
            }
            _ if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let mut frac_digits = 0u32;
                if i < chars.len() && chars[i] == '.' {
                    i += 1;
                    let frac_start = i;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    frac_digits = (i - frac_start) as u32;
                }
                let raw: String = chars[start..i].iter().filter(|c| **c != '.').collect();
                let digits: i128 = raw
                    .parse()
                    .map_err(|_| EngineError::Parse(format!("number out of range: {raw}")))?;
                let den = 10i128
                    .checked_pow(frac_digits)
                    .ok_or(EngineError::NumericOverflow)?;
                toks.push(Tok::Num(Rational::new(digits, den)?));
            }
            _ if c.is_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                toks.push(Tok::Ident(chars[start..i].iter().collect()));
            }
            _ => {
                return Err(EngineError::Parse(format!("unexpected character '{c}'")));
            }
        }
    }
    Ok(toks)
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn bump(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, want: Tok) -> Result<()> {
        match self.bump() {
            Some(t) if t == want => Ok(()),
            other => Err(EngineError::Parse(format!(
                "expected {want:?}, found {other:?}"
            ))),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut terms = vec![self.parse_term()?];
        loop {
            match self.peek() {
                Some(Tok::Plus) => {
                    self.pos += 1;
                    terms.push(self.parse_term()?);
                }
                Some(Tok::Minus) => {
                    self.pos += 1;
                    let t = self.parse_term()?;
                    terms.push(Expr::neg(t));
                }
                _ => break,
            }
        }
        Ok(Expr::add(terms))
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut factors = vec![self.parse_unary()?];
        loop {
            match self.peek() {
                Some(Tok::Star) => {
                    self.pos += 1;
                    factors.push(self.parse_unary()?);
                }
                Some(Tok::Slash) => {
                    self.pos += 1;
                    let divisor = self.parse_unary()?;
                    factors.push(Expr::pow(divisor, Expr::num_int(-1)));
                }
                // adjacency: `5x`, `2(x+1)`, `(x+1)(x+2)`
                Some(Tok::Num(_)) | Some(Tok::Ident(_)) | Some(Tok::LParen) => {
                    factors.push(self.parse_unary()?);
                }
                _ => break,
            }
        }
        Ok(Expr::mul(factors))
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let mut negate = false;
        while matches!(self.peek(), Some(Tok::Minus) | Some(Tok::Plus)) {
            if let Some(Tok::Minus) = self.peek() {
                negate = !negate;
            }
            self.pos += 1;
        }
        let p = self.parse_power()?;
        Ok(if negate { Expr::neg(p) } else { p })
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if let Some(Tok::Caret) = self.peek() {
            self.pos += 1;
            let exp = self.parse_unary()?;
            return Ok(Expr::pow(base, exp));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        match self.bump() {
            Some(Tok::Num(r)) => Ok(Expr::Num(r)),
            Some(Tok::Ident(name)) => Ok(Expr::Sym(name)),
            Some(Tok::LParen) => {
                let inner = self.parse_expr()?;
                self.expect(Tok::RParen)?;
                Ok(inner)
            }
            other => Err(EngineError::Parse(format!(
                "expected an operand, found {other:?}"
            ))),
        }
    }
}

pub fn parse(text: &str) -> Result<Expr> {
    if text.trim().is_empty() {
        return Err(EngineError::Parse("empty expression".into()));
    }
    let toks = lex(text)?;
    let mut p = Parser { toks, pos: 0 };
    let e = p.parse_expr()?;
    if p.pos != p.toks.len() {
        return Err(EngineError::Parse(format!(
            "trailing input after position {}",
            p.pos
        )));
    }
    Ok(e)
}
