//! Exact rational coefficients.
//!
//! Invariant: `den > 0`, `gcd(num, den) == 1`. Storage is i128 with
//! checked arithmetic; overflow surfaces as `EngineError::NumericOverflow`
//! instead of a silently wrong coefficient.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::{EngineError, Result};

/// Greatest common divisor (Euclid).
fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Integer square root, or `None` when `n` is not a perfect square.
fn isqrt_exact(n: i128) -> Option<i128> {
    if n < 0 {
        return None;
    }
    if n < 2 {
        return Some(n);
    }
    let mut x = (n as f64).sqrt() as i128;
    // ajustar alrededor de la estimación en punto flotante; un cuadrado
    // que desborda i128 cuenta como "mayor que n"
    while x > 1 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    match x.checked_mul(x) {
        Some(sq) if sq == n => Some(x),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    num: i128,
    den: i128,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    pub fn int(n: i128) -> Self {
        Rational { num: n, den: 1 }
    }

    pub fn new(num: i128, den: i128) -> Result<Self> {
        if den == 0 {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    /// Normaliza signo y reduce por el gcd. `den` debe ser != 0.
    fn reduced(num: i128, den: i128) -> Self {
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num, den);
        if g == 0 {
            return Rational::ZERO;
        }
        Rational {
            num: num / g,
            den: den / g,
        }
    }

    pub fn num(&self) -> i128 {
        self.num
    }

    pub fn den(&self) -> i128 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_one(&self) -> bool {
        self.num == 1 && self.den == 1
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn as_integer(&self) -> Option<i128> {
        if self.den == 1 {
            Some(self.num)
        } else {
            None
        }
    }

    pub fn add(self, rhs: Rational) -> Result<Rational> {
        // n1/d1 + n2/d2 = (n1*d2 + n2*d1) / (d1*d2)
        let nd1 = self.num.checked_mul(rhs.den).ok_or(EngineError::NumericOverflow)?;
        let nd2 = rhs.num.checked_mul(self.den).ok_or(EngineError::NumericOverflow)?;
        let den = self.den.checked_mul(rhs.den).ok_or(EngineError::NumericOverflow)?;
        let num = nd1.checked_add(nd2).ok_or(EngineError::NumericOverflow)?;
        Ok(Self::reduced(num, den))
    }

    pub fn sub(self, rhs: Rational) -> Result<Rational> {
        self.add(rhs.neg()?)
    }

    pub fn mul(self, rhs: Rational) -> Result<Rational> {
        // reducción cruzada antes de multiplicar para minimizar overflow
        let g1 = gcd(self.num, rhs.den).max(1);
        let g2 = gcd(rhs.num, self.den).max(1);
        let n1 = self.num / g1;
        let d2 = rhs.den / g1;
        let n2 = rhs.num / g2;
        let d1 = self.den / g2;
        let num = n1.checked_mul(n2).ok_or(EngineError::NumericOverflow)?;
        let den = d1.checked_mul(d2).ok_or(EngineError::NumericOverflow)?;
        Ok(Self::reduced(num, den))
    }

    pub fn div(self, rhs: Rational) -> Result<Rational> {
        if rhs.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        self.mul(Rational::reduced(rhs.den, rhs.num))
    }

    pub fn neg(self) -> Result<Rational> {
        let num = self.num.checked_neg().ok_or(EngineError::NumericOverflow)?;
        Ok(Rational { num, den: self.den })
    }

    pub fn abs(self) -> Rational {
        Rational {
            num: self.num.abs(),
            den: self.den,
        }
    }

    pub fn pow_u32(self, exp: u32) -> Result<Rational> {
        let num = self.num.checked_pow(exp).ok_or(EngineError::NumericOverflow)?;
        let den = self.den.checked_pow(exp).ok_or(EngineError::NumericOverflow)?;
        Ok(Rational { num, den })
    }

    /// Exact square root when both numerator and denominator are
    /// perfect squares; `None` otherwise (incl. negatives).
    pub fn sqrt_exact(&self) -> Option<Rational> {
        let num = isqrt_exact(self.num)?;
        let den = isqrt_exact(self.den)?;
        Some(Rational { num, den })
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ZERO
    }
}

impl From<i128> for Rational {
    fn from(n: i128) -> Self {
        Rational::int(n)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // cross-multiply when it fits; fall back to f64 for the rest
        match (
            self.num.checked_mul(other.den),
            other.num.checked_mul(self.den),
        ) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => {
                let a = self.num as f64 / self.den as f64;
                let b = other.num as f64 / other.den as f64;
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
