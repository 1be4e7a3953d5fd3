//! Numeric helpers for the binomial distribution.
//!
//! Binomial coefficients are held as exact big integers and only rounded to
//! the nearest `f64` when a probability is computed. A term is evaluated in
//! natural-log space only when the direct product cannot represent it: the
//! coefficient is too large for an `f64`, or `p^k` / `(1 - p)^(n - k)`
//! underflows to zero.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Coefficients at or below this many bits convert to `f64` directly when
/// taking their log.
const DIRECT_LN_BITS: u64 = 1000;

/// A binomial coefficient `C(n, k)`, held exactly.
///
/// # Examples
///
/// ```rust
/// use critodds::numeric::binomial_coefficient;
///
/// assert_eq!(binomial_coefficient(7, 3).to_f64(), 35.0);
/// assert_eq!(binomial_coefficient(7, 0).to_f64(), 1.0);
/// assert_eq!(binomial_coefficient(3, 4).to_f64(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinomialCoefficient(BigUint);

impl BinomialCoefficient {
    /// `C(n, 0)`.
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// Advance from `C(n, k - 1)` to `C(n, k)`.
    ///
    /// Uses `C(n, k) = C(n, k - 1) * (n - k + 1) / k`; the division is
    /// always exact. `k` must be in `1..=n`.
    pub fn step(mut self, n: u64, k: u64) -> Self {
        debug_assert!(k >= 1 && k <= n);
        self.0 *= n - k + 1;
        self.0 /= k;
        self
    }

    /// The exact value.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Nearest `f64`, or `inf` when the coefficient exceeds `f64::MAX`.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::INFINITY)
    }

    /// Natural log of the value, `-inf` for zero.
    pub fn ln(&self) -> f64 {
        if self.0.is_zero() {
            return f64::NEG_INFINITY;
        }
        let bits = self.0.bits();
        if bits <= DIRECT_LN_BITS {
            return self.to_f64().ln();
        }
        let shift = bits - DIRECT_LN_BITS;
        let top = (&self.0 >> shift).to_f64().unwrap_or(f64::INFINITY);
        top.ln() + shift as f64 * std::f64::consts::LN_2
    }

    /// `C(n, k) * p^k * (1 - p)^(n - k)`.
    ///
    /// `self` must be `C(n, k)`. The direct product is evaluated left to
    /// right; log space is the fallback when it overflows or underflows.
    pub fn pmf(&self, n: u64, k: u64, p: f64) -> f64 {
        let q = 1.0 - p;
        let direct = self.to_f64() * p.powf(k as f64) * q.powf((n - k) as f64);
        if direct.is_finite() && (direct != 0.0 || p == 0.0 || q == 0.0) {
            return direct;
        }
        (self.ln() + ln_pow(p, k) + ln_pow(q, n - k)).exp()
    }
}

/// `exponent * ln(base)`, with `x^0` treated as exactly `1`.
fn ln_pow(base: f64, exponent: u64) -> f64 {
    if exponent == 0 {
        0.0
    } else {
        exponent as f64 * base.ln()
    }
}

/// Compute `C(n, k)`. Zero when `k > n`.
pub fn binomial_coefficient(n: u64, k: u64) -> BinomialCoefficient {
    if k > n {
        return BinomialCoefficient(BigUint::zero());
    }
    let k = k.min(n - k);
    (1..=k).fold(BinomialCoefficient::one(), |c, i| c.step(n, i))
}

/// Binomial probability mass `P(X = k)` for `n` trials at success rate `p`.
///
/// # Examples
///
/// ```rust
/// use critodds::numeric::binomial_pmf;
///
/// assert_eq!(binomial_pmf(2, 1, 0.5), 0.5);
/// assert_eq!(binomial_pmf(3, 0, 0.0), 1.0);
/// ```
pub fn binomial_pmf(n: u64, k: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    binomial_coefficient(n, k).pmf(n, k, p)
}
