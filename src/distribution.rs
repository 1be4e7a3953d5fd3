//! Binomial distribution tables.
//!
//! `tabulate` produces one row per possible crit count `k = 0..=n`, holding
//! the exact probability `P(X = k)`, the right-tail probability `P(X ≥ k)`
//! and the "1 in X" odds for both.
//!
//! The cumulative column is "at least k", not "at most k". It is built by a
//! single backward pass from `k = n` down to `k = 0`.

use crate::error::CalcError;
use crate::numeric::BinomialCoefficient;
use crate::odds::Odds;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of a distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    /// Number of crits.
    pub k: u64,
    /// `P(X = k)`.
    pub exact: f64,
    /// `1 / P(X = k)`, or `Never` when that probability is zero.
    pub odds_exact: Odds,
    /// `P(X ≥ k)`.
    pub cumulative: f64,
    /// `1 / P(X ≥ k)`, or `Never` when that probability is zero.
    pub odds_cumulative: Odds,
}

/// Exact and right-tail probabilities for every `k` in `0..=n`.
///
/// Rows are ordered by ascending `k`. A table is built whole and never
/// mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use critodds::tabulate;
///
/// let table = tabulate(2, 0.5).unwrap();
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.rows()[1].exact, 0.5);
/// assert_eq!(table.rows()[0].cumulative, 1.0);
/// assert_eq!(table.rows()[2].cumulative, 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionTable {
    trials: u64,
    probability: f64,
    rows: Vec<DistributionRow>,
}

impl DistributionTable {
    /// Number of trials `n`.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Per-trial success probability `p`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// All rows, `k` ascending.
    pub fn rows(&self) -> &[DistributionRow] {
        &self.rows
    }

    /// The row for exactly `k` crits.
    pub fn row(&self, k: u64) -> Option<&DistributionRow> {
        usize::try_from(k).ok().and_then(|i| self.rows.get(i))
    }

    /// Number of rows (`n + 1`).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true for a table built by `tabulate`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DistributionRow> {
        self.rows.iter()
    }

    /// Sum of `P(X = k)` over all rows. Should be `1` up to rounding.
    pub fn total_probability(&self) -> f64 {
        self.rows.iter().map(|row| row.exact).sum()
    }
}

impl<'a> IntoIterator for &'a DistributionTable {
    type Item = &'a DistributionRow;
    type IntoIter = std::slice::Iter<'a, DistributionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Tabulate the binomial distribution for `n` trials at probability `p`.
///
/// # Errors
///
/// `Validation` if `p` is outside `[0, 1]` (or NaN), or if `n + 1` rows
/// cannot be allocated.
pub fn tabulate(n: u64, p: f64) -> Result<DistributionTable, CalcError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CalcError::validation(format!(
            "probability must be within [0, 1], got {}",
            p
        )));
    }
    let row_count = n
        .checked_add(1)
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| CalcError::validation(format!("cannot tabulate {} trials", n)))?;

    let mut exact: Vec<f64> = Vec::new();
    exact
        .try_reserve_exact(row_count)
        .map_err(|_| CalcError::validation(format!("cannot tabulate {} trials", n)))?;

    let mut coefficient = BinomialCoefficient::one();
    exact.push(coefficient.pmf(n, 0, p));
    for k in 1..=n {
        coefficient = coefficient.step(n, k);
        exact.push(coefficient.pmf(n, k, p));
    }

    // Right tail: cumulative[k] = exact[k] + cumulative[k + 1].
    let mut cumulative = vec![0.0; row_count];
    let mut running = 0.0;
    for (slot, mass) in cumulative.iter_mut().zip(&exact).rev() {
        running += mass;
        *slot = running;
    }

    let rows = exact
        .into_iter()
        .zip(cumulative)
        .zip(0u64..)
        .map(|((exact, cumulative), k)| DistributionRow {
            k,
            exact,
            odds_exact: Odds::from_probability(exact),
            cumulative,
            odds_cumulative: Odds::from_probability(cumulative),
        })
        .collect::<Vec<_>>();

    let impossible = rows.iter().filter(|row| !row.odds_exact.has_odds()).count();
    debug!(n, p, rows = rows.len(), impossible, "tabulated distribution");
    Ok(DistributionTable {
        trials: n,
        probability: p,
        rows,
    })
}
