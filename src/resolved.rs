//! Resolved crit chance module.
//!
//! Contains the `ResolvedCrit` type, which holds the crit probability along
//! with every intermediate value of the formula that produced it.

use serde::{Deserialize, Serialize};

/// A resolved crit chance with full formula breakdown.
///
/// Read-only and copyable. `chance` is always within `[0, 1]` when the
/// value came out of the resolver.
///
/// # Examples
///
/// ```rust
/// use critodds::ResolvedCrit;
///
/// let resolved = ResolvedCrit::new(100.0, 50.0, 0.25);
/// assert_eq!(resolved.final_crit, 50.0);
/// assert_eq!(resolved.chance, 0.25);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolvedCrit {
    /// `C`: crit after equipment, buff and skill.
    pub total_crit: f64,

    /// `CR`: crit resist after debuff.
    pub crit_resist: f64,

    /// `FC = C - CR`: net crit fed into the diminishing-returns curve.
    pub final_crit: f64,

    /// `CC`: the crit probability `p`.
    pub chance: f64,
}

impl ResolvedCrit {
    /// Build a breakdown from `C`, `CR` and the final chance.
    ///
    /// `final_crit` is derived as `total_crit - crit_resist`.
    pub fn new(total_crit: f64, crit_resist: f64, chance: f64) -> Self {
        Self {
            total_crit,
            crit_resist,
            final_crit: total_crit - crit_resist,
            chance,
        }
    }

    /// Breakdown lines as `(description, value)` pairs, in formula order.
    pub fn breakdown(&self) -> [(&'static str, f64); 4] {
        [
            ("Crit (C)", self.total_crit),
            ("Crit Resist (CR)", self.crit_resist),
            ("Final Crit (FC)", self.final_crit),
            ("Crit Chance (p)", self.chance),
        ]
    }
}
