//! "1 in X" odds.
//!
//! An `Odds` value is the reciprocal of a probability. A zero probability has
//! no finite odds and is represented by `Odds::Never` instead of dividing by
//! zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker shown for odds that are not finite.
pub const INFINITY_MARKER: &str = "∞";

/// Reciprocal of a probability.
///
/// Serializes as a plain number, or `null` for `Never`.
///
/// # Examples
///
/// ```rust
/// use critodds::Odds;
///
/// assert_eq!(Odds::from_probability(0.25), Odds::OneIn(4.0));
/// assert_eq!(Odds::from_probability(0.0), Odds::Never);
/// assert_eq!(Odds::from_probability(0.25).to_string(), "4.00");
/// assert_eq!(Odds::Never.to_string(), "∞");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Odds {
    /// On average one hit per this many attempts.
    OneIn(f64),
    /// The event has zero probability.
    Never,
}

impl Odds {
    /// Odds for a probability: `1/v` when `v > 0`, otherwise `Never`.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.0 {
            Odds::OneIn(1.0 / probability)
        } else {
            Odds::Never
        }
    }

    /// The finite reciprocal, if there is one.
    pub fn value(self) -> Option<f64> {
        match self {
            Odds::OneIn(x) => Some(x),
            Odds::Never => None,
        }
    }

    /// True unless the event can never happen.
    ///
    /// A positive subnormal probability still has odds, even though its
    /// reciprocal overflows to `inf`.
    pub fn has_odds(self) -> bool {
        matches!(self, Odds::OneIn(_))
    }
}

impl From<Option<f64>> for Odds {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Odds::Never, Odds::OneIn)
    }
}

impl From<Odds> for Option<f64> {
    fn from(odds: Odds) -> Self {
        odds.value()
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Odds::OneIn(x) => write!(f, "{:.2}", x),
            Odds::Never => f.write_str(INFINITY_MARKER),
        }
    }
}
