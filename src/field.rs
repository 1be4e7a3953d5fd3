//! Form field identifiers.
//!
//! Provides the `Field` type, which names each of the seven inputs of the
//! calculator form and knows how a blank entry for it is treated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a blank entry for a field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankPolicy {
    /// Blank is rejected with a required-field error.
    Reject,
    /// Blank silently reads as `0.0`.
    Zero,
}

/// One input of the calculator form.
///
/// Fields are listed in form order, which is also the order in which they
/// are parsed.
///
/// # Examples
///
/// ```rust
/// use critodds::Field;
///
/// assert_eq!(Field::CritBase.key(), "BC");
/// assert_eq!(Field::CritBase.label(), "Crit Base");
/// assert_eq!(Field::ALL.len(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    /// `n`: number of trials.
    Trials,
    /// `BC`: base crit value.
    CritBase,
    /// `BCR`: base crit-resist value.
    CritResBase,
    /// `X`: crit from equipment.
    Equipment,
    /// `Y`: crit from skill.
    Skill,
    /// `CP`: crit buff percent.
    BuffPercent,
    /// `DCRP`: crit debuff percent.
    DebuffPercent,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 7] = [
        Field::Trials,
        Field::CritBase,
        Field::CritResBase,
        Field::Equipment,
        Field::Skill,
        Field::BuffPercent,
        Field::DebuffPercent,
    ];

    /// Short symbolic key used in formulas.
    pub fn key(self) -> &'static str {
        match self {
            Field::Trials => "n",
            Field::CritBase => "BC",
            Field::CritResBase => "BCR",
            Field::Equipment => "X",
            Field::Skill => "Y",
            Field::BuffPercent => "CP",
            Field::DebuffPercent => "DCRP",
        }
    }

    /// Label shown next to the field on the form.
    pub fn label(self) -> &'static str {
        match self {
            Field::Trials => "n (trials)",
            Field::CritBase => "Crit Base",
            Field::CritResBase => "CritRes Base",
            Field::Equipment => "Crit from equipment",
            Field::Skill => "Crit from skill",
            Field::BuffPercent => "Crit Buff (%)",
            Field::DebuffPercent => "Crit Debuff (%)",
        }
    }

    /// Blank handling for this field.
    ///
    /// Only the trial count rejects blanks outright. `BC` and `BCR` read
    /// blank as `0.0`, which the zero-check then rejects.
    pub fn blank_policy(self) -> BlankPolicy {
        match self {
            Field::Trials => BlankPolicy::Reject,
            _ => BlankPolicy::Zero,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_order() {
        let keys: Vec<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["n", "BC", "BCR", "X", "Y", "CP", "DCRP"]);
    }

    #[test]
    fn test_blank_policy() {
        assert_eq!(Field::Trials.blank_policy(), BlankPolicy::Reject);
        assert_eq!(Field::CritBase.blank_policy(), BlankPolicy::Zero);
        assert_eq!(Field::DebuffPercent.blank_policy(), BlankPolicy::Zero);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Field::BuffPercent.to_string(), "Crit Buff (%)");
    }
}
