//! Error types for crit odds calculation.
//!
//! Every failure of the parse → validate → resolve → tabulate pipeline is
//! represented by the `CalcError` enum. All of them are terminal for the
//! current calculation.

use crate::field::Field;
use thiserror::Error;

/// Errors that can occur while calculating crit odds.
///
/// # Examples
///
/// ```rust
/// use critodds::{CalcError, Field};
///
/// let err = CalcError::RequiredField { field: Field::Trials };
/// assert_eq!(err.to_string(), "n (trials): required field cannot be blank");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// A non-blank field did not hold a number.
    #[error("{field}: could not convert '{value}' to a number")]
    Parse { field: Field, value: String },

    /// A required field was left blank.
    #[error("{field}: required field cannot be blank")]
    RequiredField { field: Field },

    /// `BC` or `BCR` was zero (or blank, which reads as zero).
    #[error("Crit Base and CritRes Base must not be 0 ({field} is 0)")]
    ZeroConstraint { field: Field },

    /// The resolver denominator `FC + K` collapsed to zero.
    #[error("Final Crit + constant must not be zero")]
    Division,

    /// The resolved crit chance is not a valid probability.
    ///
    /// Carries the offending value, which may be NaN.
    #[error("Crit Chance out of range: {value}")]
    Range { value: f64 },

    /// Tabulator input was rejected (bad trial count or probability).
    #[error("{reason}")]
    Validation { reason: String },
}

impl CalcError {
    /// Build a `Validation` error from any displayable reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        CalcError::Validation {
            reason: reason.into(),
        }
    }

    /// The form field this error points at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            CalcError::Parse { field, .. }
            | CalcError::RequiredField { field }
            | CalcError::ZeroConstraint { field } => Some(*field),
            CalcError::Division | CalcError::Range { .. } | CalcError::Validation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = CalcError::Parse {
            field: Field::Equipment,
            value: "ten".into(),
        };
        let display = err.to_string();
        assert!(display.contains("Crit from equipment"));
        assert!(display.contains("'ten'"));
    }

    #[test]
    fn test_range_error_carries_value() {
        let err = CalcError::Range { value: 1.3 };
        assert_eq!(err.to_string(), "Crit Chance out of range: 1.3");
    }

    #[test]
    fn test_zero_constraint_names_field() {
        let err = CalcError::ZeroConstraint {
            field: Field::CritResBase,
        };
        assert!(err.to_string().contains("CritRes Base is 0"));
        assert_eq!(err.field(), Some(Field::CritResBase));
    }

    #[test]
    fn test_division_has_no_field() {
        assert_eq!(CalcError::Division.field(), None);
    }
}
