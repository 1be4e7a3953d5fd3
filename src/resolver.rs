//! Crit chance resolver module.
//!
//! Turns the six crit modifiers into a single crit probability using a
//! diminishing-returns curve:
//!
//! ```text
//! C  = (BC + X) * (1 + CP/100) + Y
//! CR = BCR * (1 - DCRP/100)
//! FC = C - CR
//! CC = FC / (FC + K)
//! ```
//!
//! `K` shapes how quickly `CC` saturates: stacking crit approaches but never
//! reaches `1.0`. The result is never clamped; anything outside `[0, 1]` is
//! an error.

use crate::error::CalcError;
use crate::modifiers::ModifierInputs;
use crate::resolved::ResolvedCrit;
use tracing::debug;

/// Diminishing-returns constant `K`.
pub const CRIT_CONSTANT: f64 = 666.6666666666667;

/// Resolve the crit chance for a set of validated inputs.
///
/// # Errors
///
/// * `Division` if `FC + K == 0`.
/// * `Range` if the resolved chance is outside `[0, 1]` or NaN.
///
/// # Examples
///
/// ```rust
/// use critodds::{resolve, ModifierInputs, CRIT_CONSTANT};
///
/// let resolved = resolve(&ModifierInputs::new(7, 100.0, 50.0)).unwrap();
/// assert_eq!(resolved.total_crit, 100.0);
/// assert_eq!(resolved.crit_resist, 50.0);
/// assert_eq!(resolved.chance, 50.0 / (50.0 + CRIT_CONSTANT));
/// ```
pub fn resolve(inputs: &ModifierInputs) -> Result<ResolvedCrit, CalcError> {
    let total_crit =
        (inputs.crit_base + inputs.equipment) * (1.0 + inputs.buff_percent / 100.0) + inputs.skill;
    let crit_resist = inputs.crit_res_base * (1.0 - inputs.debuff_percent / 100.0);
    let final_crit = total_crit - crit_resist;

    let denominator = final_crit + CRIT_CONSTANT;
    if denominator == 0.0 {
        debug!(final_crit, "crit denominator collapsed");
        return Err(CalcError::Division);
    }

    let chance = final_crit / denominator;
    // NaN fails `contains` as well.
    if !(0.0..=1.0).contains(&chance) {
        debug!(final_crit, chance, "crit chance out of range");
        return Err(CalcError::Range { value: chance });
    }

    debug!(total_crit, crit_resist, final_crit, chance, "resolved crit chance");
    Ok(ResolvedCrit {
        total_crit,
        crit_resist,
        final_crit,
        chance,
    })
}

/// Resolve the crit chance from the six raw modifiers.
///
/// Pure function of its inputs. Does not check `BC`/`BCR` against zero; that
/// is the job of input validation.
pub fn resolve_crit_chance(
    crit_base: f64,
    crit_res_base: f64,
    equipment: f64,
    skill: f64,
    buff_percent: f64,
    debuff_percent: f64,
) -> Result<f64, CalcError> {
    let inputs = ModifierInputs {
        trials: 0,
        crit_base,
        crit_res_base,
        equipment,
        skill,
        buff_percent,
        debuff_percent,
    };
    resolve(&inputs).map(|resolved| resolved.chance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_only() {
        let p = resolve_crit_chance(100.0, 50.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(p, 50.0 / (50.0 + CRIT_CONSTANT));
        assert!((p - 0.06976744186046512).abs() < 1e-15);
    }

    #[test]
    fn test_modifiers_applied_in_formula_order() {
        // C = (100 + 20) * 1.5 + 10 = 190, CR = 80 * 0.75 = 60, FC = 130
        let inputs = ModifierInputs::new(1, 100.0, 80.0)
            .with_equipment(20.0)
            .with_skill(10.0)
            .with_buff_percent(50.0)
            .with_debuff_percent(25.0);
        let resolved = resolve(&inputs).unwrap();
        assert_eq!(resolved.total_crit, 190.0);
        assert_eq!(resolved.crit_resist, 60.0);
        assert_eq!(resolved.final_crit, 130.0);
        assert_eq!(resolved.chance, 130.0 / (130.0 + CRIT_CONSTANT));
    }

    #[test]
    fn test_equal_crit_and_resist_is_zero_chance() {
        let p = resolve_crit_chance(50.0, 50.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_denominator_zero_is_division_error() {
        // C = 1 - 1 = 0, CR = K, FC = -K
        let err = resolve_crit_chance(1.0, CRIT_CONSTANT, 0.0, -1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, CalcError::Division);
    }

    #[test]
    fn test_negative_chance_is_range_error() {
        let err = resolve_crit_chance(10.0, 50.0, 0.0, 0.0, 0.0, 0.0).unwrap_err();
        match err {
            CalcError::Range { value } => assert!(value < 0.0),
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn test_extreme_negative_buff_exceeds_one() {
        // C = 100 * (1 - 30) = -2900, FC = -2950, CC ~ 1.29
        let err = resolve_crit_chance(100.0, 50.0, 0.0, 0.0, -3000.0, 0.0).unwrap_err();
        match err {
            CalcError::Range { value } => assert!(value > 1.0 && value < 1.35),
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_input_is_range_error() {
        let err = resolve_crit_chance(f64::NAN, 50.0, 0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::Range { value } if value.is_nan()));
    }

    #[test]
    fn test_large_crit_saturates_below_one() {
        let p = resolve_crit_chance(1.0e9, 1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert!(p < 1.0);
        assert!(p > 0.999);
    }
}
