//! Modifier inputs module.
//!
//! Converts the raw text of the calculator form (`ModifierForm`) into typed
//! `ModifierInputs`. Parsing is strict about order: the trial count, `BC` and
//! `BCR` are parsed first, then the `BC`/`BCR` zero-check runs, and only then
//! are the four modifiers parsed. The resolver's own checks only run on
//! inputs that got through all of it.

use crate::error::CalcError;
use crate::field::{BlankPolicy, Field};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Raw, unparsed text of every form field.
///
/// A fresh form has the trial count pre-filled with `"7"` and every other
/// field blank.
///
/// # Examples
///
/// ```rust
/// use critodds::{Field, ModifierForm};
///
/// let form = ModifierForm::new()
///     .with(Field::CritBase, "100")
///     .with(Field::CritResBase, "50");
///
/// let inputs = form.parse().unwrap();
/// assert_eq!(inputs.trials, 7);
/// assert_eq!(inputs.crit_base, 100.0);
/// assert_eq!(inputs.equipment, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierForm {
    values: [String; 7],
}

/// Default text for the trial count field.
pub const DEFAULT_TRIALS: &str = "7";

impl ModifierForm {
    /// Create a form with the default trial count and all other fields blank.
    pub fn new() -> Self {
        let mut values: [String; 7] = Default::default();
        values[Self::slot(Field::Trials)] = DEFAULT_TRIALS.to_string();
        Self { values }
    }

    /// Create a form with every field blank, including the trial count.
    pub fn blank() -> Self {
        Self {
            values: Default::default(),
        }
    }

    fn slot(field: Field) -> usize {
        // Discriminants follow form order.
        field as usize
    }

    /// Set the text of a field, builder-style.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set the text of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[Self::slot(field)] = value.into();
    }

    /// Current text of a field.
    pub fn get(&self, field: Field) -> &str {
        &self.values[Self::slot(field)]
    }

    /// Parse and validate the form.
    ///
    /// # Errors
    ///
    /// In this order:
    /// * `RequiredField` / `Parse` / `Validation` for the trial count.
    /// * `Parse` for `BC`, then for `BCR`.
    /// * `ZeroConstraint` if `BC` or `BCR` is zero (blank counts as zero).
    /// * `Parse` for the first of `X`, `Y`, `CP`, `DCRP` that fails.
    pub fn parse(&self) -> Result<ModifierInputs, CalcError> {
        let trials = parse_trials(self.get(Field::Trials))?;
        let crit_base = parse_field(Field::CritBase, self.get(Field::CritBase))?;
        let crit_res_base = parse_field(Field::CritResBase, self.get(Field::CritResBase))?;
        check_bases(crit_base, crit_res_base)?;

        Ok(ModifierInputs {
            trials,
            crit_base,
            crit_res_base,
            equipment: parse_field(Field::Equipment, self.get(Field::Equipment))?,
            skill: parse_field(Field::Skill, self.get(Field::Skill))?,
            buff_percent: parse_field(Field::BuffPercent, self.get(Field::BuffPercent))?,
            debuff_percent: parse_field(Field::DebuffPercent, self.get(Field::DebuffPercent))?,
        })
    }
}

impl Default for ModifierForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one numeric field according to its blank policy.
///
/// Surrounding whitespace is ignored, and `_` is accepted as a separator
/// between two digits (`"1_000"`).
///
/// # Examples
///
/// ```rust
/// use critodds::Field;
/// use critodds::modifiers::parse_field;
///
/// assert_eq!(parse_field(Field::Skill, "  ").unwrap(), 0.0);
/// assert_eq!(parse_field(Field::Skill, " 12.5 ").unwrap(), 12.5);
/// assert_eq!(parse_field(Field::Skill, "1_000").unwrap(), 1000.0);
/// assert!(parse_field(Field::Skill, "twelve").is_err());
/// assert!(parse_field(Field::Trials, "").is_err());
/// ```
pub fn parse_field(field: Field, raw: &str) -> Result<f64, CalcError> {
    let value = raw.trim();
    if value.is_empty() {
        return match field.blank_policy() {
            BlankPolicy::Zero => Ok(0.0),
            BlankPolicy::Reject => {
                warn!(field = field.key(), "required field left blank");
                Err(CalcError::RequiredField { field })
            }
        };
    }
    strip_digit_separators(value)
        .and_then(|digits| digits.parse::<f64>().ok())
        .ok_or_else(|| {
            warn!(field = field.key(), value, "field is not a number");
            CalcError::Parse {
                field,
                value: value.to_string(),
            }
        })
}

/// Drop `_` separators. `None` if any `_` is not between two ASCII digits.
fn strip_digit_separators(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let digit = |b: Option<&u8>| b.is_some_and(u8::is_ascii_digit);
    for (i, byte) in bytes.iter().enumerate() {
        if *byte == b'_' && !(i > 0 && digit(bytes.get(i - 1)) && digit(bytes.get(i + 1))) {
            return None;
        }
    }
    Some(value.replace('_', ""))
}

/// Parse the trial count.
///
/// Accepts any numeric text (so `"7.0"` is fine) but the value must be a
/// finite, non-negative whole number.
pub fn parse_trials(raw: &str) -> Result<u64, CalcError> {
    let value = parse_field(Field::Trials, raw)?;
    trials_from_f64(value)
}

fn trials_from_f64(value: f64) -> Result<u64, CalcError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(CalcError::validation(format!(
            "{}: trial count must be a whole number, got {}",
            Field::Trials,
            value
        )));
    }
    if value < 0.0 {
        return Err(CalcError::validation(format!(
            "{}: trial count must not be negative, got {}",
            Field::Trials,
            value
        )));
    }
    if value > u64::MAX as f64 {
        return Err(CalcError::validation(format!(
            "{}: trial count {} is too large",
            Field::Trials,
            value
        )));
    }
    Ok(value as u64)
}

/// Typed, validated form inputs.
///
/// Invariant (checked by [`ModifierInputs::validate`]): `crit_base != 0`
/// and `crit_res_base != 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierInputs {
    /// `n`: number of trials.
    pub trials: u64,
    /// `BC`: base crit value.
    pub crit_base: f64,
    /// `BCR`: base crit-resist value.
    pub crit_res_base: f64,
    /// `X`: crit from equipment.
    pub equipment: f64,
    /// `Y`: crit from skill.
    pub skill: f64,
    /// `CP`: crit buff percent.
    pub buff_percent: f64,
    /// `DCRP`: crit debuff percent.
    pub debuff_percent: f64,
}

impl ModifierInputs {
    /// Inputs with the given required values and every modifier at zero.
    pub fn new(trials: u64, crit_base: f64, crit_res_base: f64) -> Self {
        Self {
            trials,
            crit_base,
            crit_res_base,
            equipment: 0.0,
            skill: 0.0,
            buff_percent: 0.0,
            debuff_percent: 0.0,
        }
    }

    /// Set the equipment crit bonus `X`.
    pub fn with_equipment(mut self, equipment: f64) -> Self {
        self.equipment = equipment;
        self
    }

    /// Set the skill crit bonus `Y`.
    pub fn with_skill(mut self, skill: f64) -> Self {
        self.skill = skill;
        self
    }

    /// Set the crit buff percent `CP`.
    pub fn with_buff_percent(mut self, buff_percent: f64) -> Self {
        self.buff_percent = buff_percent;
        self
    }

    /// Set the crit debuff percent `DCRP`.
    pub fn with_debuff_percent(mut self, debuff_percent: f64) -> Self {
        self.debuff_percent = debuff_percent;
        self
    }

    /// Check the `BC != 0` and `BCR != 0` invariant.
    pub fn validate(&self) -> Result<(), CalcError> {
        check_bases(self.crit_base, self.crit_res_base)
    }
}

/// The zero-check: `BC` first, then `BCR`.
fn check_bases(crit_base: f64, crit_res_base: f64) -> Result<(), CalcError> {
    for (field, value) in [
        (Field::CritBase, crit_base),
        (Field::CritResBase, crit_res_base),
    ] {
        if value == 0.0 {
            warn!(field = field.key(), "zero base value rejected");
            return Err(CalcError::ZeroConstraint { field });
        }
    }
    Ok(())
}
