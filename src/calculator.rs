//! Calculation pipeline.
//!
//! `Calculator` runs parse → validate → resolve → tabulate and returns
//! either a complete `Calculation` or the first error hit. Nothing is kept
//! between calls.

use crate::distribution::{tabulate, DistributionTable};
use crate::error::CalcError;
use crate::field::Field;
use crate::modifiers::{ModifierForm, ModifierInputs};
use crate::resolved::ResolvedCrit;
use crate::resolver::resolve;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default upper bound on the trial count.
pub const DEFAULT_MAX_TRIALS: u64 = 10_000;

/// The result of one successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// The validated inputs.
    pub inputs: ModifierInputs,
    /// Crit chance with formula breakdown.
    pub crit: ResolvedCrit,
    /// Distribution of crit counts over `inputs.trials` attempts.
    pub table: DistributionTable,
}

impl Calculation {
    /// The crit chance `p`.
    pub fn chance(&self) -> f64 {
        self.crit.chance
    }
}

/// Runs calculations with an optional bound on the trial count.
///
/// # Examples
///
/// ```rust
/// use critodds::{Calculator, Field, ModifierForm};
///
/// let form = ModifierForm::new()
///     .with(Field::CritBase, "100")
///     .with(Field::CritResBase, "50");
///
/// let calculation = Calculator::new().calculate(&form).unwrap();
/// assert_eq!(calculation.table.len(), 8);
/// assert!((calculation.table.rows()[0].cumulative - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    max_trials: Option<u64>,
}

impl Calculator {
    /// A calculator bounded at [`DEFAULT_MAX_TRIALS`].
    pub fn new() -> Self {
        Self {
            max_trials: Some(DEFAULT_MAX_TRIALS),
        }
    }

    /// A calculator with no trial bound.
    pub fn unbounded() -> Self {
        Self { max_trials: None }
    }

    /// Replace the trial bound. `None` removes it.
    pub fn with_max_trials(mut self, max_trials: Option<u64>) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn max_trials(&self) -> Option<u64> {
        self.max_trials
    }

    /// Parse the form and run the full pipeline.
    pub fn calculate(&self, form: &ModifierForm) -> Result<Calculation, CalcError> {
        let inputs = form.parse()?;
        self.calculate_inputs(&inputs)
    }

    /// Run the pipeline on already-typed inputs.
    ///
    /// # Errors
    ///
    /// `ZeroConstraint`, then `Division`/`Range` from the resolver, then
    /// `Validation` from the trial bound or the tabulator.
    pub fn calculate_inputs(&self, inputs: &ModifierInputs) -> Result<Calculation, CalcError> {
        inputs.validate()?;
        let crit = resolve(inputs)?;

        if let Some(max) = self.max_trials {
            if inputs.trials > max {
                return Err(CalcError::validation(format!(
                    "{}: {} exceeds the limit of {} trials",
                    Field::Trials,
                    inputs.trials,
                    max
                )));
            }
        }

        let table = tabulate(inputs.trials, crit.chance)?;
        debug!(trials = inputs.trials, chance = crit.chance, "calculation complete");
        Ok(Calculation {
            inputs: *inputs,
            crit,
            table,
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the pipeline on a form with the default calculator.
pub fn calculate(form: &ModifierForm) -> Result<Calculation, CalcError> {
    Calculator::new().calculate(form)
}
