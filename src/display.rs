//! Presentation seam.
//!
//! The calculator core never touches widgets. A front end implements
//! `ResultsDisplay`, and `run_calculation` drives it: on success the summary
//! is updated, every old row is cleared and the new rows are inserted; on
//! failure only `show_error` is called, so the previous table stays as it
//! was.

use crate::calculator::{Calculation, Calculator};
use crate::distribution::DistributionRow;
use crate::error::CalcError;
use crate::modifiers::ModifierForm;
use crate::report;
use crate::resolved::ResolvedCrit;
use tracing::{debug, warn};

/// Something that can show calculation results.
pub trait ResultsDisplay {
    /// Update the crit chance summary.
    fn show_summary(&mut self, crit: &ResolvedCrit);

    /// Remove every row of the results table.
    fn clear_rows(&mut self);

    /// Append one row to the results table.
    fn insert_row(&mut self, row: &DistributionRow, trials: u64);

    /// Report a failed calculation.
    fn show_error(&mut self, error: &CalcError);
}

/// Run one "Calculate" action against a display.
///
/// Returns the calculation so callers can reuse it (for example to emit it
/// as JSON).
pub fn run_calculation<D: ResultsDisplay + ?Sized>(
    calculator: &Calculator,
    form: &ModifierForm,
    display: &mut D,
) -> Result<Calculation, CalcError> {
    match calculator.calculate(form) {
        Ok(calculation) => {
            display.show_summary(&calculation.crit);
            display.clear_rows();
            for row in &calculation.table {
                display.insert_row(row, calculation.table.trials());
            }
            debug!(rows = calculation.table.len(), "results displayed");
            Ok(calculation)
        }
        Err(error) => {
            warn!(%error, "calculation failed");
            display.show_error(&error);
            Err(error)
        }
    }
}

/// Headless display that keeps the visible state as text.
///
/// # Examples
///
/// ```rust
/// use critodds::{run_calculation, Calculator, Field, ModifierForm, TableView};
///
/// let mut view = TableView::new();
/// let form = ModifierForm::new()
///     .with(Field::CritBase, "100")
///     .with(Field::CritResBase, "50");
///
/// run_calculation(&Calculator::new(), &form, &mut view).unwrap();
/// assert_eq!(view.rows().len(), 8);
/// assert_eq!(view.rows()[0][0], "0/7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    summary: String,
    rows: Vec<[String; 5]>,
    error: Option<String>,
}

/// Summary text before any calculation has run.
pub const EMPTY_SUMMARY: &str = "Crit Chance (p) = -";

impl TableView {
    pub fn new() -> Self {
        Self {
            summary: EMPTY_SUMMARY.to_string(),
            rows: Vec::new(),
            error: None,
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn rows(&self) -> &[[String; 5]] {
        &self.rows
    }

    /// Message of the most recent error, if the last action failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render the current summary and table as aligned text.
    pub fn render(&self) -> String {
        report::render_cells(&self.summary, &self.rows)
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsDisplay for TableView {
    fn show_summary(&mut self, crit: &ResolvedCrit) {
        self.summary = report::format_summary(crit.chance);
        self.error = None;
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn insert_row(&mut self, row: &DistributionRow, trials: u64) {
        self.rows.push(report::format_row(row, trials));
    }

    fn show_error(&mut self, error: &CalcError) {
        self.error = Some(error.to_string());
    }
}
