//! Text formatting for calculation results.
//!
//! Probabilities are shown with 16 decimals, odds with 2 decimals (or the
//! infinity marker).

use crate::distribution::{DistributionRow, DistributionTable};
use crate::resolved::ResolvedCrit;
use std::fmt::Write;

/// Table column headers, in display order.
pub const COLUMNS: [&str; 5] = ["k/n", "P(X = k)", "1 in X (= k)", "P(X ≥ k)", "1 in X (≥ k)"];

/// Summary label text for a crit chance.
///
/// # Examples
///
/// ```rust
/// use critodds::report::format_summary;
///
/// assert_eq!(format_summary(0.5), "Crit Chance (p) = 0.5000000000000000");
/// ```
pub fn format_summary(chance: f64) -> String {
    format!("Crit Chance (p) = {:.16}", chance)
}

/// Cell text for one table row.
pub fn format_row(row: &DistributionRow, trials: u64) -> [String; 5] {
    [
        format!("{}/{}", row.k, trials),
        format!("{:.16}", row.exact),
        row.odds_exact.to_string(),
        format!("{:.16}", row.cumulative),
        row.odds_cumulative.to_string(),
    ]
}

/// Cell text for every row of a table.
pub fn format_rows(table: &DistributionTable) -> Vec<[String; 5]> {
    table
        .iter()
        .map(|row| format_row(row, table.trials()))
        .collect()
}

/// Render the formula breakdown, one `label = value` line each.
pub fn render_breakdown(resolved: &ResolvedCrit) -> String {
    let mut out = String::new();
    for (label, value) in resolved.breakdown() {
        let _ = writeln!(out, "{:<18} = {}", label, value);
    }
    out
}

/// Render the full text report: summary line, blank line, aligned table.
///
/// # Examples
///
/// ```rust
/// use critodds::{report, tabulate};
///
/// let table = tabulate(1, 0.5).unwrap();
/// let text = report::render_text(0.5, &table);
/// let lines: Vec<_> = text.lines().collect();
/// assert_eq!(lines[0], "Crit Chance (p) = 0.5000000000000000");
/// assert!(lines[2].starts_with("k/n"));
/// assert!(lines[4].starts_with("0/1"));
/// ```
pub fn render_text(chance: f64, table: &DistributionTable) -> String {
    render_cells(&format_summary(chance), &format_rows(table))
}

/// Render a summary line and pre-formatted rows as an aligned table.
pub fn render_cells(summary: &str, rows: &[[String; 5]]) -> String {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", summary);
    let _ = writeln!(out);
    push_line(&mut out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
