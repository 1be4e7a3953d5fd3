//! # critodds - Crit Chance and Binomial Odds Calculator
//!
//! Answers "what is my chance of landing at least k crits in n attempts"
//! for a game-style crit formula:
//! - **Resolver**: seven form inputs → one crit probability `p`, using a
//!   diminishing-returns curve that never reaches 100%
//! - **Tabulator**: `n`, `p` → exact and right-tail binomial probabilities
//!   with "1 in X" odds for every `k = 0..=n`
//!
//! ## Pipeline
//!
//! ```text
//! [ModifierForm] → parse → [ModifierInputs] → resolve → [ResolvedCrit] → tabulate → [DistributionTable]
//! ```
//!
//! Every stage returns `Result<_, CalcError>`; the first failure ends the
//! calculation. Front ends implement [`ResultsDisplay`] and let
//! [`run_calculation`] drive them, which guarantees a failed calculation
//! never disturbs the table already on screen.
//!
//! ## Example
//!
//! ```rust
//! use critodds::*;
//!
//! let form = ModifierForm::new()
//!     .with(Field::CritBase, "100")
//!     .with(Field::CritResBase, "50")
//!     .with(Field::BuffPercent, "20");
//!
//! let calculation = calculate(&form).unwrap();
//! // C = 100 * 1.2 = 120, CR = 50, FC = 70
//! assert_eq!(calculation.crit.final_crit, 70.0);
//! assert_eq!(calculation.table.len(), 8);
//! ```
//!
//! ## Modules
//!
//! - [`field`] - Form field identifiers
//! - [`modifiers`] - Form parsing and input validation
//! - [`resolver`] - Crit chance formula
//! - [`resolved`] - Crit chance with breakdown
//! - [`numeric`] - Binomial coefficient and PMF
//! - [`odds`] - "1 in X" odds
//! - [`distribution`] - Binomial distribution tables
//! - [`calculator`] - End-to-end pipeline
//! - [`display`] - Presentation seam
//! - [`report`] - Text formatting
//! - [`error`] - Error types

pub mod calculator;
pub mod display;
pub mod distribution;
pub mod error;
pub mod field;
pub mod modifiers;
pub mod numeric;
pub mod odds;
pub mod report;
pub mod resolved;
pub mod resolver;

// Re-export main types for convenience
pub use calculator::{calculate, Calculation, Calculator, DEFAULT_MAX_TRIALS};
pub use display::{run_calculation, ResultsDisplay, TableView};
pub use distribution::{tabulate, DistributionRow, DistributionTable};
pub use error::CalcError;
pub use field::Field;
pub use modifiers::{ModifierForm, ModifierInputs};
pub use odds::Odds;
pub use resolved::ResolvedCrit;
pub use resolver::{resolve, resolve_crit_chance, CRIT_CONSTANT};
