//! Tax calculations for a single gross salary.
//!
//! Progressive bracket tax, the two flat payroll levies, and the aggregator
//! that turns their amounts into a rounded [`TaxResult`](crate::TaxResult).

pub mod aggregate;
pub mod bracket;
pub mod common;
pub mod levy;
pub mod paycheck;

pub use aggregate::aggregate;
pub use bracket::{BracketPortion, bracket_breakdown, compute_bracket_tax};
pub use levy::{compute_capped_levy, compute_surcharge_levy};
pub use paycheck::{PaycheckBreakdown, PaycheckCalculator};
