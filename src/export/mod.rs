//! Export of solved policies for external analysis.
//!
//! Currently supports CSV export of Win/Draw/Lose classified policies.

mod policy_csv;

pub use policy_csv::{PolicyCsvExporter, PolicyCsvRecord};
