//! Policy data model: move sets, Win/Draw/Lose classifications and the
//! board-keyed policy table shared by the solver, the rule induction engine
//! and the topology tally.

pub mod moves;
pub mod table;

pub use moves::{MoveClassification, MoveSet, OutcomeCategory};
pub use table::{Policy, PolicyEntry};
