//! Letter Boxed solving
//!
//! Enumerates the two-word chains that cover all twelve puzzle letters.

mod engine;
mod solution;

pub use engine::Solver;
pub use solution::{Solution, SolutionSet};
