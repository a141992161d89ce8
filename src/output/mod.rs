//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_inspect_result, print_load_summary, print_prep_result,
    print_solve_result,
};
