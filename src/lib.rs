//! Letter Boxed solver
//!
//! A bit-packed, bucketed word index for the four-sided letter puzzle, and a
//! solver listing every two-word chain that covers its twelve letters.
//!
//! # Quick Start
//!
//! ```rust
//! use letterboxed::core::SideSet;
//! use letterboxed::index::WordDb;
//! use letterboxed::solver::Solver;
//!
//! let sides = SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap();
//! let db = WordDb::from_text(b"quivers\nswolmed\nwield\n".to_vec()).unwrap();
//!
//! let culled = db.cull(&sides);
//! let solutions = Solver::new(&culled, &sides).solve();
//! let chains: Vec<_> = solutions.pairs(&culled).collect();
//! assert_eq!(chains, [("quivers", "swolmed")]);
//! ```

// Core domain types
pub mod core;

// Word index
pub mod index;

// Solving algorithms
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
