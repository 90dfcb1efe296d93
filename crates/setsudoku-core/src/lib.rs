//! Exact-cover-over-named-sets puzzle engine.
//!
//! A finite collection of cells must each take one symbol from a
//! fixed alphabet such that no symbol repeats within any declared set
//! of cells. The topology is data: standard Sudoku, Sudoku-X, brick
//! layouts, Latin squares, and irregular nonominoes are all described
//! by the same cell/set membership strings, generated by
//! [`presets`] or supplied directly.
//!
//! Solving applies human-style deductive rules — forced cell,
//! necessary placement, box/line elimination, naked and hidden tuples
//! — and falls back to depth-first search when deduction stalls.
//! Every rule application lands on an undo-capable stack, so
//! [`Puzzle::solution`] can be called again to continue the same
//! enumeration, and [`Puzzle::steps`] explains how the current state
//! was reached.
//!
//! ```
//! use setsudoku_core::Puzzle;
//!
//! let mut puzzle = Puzzle::new(); // standard 9×9 Sudoku
//! puzzle
//!     .problem(
//!         "...4..7894.6...1...8.....5.2.4..5....95.........9.2345.3..7.9.8.67..1...9....8..2",
//!     )
//!     .unwrap();
//! let solved = puzzle.solution().unwrap().expect("unique solution");
//! assert!(solved.starts_with("123456789\n"));
//! assert_eq!(puzzle.constraints_used(), "F.");
//! ```

mod alphabet;
mod board;
mod error;
pub mod presets;
mod puzzle;
mod solver;
mod topology;

pub use alphabet::{Alphabet, AllowedSets, SymbolMask};
pub use error::{ConfigError, Error, ProblemError};
pub use presets::PresetConfig;
pub use puzzle::Puzzle;
pub use solver::{Rule, Status, Step, StepKind};
pub use topology::Topology;
