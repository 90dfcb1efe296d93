//! Public solver vocabulary: statuses, rule names, step records.

use serde::{Deserialize, Serialize};

/// Outcome of the most recent `solution` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// A solution was found.
    Success,
    /// The search space is exhausted.
    NoSolution,
    /// The iteration limit was reached before a verdict.
    TooHard,
    /// Reserved for callers; never emitted by the solver itself.
    MultipleSolutions,
}

impl Status {
    /// Numeric status code (0..3).
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::NoSolution => 1,
            Status::TooHard => 2,
            Status::MultipleSolutions => 3,
        }
    }

    /// Status for a numeric code.
    pub fn from_code(code: u8) -> Option<Status> {
        match code {
            0 => Some(Status::Success),
            1 => Some(Status::NoSolution),
            2 => Some(Status::TooHard),
            3 => Some(Status::MultipleSolutions),
            _ => None,
        }
    }

    /// Human-readable status text.
    pub fn text(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::NoSolution => "No solution found",
            Status::TooHard => "No solution found before iteration limit",
            Status::MultipleSolutions => "Multiple solutions found",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Deductive rule (or backtrack choice) applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// F — the cell has exactly one legal symbol.
    Forced,
    /// N — the set has exactly one cell able to supply a symbol.
    Necessary,
    /// B — intersection elimination between two overlapping sets.
    BoxClaim,
    /// T — naked or hidden tuple elimination within a set.
    Tuple,
    /// ? — backtracking trial.
    Choice,
}

impl Rule {
    /// One-letter trace tag.
    pub fn letter(self) -> char {
        match self {
            Rule::Forced => 'F',
            Rule::Necessary => 'N',
            Rule::BoxClaim => 'B',
            Rule::Tuple => 'T',
            Rule::Choice => '?',
        }
    }

    /// All rules in canonical trace order.
    pub fn all() -> [Rule; 5] {
        [
            Rule::Forced,
            Rule::Necessary,
            Rule::BoxClaim,
            Rule::Tuple,
            Rule::Choice,
        ]
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What one applied rule did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// A symbol was placed in a cell.
    Assign { cell: usize, value: usize },
    /// Symbols were ruled out of cells: `(cell, value)` pairs.
    Eliminate { eliminations: Vec<(usize, usize)> },
}

/// Read-only view of one record on the applied-constraint stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub rule: Rule,
    pub kind: StepKind,
}

/// Reversible record of one rule application. The stack of these is
/// the engine's only undo log.
#[derive(Debug, Clone)]
pub(crate) enum Record {
    Forced {
        cell: usize,
        value: usize,
    },
    Necessary {
        cell: usize,
        value: usize,
    },
    BoxClaim {
        cells: Vec<usize>,
        value: usize,
    },
    Tuple {
        eliminations: Vec<(usize, usize)>,
    },
    /// Backtrack trial: `cells` is the stall-time candidate cell list
    /// sorted by (possibility count, index); the trial placed `value`
    /// in `cells[position]`.
    Choice {
        cells: Vec<usize>,
        position: usize,
        value: usize,
    },
}

impl Record {
    pub fn rule(&self) -> Rule {
        match self {
            Record::Forced { .. } => Rule::Forced,
            Record::Necessary { .. } => Rule::Necessary,
            Record::BoxClaim { .. } => Rule::BoxClaim,
            Record::Tuple { .. } => Rule::Tuple,
            Record::Choice { .. } => Rule::Choice,
        }
    }
}
