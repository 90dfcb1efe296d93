//! The puzzle object: configuration surface, problem loading, and the
//! resumable solution driver.

use log::debug;

use crate::alphabet::{Alphabet, AllowedSets};
use crate::board::Board;
use crate::error::{ConfigError, Error, ProblemError};
use crate::presets::{self, PresetConfig};
use crate::solver::{self, Record, Status, Step};
use crate::topology::Topology;

/// A configurable exact-cover puzzle and its solver state.
///
/// A fresh `Puzzle` is configured as a standard 9×9 Sudoku. Replace
/// the alphabet and topology (directly or through a preset) for other
/// layouts, load a [`problem`](Puzzle::problem), then call
/// [`solution`](Puzzle::solution) repeatedly to enumerate solutions.
#[derive(Debug, Clone)]
pub struct Puzzle {
    alphabet: Alphabet,
    allowed: AllowedSets,
    topology: Topology,
    board: Option<Board>,
    stack: Vec<Record>,
    status: Status,
    exhausted: bool,
    loaded: bool,
    columns: usize,
    output_delimiter: String,
    iteration_limit: usize,
    name: String,
    debug: u32,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Puzzle {
    /// A puzzle preconfigured as standard 9×9 Sudoku.
    pub fn new() -> Self {
        let preset = presets::sudoku(3).expect("order 3 is valid");
        let topology = Topology::parse(&preset.topology).expect("preset topology is well formed");
        Puzzle {
            alphabet: Alphabet::parse(&preset.symbols).expect("preset symbols are well formed"),
            allowed: AllowedSets::new(),
            topology,
            board: None,
            stack: Vec::new(),
            status: Status::Success,
            exhausted: false,
            loaded: false,
            columns: preset.columns,
            output_delimiter: String::new(),
            iteration_limit: 0,
            name: String::new(),
            debug: 0,
        }
    }

    // ==================== Configuration ====================

    /// Replace the alphabet. Clears the allowed-symbol sets and any
    /// loaded problem.
    pub fn set_symbols(&mut self, text: &str) -> Result<(), ConfigError> {
        self.alphabet = Alphabet::parse(text)?;
        self.allowed.clear();
        self.invalidate();
        Ok(())
    }

    /// Replace the topology. Clears the stack and any loaded problem.
    pub fn set_topology(&mut self, text: &str) -> Result<(), ConfigError> {
        self.topology = Topology::parse(text)?;
        self.invalidate();
        Ok(())
    }

    /// Define or update allowed-symbol sets (see
    /// [`AllowedSets::apply`] for the line grammar). Clears any loaded
    /// problem.
    pub fn set_allowed_symbols(&mut self, text: &str) -> Result<(), ConfigError> {
        self.allowed.apply(text, &self.alphabet)?;
        self.invalidate();
        Ok(())
    }

    /// Apply a preset configuration: symbols, topology, and columns.
    pub fn apply(&mut self, preset: &PresetConfig) -> Result<(), ConfigError> {
        self.set_symbols(&preset.symbols)?;
        self.set_topology(&preset.topology)?;
        self.columns = preset.columns;
        Ok(())
    }

    /// Output wrap width, in cells. Must be at least 1.
    pub fn set_columns(&mut self, columns: usize) -> Result<(), ConfigError> {
        if columns == 0 {
            return Err(ConfigError::BadValue {
                attribute: "columns",
                value: columns.to_string(),
            });
        }
        self.columns = columns;
        Ok(())
    }

    /// Inter-cell string used when formatting solutions.
    pub fn set_output_delimiter(&mut self, delimiter: &str) {
        self.output_delimiter = delimiter.to_string();
    }

    /// Cap on backtracking trials per `solution` call; 0 disables.
    pub fn set_iteration_limit(&mut self, limit: usize) {
        self.iteration_limit = limit;
    }

    /// Informational label.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Trace verbosity; 0 silences the puzzle-level log messages.
    pub fn set_debug(&mut self, level: u32) {
        self.debug = level;
    }

    /// Set the status by numeric code (0..3). `status_text` follows.
    pub fn set_status_value(&mut self, code: u8) -> Result<(), ConfigError> {
        self.status = Status::from_code(code).ok_or(ConfigError::BadValue {
            attribute: "status_value",
            value: code.to_string(),
        })?;
        Ok(())
    }

    /// String-keyed attribute setter, covering every configuration
    /// attribute plus the write-only presets `sudoku`, `sudokux`,
    /// `brick`, and `latin`.
    pub fn set(&mut self, attribute: &str, value: &str) -> Result<(), Error> {
        match attribute {
            "symbols" => self.set_symbols(value)?,
            "topology" => self.set_topology(value)?,
            "allowed_symbols" => self.set_allowed_symbols(value)?,
            "columns" => {
                let n = parse_number("columns", value)?;
                self.set_columns(n)?;
            }
            "output_delimiter" => self.set_output_delimiter(value),
            "iteration_limit" => self.iteration_limit = parse_number("iteration_limit", value)?,
            "name" => self.set_name(value),
            "debug" => self.debug = parse_number("debug", value)? as u32,
            "status_value" => {
                let code: usize = parse_number("status_value", value)?;
                self.status = u8::try_from(code)
                    .ok()
                    .and_then(Status::from_code)
                    .ok_or(ConfigError::BadValue {
                        attribute: "status_value",
                        value: value.to_string(),
                    })?;
            }
            "sudoku" => {
                let order = parse_number("sudoku", value)?;
                self.apply(&presets::sudoku(order)?)?;
            }
            "sudokux" => {
                let order = parse_number("sudokux", value)?;
                self.apply(&presets::sudokux(order)?)?;
            }
            "brick" => {
                let dims = parse_triple("brick", value)?;
                self.apply(&presets::brick(dims.0, dims.1, dims.2)?)?;
            }
            "latin" => {
                let size = parse_number("latin", value)?;
                self.apply(&presets::latin(size)?)?;
            }
            _ => return Err(ConfigError::UnknownAttribute(attribute.to_string()).into()),
        }
        Ok(())
    }

    /// String-keyed attribute getter.
    pub fn get(&self, attribute: &str) -> Result<String, Error> {
        Ok(match attribute {
            "symbols" => self.alphabet.to_string(),
            "topology" => self.topology.to_topology_string(),
            "allowed_symbols" => self.allowed.to_config_string(&self.alphabet),
            "columns" => self.columns.to_string(),
            "output_delimiter" => self.output_delimiter.clone(),
            "iteration_limit" => self.iteration_limit.to_string(),
            "name" => self.name.clone(),
            "debug" => self.debug.to_string(),
            "status_value" => self.status.code().to_string(),
            "status_text" => self.status.text().to_string(),
            "constraints_used" => self.constraints_used(),
            "steps" => self.steps_string(),
            _ => return Err(ConfigError::UnknownAttribute(attribute.to_string()).into()),
        })
    }

    // ==================== Accessors ====================

    pub fn symbols(&self) -> String {
        self.alphabet.to_string()
    }

    pub fn topology_string(&self) -> String {
        self.topology.to_topology_string()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn output_delimiter(&self) -> &str {
        &self.output_delimiter
    }

    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug_level(&self) -> u32 {
        self.debug
    }

    /// Outcome of the most recent `solution` call.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_text(&self) -> &'static str {
        self.status.text()
    }

    /// True when a problem string may omit whitespace between tokens.
    pub fn needs_delimiter(&self) -> bool {
        self.alphabet.multi_char() || self.allowed.multi_char()
    }

    /// Cells still unassigned, if a problem is loaded.
    pub fn cells_unassigned(&self) -> Option<usize> {
        self.board.as_ref().map(|b| b.unassigned())
    }

    /// The applied-constraint stack as public steps.
    pub fn steps(&self) -> Vec<Step> {
        solver::explain::steps(&self.stack)
    }

    /// Pretty-printed step trace.
    pub fn steps_string(&self) -> String {
        solver::explain::steps_string(&self.stack)
    }

    /// Distinct rule letters applied to reach the current state, in
    /// canonical order, terminated by `.` (for example `"FN."`).
    pub fn constraints_used(&self) -> String {
        solver::explain::constraints_used(&self.stack)
    }

    // ==================== Problem / solution ====================

    /// Load a problem: one token per cell in topology order. Tokens
    /// are symbols, allowed-set names, or the empty token; whitespace
    /// between tokens is optional while every token is a single
    /// character.
    pub fn problem(&mut self, text: &str) -> Result<(), Error> {
        let symbols = self.alphabet.symbol_count();
        if self.topology.largest_set() > symbols {
            return Err(ProblemError::TooManyCells {
                largest: self.topology.largest_set(),
                symbols,
            }
            .into());
        }

        let tokens = self.tokenize(text);
        if tokens.len() != self.topology.cell_count() {
            return Err(ProblemError::WrongCellCount {
                expected: self.topology.cell_count(),
                got: tokens.len(),
            }
            .into());
        }

        let mut board = Board::new(&self.topology, self.alphabet.len());
        for (cell, token) in tokens.iter().enumerate() {
            if let Some(v) = self.alphabet.index_of(token) {
                if v > 0 && !board.try_set(&self.topology, cell, v) {
                    return Err(ProblemError::DuplicateInSet {
                        token: token.clone(),
                        cell,
                    }
                    .into());
                }
            } else if let Some(mask) = self.allowed.get(token) {
                // The mask is part of the post-problem baseline: it is
                // applied by pre-incrementing the exclusion counters
                // and is never undone by the solver.
                for v in 1..=symbols {
                    if !mask.contains(v) {
                        board.suppress(cell, v);
                    }
                }
            } else if self.needs_delimiter() {
                return Err(ProblemError::UnknownToken(token.clone()).into());
            }
            // Unknown single-character tokens read as empty.
        }

        if self.debug > 0 {
            debug!(
                "problem loaded: {} cells, {} unassigned",
                self.topology.cell_count(),
                board.unassigned()
            );
        }
        self.board = Some(board);
        self.stack.clear();
        self.status = Status::Success;
        self.exhausted = false;
        self.loaded = true;
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        if self.needs_delimiter() {
            text.split_whitespace().map(str::to_string).collect()
        } else {
            text.chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect()
        }
    }

    /// Find the next solution and return it formatted, or `None` when
    /// the search space is exhausted or the iteration limit was hit
    /// (distinguish through [`status`](Puzzle::status)).
    ///
    /// The call is resumable: the applied-constraint stack persists
    /// between calls, so each call continues the same enumeration.
    pub fn solution(&mut self) -> Result<Option<String>, Error> {
        if !self.loaded {
            return Err(Error::NoProblem);
        }
        let board = self.board.as_mut().expect("loaded implies board");
        if self.exhausted {
            self.status = Status::NoSolution;
            return Ok(None);
        }
        match solver::next_solution(&self.topology, board, &mut self.stack, self.iteration_limit) {
            solver::SolveOutcome::Solved => {
                self.status = Status::Success;
                if self.debug > 0 {
                    debug!("solution found; trace {}", self.constraints_used());
                }
                Ok(Some(self.format_output()))
            }
            solver::SolveOutcome::Exhausted => {
                self.exhausted = true;
                self.status = Status::NoSolution;
                if self.debug > 0 {
                    debug!("search exhausted");
                }
                Ok(None)
            }
            solver::SolveOutcome::TooHard => {
                self.status = Status::TooHard;
                if self.debug > 0 {
                    debug!("iteration limit reached");
                }
                Ok(None)
            }
        }
    }

    /// Format the current board: tokens joined by the output
    /// delimiter, wrapped every `columns` cells, each row
    /// newline-terminated.
    fn format_output(&self) -> String {
        let board = self.board.as_ref().expect("caller checked");
        let mut out = String::new();
        let mut row: Vec<&str> = Vec::with_capacity(self.columns);
        for cell in 0..self.topology.cell_count() {
            row.push(self.alphabet.token(board.content(cell)));
            if row.len() == self.columns {
                out.push_str(&row.join(self.output_delimiter.as_str()));
                out.push('\n');
                row.clear();
            }
        }
        if !row.is_empty() {
            out.push_str(&row.join(self.output_delimiter.as_str()));
            out.push('\n');
        }
        out
    }

    fn invalidate(&mut self) {
        self.board = None;
        self.stack.clear();
        self.loaded = false;
        self.exhausted = false;
    }

    #[cfg(test)]
    pub(crate) fn board_snapshot(&self) -> Option<Board> {
        self.board.clone()
    }
}

fn parse_number(attribute: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::BadValue {
        attribute,
        value: value.to_string(),
    })
}

fn parse_triple(
    attribute: &'static str,
    value: &str,
) -> Result<(usize, usize, usize), ConfigError> {
    let inner = value
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ConfigError::BadValue {
            attribute,
            value: value.to_string(),
        });
    }
    Ok((
        parse_number(attribute, parts[0])?,
        parse_number(attribute, parts[1])?,
        parse_number(attribute, parts[2])?,
    ))
}
