//! Error types for configuration, problem loading, and usage.

use thiserror::Error;

/// Errors raised while setting configuration attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric or structured attribute value failed to parse.
    #[error("invalid value for `{attribute}`: {value:?}")]
    BadValue {
        attribute: &'static str,
        value: String,
    },

    /// The attribute name is not recognised.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    /// The alphabet must contain at least the empty token and one symbol.
    #[error("alphabet needs at least two tokens (empty plus one symbol)")]
    AlphabetTooSmall,

    /// The same token appeared twice in the alphabet.
    #[error("duplicate symbol token `{0}`")]
    DuplicateToken(String),

    /// Symbol tokens must not contain commas.
    #[error("symbol token `{0}` contains a comma")]
    CommaInToken(String),

    /// An allowed-symbol set was named after an alphabet token.
    #[error("allowed-symbol set `{0}` collides with an alphabet token")]
    NameCollision(String),

    /// An allowed-symbol line referenced a token outside the alphabet.
    #[error("allowed-symbol set `{set}` lists unknown token `{token}`")]
    UnknownSymbol { set: String, token: String },

    /// An allowed-symbol line was not of the form `name=tok,tok,...`.
    #[error("malformed allowed-symbol line `{0}`")]
    MalformedAllowedLine(String),

    /// Brick dimensions must both divide the grid size.
    #[error("brick dimensions {horizontal}x{vertical} do not divide size {size}")]
    BrickDimensions {
        horizontal: usize,
        vertical: usize,
        size: usize,
    },

    /// The topology description contained no cells.
    #[error("topology describes no cells")]
    EmptyTopology,
}

/// Errors raised while loading a problem string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// The largest set needs more symbols than the alphabet supplies.
    #[error("largest set has {largest} cells but the alphabet supplies only {symbols} symbols")]
    TooManyCells { largest: usize, symbols: usize },

    /// The problem string has the wrong number of cell tokens.
    #[error("problem has {got} cells, topology expects {expected}")]
    WrongCellCount { expected: usize, got: usize },

    /// A given repeats a symbol within one of its sets.
    #[error("symbol `{token}` appears twice in a set at cell {cell}")]
    DuplicateInSet { token: String, cell: usize },

    /// A token was neither a symbol nor an allowed-set name while the
    /// alphabet requires delimited tokens.
    #[error("unknown token `{0}` in problem")]
    UnknownToken(String),
}

/// Umbrella error for the puzzle surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Problem(#[from] ProblemError),

    /// `solution` was called before a problem was loaded.
    #[error("no problem loaded; call `problem` first")]
    NoProblem,
}
