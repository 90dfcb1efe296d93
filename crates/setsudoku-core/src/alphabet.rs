//! Symbol alphabet and named allowed-symbol sets.
//!
//! The alphabet is an ordered list of tokens; index 0 is the "empty"
//! token, all others are interchangeable symbols. Allowed-symbol sets
//! are named masks restricting which symbols an empty cell may take.

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;

/// The ordered symbol alphabet. Token 0 is the empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
    multi_char: bool,
}

impl Alphabet {
    /// Parse a whitespace-delimited token list. The first token is the
    /// empty token; duplicates and commas are rejected.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = Vec::new();
        let mut index = HashMap::new();
        let mut multi_char = false;
        for tok in text.split_whitespace() {
            if tok.contains(',') {
                return Err(ConfigError::CommaInToken(tok.to_string()));
            }
            if index.insert(tok.to_string(), tokens.len()).is_some() {
                return Err(ConfigError::DuplicateToken(tok.to_string()));
            }
            if tok.chars().count() > 1 {
                multi_char = true;
            }
            tokens.push(tok.to_string());
        }
        if tokens.len() < 2 {
            return Err(ConfigError::AlphabetTooSmall);
        }
        Ok(Alphabet {
            tokens,
            index,
            multi_char,
        })
    }

    /// Total token count, including the empty token.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the alphabet holds only the empty token. Unreachable
    /// through `parse`, which demands two tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Number of non-empty symbols.
    pub fn symbol_count(&self) -> usize {
        self.tokens.len() - 1
    }

    /// The token for a symbol index.
    pub fn token(&self, index: usize) -> &str {
        &self.tokens[index]
    }

    /// Look up a token's symbol index.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// True when any token is longer than one character.
    pub fn multi_char(&self) -> bool {
        self.multi_char
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

impl Default for Alphabet {
    /// The standard 9×9 Sudoku alphabet: `.` plus the digits 1..9.
    fn default() -> Self {
        Alphabet::parse(". 1 2 3 4 5 6 7 8 9").expect("default alphabet is well formed")
    }
}

/// A growable bitset over symbol indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMask {
    blocks: Vec<u64>,
}

impl SymbolMask {
    pub fn new() -> Self {
        SymbolMask::default()
    }

    pub fn insert(&mut self, symbol: usize) {
        let block = symbol / 64;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        self.blocks[block] |= 1u64 << (symbol % 64);
    }

    pub fn contains(&self, symbol: usize) -> bool {
        self.blocks
            .get(symbol / 64)
            .is_some_and(|b| b & (1u64 << (symbol % 64)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(bi, &block)| {
            (0..64).filter_map(move |bit| {
                if block & (1u64 << bit) != 0 {
                    Some(bi * 64 + bit)
                } else {
                    None
                }
            })
        })
    }
}

/// Named allowed-symbol sets, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedSets {
    sets: Vec<(String, SymbolMask)>,
}

impl AllowedSets {
    pub fn new() -> Self {
        AllowedSets::default()
    }

    /// Apply an `allowed_symbols` configuration value.
    ///
    /// Each line is `name=tok,tok,...`. An empty right-hand side
    /// deletes the named set; an entirely blank value clears all sets.
    /// Set names must not collide with alphabet tokens.
    pub fn apply(&mut self, text: &str, alphabet: &Alphabet) -> Result<(), ConfigError> {
        if text.trim().is_empty() {
            self.sets.clear();
            return Ok(());
        }
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, rhs) = line
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedAllowedLine(line.to_string()))?;
            let name = name.trim();
            if name.is_empty() || name.contains(',') || name.contains(char::is_whitespace) {
                return Err(ConfigError::MalformedAllowedLine(line.to_string()));
            }
            if alphabet.index_of(name).is_some() {
                return Err(ConfigError::NameCollision(name.to_string()));
            }
            let rhs = rhs.trim();
            if rhs.is_empty() {
                self.sets.retain(|(n, _)| n != name);
                continue;
            }
            let mut mask = SymbolMask::new();
            for tok in rhs.split(',') {
                let tok = tok.trim();
                let sym = alphabet
                    .index_of(tok)
                    .ok_or_else(|| ConfigError::UnknownSymbol {
                        set: name.to_string(),
                        token: tok.to_string(),
                    })?;
                mask.insert(sym);
            }
            match self.sets.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = mask,
                None => self.sets.push((name.to_string(), mask)),
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SymbolMask> {
        self.sets.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }

    /// True when any set name is longer than one character.
    pub fn multi_char(&self) -> bool {
        self.sets.iter().any(|(n, _)| n.chars().count() > 1)
    }

    /// Serialise back to `allowed_symbols` lines.
    pub fn to_config_string(&self, alphabet: &Alphabet) -> String {
        self.sets
            .iter()
            .map(|(name, mask)| {
                let toks: Vec<&str> = mask.iter().map(|s| alphabet.token(s)).collect();
                format!("{}={}", name, toks.join(","))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
