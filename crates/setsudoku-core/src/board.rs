//! Board state: cell contents, possibility counters, set occupancy.
//!
//! Possibility tracking uses a counter per (cell, symbol), not a
//! boolean: the same exclusion can arrive from several sets, and the
//! symbol becomes possible again only when every contributing
//! placement has been retracted. `try_set` keeps all counters in sync
//! in both directions, which is what makes the undo stack work.

use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CellState {
    /// Current symbol index; 0 means unassigned.
    content: usize,
    /// Exclusion counter per symbol; `possible[v] == 0` means `v` is
    /// still legal here. Index 0 is unused.
    possible: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SetState {
    /// Occupancy counter per symbol. Index 0 counts unassigned members
    /// so the unconditional decrement in `try_set` stays unsigned.
    content: Vec<u32>,
    /// Member cells still unassigned.
    free: usize,
}

/// Dynamic solver state over a [`Topology`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Board {
    cells: Vec<CellState>,
    sets: Vec<SetState>,
    unassigned: usize,
    symbol_count: usize,
}

impl Board {
    /// All-empty board sized for `alphabet_len` tokens (including the
    /// empty token).
    pub fn new(topo: &Topology, alphabet_len: usize) -> Self {
        let cells = (0..topo.cell_count())
            .map(|_| CellState {
                content: 0,
                possible: vec![0; alphabet_len],
            })
            .collect();
        let sets = topo
            .sets()
            .iter()
            .map(|s| {
                let mut content = vec![0; alphabet_len];
                content[0] = s.membership.len() as u32;
                SetState {
                    content,
                    free: s.membership.len(),
                }
            })
            .collect();
        Board {
            cells,
            sets,
            unassigned: topo.cell_count(),
            symbol_count: alphabet_len - 1,
        }
    }

    /// Number of non-empty symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Cells still unassigned.
    pub fn unassigned(&self) -> usize {
        self.unassigned
    }

    pub fn content(&self, cell: usize) -> usize {
        self.cells[cell].content
    }

    /// True when `cell` is unassigned and `v` is not excluded.
    pub fn offers(&self, cell: usize, v: usize) -> bool {
        let c = &self.cells[cell];
        c.content == 0 && c.possible[v] == 0
    }

    /// Symbols still legal in an unassigned cell, ascending.
    pub fn candidates(&self, cell: usize) -> Vec<usize> {
        (1..=self.symbol_count)
            .filter(|&v| self.cells[cell].possible[v] == 0)
            .collect()
    }

    /// Count of symbols still legal in a cell.
    pub fn possibility_count(&self, cell: usize) -> usize {
        (1..=self.symbol_count)
            .filter(|&v| self.cells[cell].possible[v] == 0)
            .count()
    }

    /// Occupancy of symbol `v` in set `sid`.
    #[allow(dead_code)]
    pub fn set_content(&self, sid: usize, v: usize) -> u32 {
        self.sets[sid].content[v]
    }

    /// Unassigned member count of set `sid`.
    #[allow(dead_code)]
    pub fn set_free(&self, sid: usize) -> usize {
        self.sets[sid].free
    }

    /// Attempt to place `new` in `cell` (0 clears). Returns `false` on
    /// conflict — `new` already present in one of the cell's sets — in
    /// which case nothing changed.
    pub fn try_set(&mut self, topo: &Topology, cell: usize, new: usize) -> bool {
        let old = self.cells[cell].content;
        if new == old {
            return true;
        }
        if new > 0 {
            for &sid in &topo.cell(cell).membership {
                if self.sets[sid].content[new] > 0 {
                    return false;
                }
            }
        }

        self.cells[cell].content = new;
        if old == 0 {
            self.unassigned -= 1;
        }
        if new == 0 {
            self.unassigned += 1;
        }

        for &sid in &topo.cell(cell).membership {
            self.sets[sid].content[old] -= 1;
            if old > 0 {
                self.sets[sid].free += 1;
                for &m in &topo.set(sid).membership {
                    self.cells[m].possible[old] -= 1;
                }
            }
            self.sets[sid].content[new] += 1;
            if new > 0 {
                self.sets[sid].free -= 1;
                for &m in &topo.set(sid).membership {
                    self.cells[m].possible[new] += 1;
                }
            }
        }
        true
    }

    /// Mark `v` impossible in `cell` (rule elimination). Reversed by
    /// [`Board::restore`].
    pub fn suppress(&mut self, cell: usize, v: usize) {
        self.cells[cell].possible[v] += 1;
    }

    /// Undo one [`Board::suppress`].
    pub fn restore(&mut self, cell: usize, v: usize) {
        debug_assert!(self.cells[cell].possible[v] > 0);
        self.cells[cell].possible[v] -= 1;
    }
}
