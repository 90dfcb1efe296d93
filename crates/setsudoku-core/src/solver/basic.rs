//! The two placement rules: F (forced cell) and N (necessary cell).

use log::trace;

use super::types::Record;
use crate::board::Board;
use crate::topology::Topology;

/// Result of one F pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForcedOutcome {
    /// At least one cell was assigned.
    Applied,
    /// Nothing to do.
    NoOp,
    /// Some unassigned cell has no legal symbol left.
    Contradiction,
}

/// F: assign every cell with exactly one legal symbol, scanning cells
/// in index order. A cell with zero legal symbols is a contradiction.
pub(crate) fn apply_forced(
    topo: &Topology,
    board: &mut Board,
    stack: &mut Vec<Record>,
) -> ForcedOutcome {
    let mut progress = false;
    for cell in 0..topo.cell_count() {
        if board.content(cell) != 0 {
            continue;
        }
        let candidates = board.candidates(cell);
        match candidates.len() {
            0 => {
                trace!("F: cell {cell} has no legal symbol");
                return ForcedOutcome::Contradiction;
            }
            1 => {
                let value = candidates[0];
                assert!(
                    board.try_set(topo, cell, value),
                    "forced placement of a legal symbol failed"
                );
                trace!("F: cell {cell} = {value}");
                stack.push(Record::Forced { cell, value });
                progress = true;
            }
            _ => {}
        }
    }
    if progress {
        ForcedOutcome::Applied
    } else {
        ForcedOutcome::NoOp
    }
}

/// N: find the first set in which some symbol has exactly one cell
/// able to supply it, and place it there. One placement per pass; the
/// fixpoint restarts from F afterwards.
pub(crate) fn apply_necessary(
    topo: &Topology,
    board: &mut Board,
    stack: &mut Vec<Record>,
) -> bool {
    for set in topo.sets() {
        for v in 1..=board.symbol_count() {
            let mut home = None;
            let mut count = 0;
            for &m in &set.membership {
                if board.offers(m, v) {
                    home = Some(m);
                    count += 1;
                    if count > 1 {
                        break;
                    }
                }
            }
            if count == 1 {
                let cell = home.expect("counted one supplier");
                assert!(
                    board.try_set(topo, cell, v),
                    "necessary placement of a legal symbol failed"
                );
                trace!("N: cell {cell} = {v} (only supplier in {})", set.name);
                stack.push(Record::Necessary { cell, value: v });
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin3() -> Topology {
        let spec: Vec<String> = (0..3)
            .flat_map(|r| (0..3).map(move |c| format!("c{c},r{r}")))
            .collect();
        Topology::parse(&spec.join(" ")).unwrap()
    }

    #[test]
    fn forced_assigns_single_candidate() {
        let topo = latin3();
        let mut b = Board::new(&topo, 4);
        // Row 0: cells 0,1 filled leaves cell 2 forced.
        assert!(b.try_set(&topo, 0, 1));
        assert!(b.try_set(&topo, 1, 2));
        let mut stack = Vec::new();
        assert_eq!(
            apply_forced(&topo, &mut b, &mut stack),
            ForcedOutcome::Applied
        );
        assert_eq!(b.content(2), 3);
        assert!(matches!(stack[0], Record::Forced { cell: 2, value: 3 }));
    }

    #[test]
    fn forced_detects_contradiction() {
        let topo = latin3();
        let mut b = Board::new(&topo, 4);
        // Exhaust cell 4's candidates by hand.
        b.suppress(4, 1);
        b.suppress(4, 2);
        b.suppress(4, 3);
        let mut stack = Vec::new();
        assert_eq!(
            apply_forced(&topo, &mut b, &mut stack),
            ForcedOutcome::Contradiction
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn forced_noop_when_all_cells_open() {
        let topo = latin3();
        let mut b = Board::new(&topo, 4);
        let mut stack = Vec::new();
        assert_eq!(apply_forced(&topo, &mut b, &mut stack), ForcedOutcome::NoOp);
    }

    #[test]
    fn necessary_places_only_supplier() {
        let topo = latin3();
        let mut b = Board::new(&topo, 4);
        // In row 0, suppress 1 from cells 0 and 1; cell 2 is then the
        // only cell in r0 that can supply 1.
        b.suppress(0, 1);
        b.suppress(1, 1);
        let mut stack = Vec::new();
        assert!(apply_necessary(&topo, &mut b, &mut stack));
        assert_eq!(b.content(2), 1);
        assert!(matches!(stack[0], Record::Necessary { cell: 2, value: 1 }));
    }

    #[test]
    fn necessary_ignores_placed_symbols() {
        let topo = latin3();
        let mut b = Board::new(&topo, 4);
        assert!(b.try_set(&topo, 0, 1));
        let mut stack = Vec::new();
        // 1 is placed in r0/c0; remaining sets each still have two or
        // three suppliers for every open symbol.
        assert!(!apply_necessary(&topo, &mut b, &mut stack));
    }
}
