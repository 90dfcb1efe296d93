//! ? — backtracking trials and stack unwinding.
//!
//! A choice record stores the stall-time list of unassigned cells
//! sorted by (possibility count, index), the position currently being
//! tried, and the trial value. Unwinding continues an open choice:
//! next value for the same cell, then later cells of the saved list
//! from value 1, and only then pops through to the previous choice.

use log::{debug, trace};

use super::types::Record;
use crate::board::Board;
use crate::topology::Topology;

/// Unassigned cells sorted ascending by possibility count, ties by
/// cell index.
pub(crate) fn choice_order(topo: &Topology, board: &Board) -> Vec<usize> {
    let mut cells: Vec<usize> = (0..topo.cell_count())
        .filter(|&c| board.content(c) == 0)
        .collect();
    cells.sort_by_key(|&c| (board.possibility_count(c), c));
    cells
}

/// Start a fresh trial at a stall: pick the most constrained cell and
/// place its lowest legal symbol. The caller guarantees at least one
/// unassigned cell with a candidate (a zero-candidate cell would have
/// been a contradiction in F).
pub(crate) fn push_choice(topo: &Topology, board: &mut Board, stack: &mut Vec<Record>) {
    let cells = choice_order(topo, board);
    let cell = cells[0];
    let value = board.candidates(cell)[0];
    assert!(
        board.try_set(topo, cell, value),
        "trial placement of a legal symbol failed"
    );
    debug!("?: trying cell {cell} = {value}");
    stack.push(Record::Choice {
        cells,
        position: 0,
        value,
    });
}

/// Reverse records from the top of the stack until an open choice can
/// be continued with a new trial. Returns false when the stack is
/// exhausted. `pushed` counts continuation trials toward the caller's
/// iteration limit.
pub(crate) fn unwind(
    topo: &Topology,
    board: &mut Board,
    stack: &mut Vec<Record>,
    pushed: &mut usize,
) -> bool {
    while let Some(record) = stack.pop() {
        match record {
            Record::Forced { cell, .. } | Record::Necessary { cell, .. } => {
                assert!(board.try_set(topo, cell, 0), "retracting a placement failed");
            }
            Record::BoxClaim { cells, value } => {
                for &c in &cells {
                    board.restore(c, value);
                }
            }
            Record::Tuple { eliminations } => {
                for &(c, v) in &eliminations {
                    board.restore(c, v);
                }
            }
            Record::Choice {
                cells,
                mut position,
                value,
            } => {
                assert!(
                    board.try_set(topo, cells[position], 0),
                    "retracting a trial failed"
                );
                let mut next = value + 1;
                while position < cells.len() {
                    let cell = cells[position];
                    let mut placed = None;
                    for v in next..=board.symbol_count() {
                        if board.offers(cell, v) {
                            assert!(
                                board.try_set(topo, cell, v),
                                "trial placement of a legal symbol failed"
                            );
                            placed = Some(v);
                            break;
                        }
                    }
                    if let Some(v) = placed {
                        trace!("?: continuing with cell {cell} = {v}");
                        stack.push(Record::Choice {
                            cells,
                            position,
                            value: v,
                        });
                        *pushed += 1;
                        return true;
                    }
                    position += 1;
                    next = 1;
                }
                // Choice exhausted; keep popping to the previous one.
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin2() -> Topology {
        Topology::parse("c0,r0 c1,r0 c0,r1 c1,r1").unwrap()
    }

    #[test]
    fn choice_order_prefers_fewest_candidates() {
        let topo = latin2();
        let mut b = Board::new(&topo, 3);
        b.suppress(3, 1);
        assert_eq!(choice_order(&topo, &b), vec![3, 0, 1, 2]);
    }

    #[test]
    fn push_choice_places_lowest_candidate() {
        let topo = latin2();
        let mut b = Board::new(&topo, 3);
        let mut stack = Vec::new();
        push_choice(&topo, &mut b, &mut stack);
        assert_eq!(b.content(0), 1);
        assert!(matches!(
            stack[0],
            Record::Choice {
                position: 0,
                value: 1,
                ..
            }
        ));
    }

    #[test]
    fn unwind_retries_next_value() {
        let topo = latin2();
        let mut b = Board::new(&topo, 3);
        let mut stack = Vec::new();
        push_choice(&topo, &mut b, &mut stack);
        let mut pushed = 0;
        assert!(unwind(&topo, &mut b, &mut stack, &mut pushed));
        assert_eq!(b.content(0), 2);
        assert_eq!(pushed, 1);
    }

    #[test]
    fn unwind_advances_to_next_cell_then_pops() {
        let topo = latin2();
        let mut b = Board::new(&topo, 3);
        let fresh = b.clone();
        let mut stack = Vec::new();
        push_choice(&topo, &mut b, &mut stack);
        let mut pushed = 0;
        // cell0=1, cell0=2, then cells 1..3 each with values 1,2.
        let mut trials = vec![(0, 1)];
        while unwind(&topo, &mut b, &mut stack, &mut pushed) {
            if let Record::Choice {
                ref cells,
                position,
                value,
            } = stack[0]
            {
                trials.push((cells[position], value));
            }
        }
        assert_eq!(
            trials,
            vec![(0, 1), (0, 2), (1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]
        );
        assert!(stack.is_empty());
        assert_eq!(b, fresh);
    }

    #[test]
    fn unwind_reverses_placements_above_choice() {
        let topo = latin2();
        let mut b = Board::new(&topo, 3);
        let mut stack = Vec::new();
        push_choice(&topo, &mut b, &mut stack); // cell0 = 1
        assert!(b.try_set(&topo, 1, 2));
        stack.push(Record::Forced { cell: 1, value: 2 });
        let mut pushed = 0;
        assert!(unwind(&topo, &mut b, &mut stack, &mut pushed));
        // Forced record reversed, choice moved to cell0 = 2.
        assert_eq!(b.content(1), 0);
        assert_eq!(b.content(0), 2);
        assert_eq!(stack.len(), 1);
    }
}
