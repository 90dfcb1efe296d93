//! B: box-claim elimination over set intersections.
//!
//! For two overlapping sets, a symbol whose only suppliers in one set
//! all sit inside the overlap must be placed there, so the other set
//! cannot take that symbol outside the overlap. The applicability
//! condition is "supplied outside the intersection in some but not
//! all of the two sets", matching the engine this one is modelled on
//! rather than the narrower textbook pointing-pair statement.

use log::trace;

use super::types::Record;
use crate::board::Board;
use crate::topology::Topology;

/// Apply the first box-claim elimination found, scanning intersections
/// in first-occurrence order and symbols ascending. Returns true when
/// an elimination set was recorded.
pub(crate) fn apply_box_claim(
    topo: &Topology,
    board: &mut Board,
    stack: &mut Vec<Record>,
) -> bool {
    for inter in topo.intersections() {
        if inter.cells.len() < 2 {
            continue;
        }
        let (a, b) = inter.sets;
        for v in 1..=board.symbol_count() {
            if !inter.cells.iter().any(|&c| board.offers(c, v)) {
                continue;
            }
            let outside = |sid: usize| -> Vec<usize> {
                topo.set(sid)
                    .membership
                    .iter()
                    .copied()
                    .filter(|m| !inter.cells.contains(m) && board.offers(*m, v))
                    .collect()
            };
            let out_a = outside(a);
            let out_b = outside(b);
            if out_a.is_empty() == out_b.is_empty() {
                continue;
            }
            // The set with no outside supplier pins `v` into the
            // intersection; eliminate from the other set's outside cells.
            let targets = if out_a.is_empty() { out_b } else { out_a };
            for &cell in &targets {
                board.suppress(cell, v);
            }
            trace!(
                "B: {}∩{} pins {v}, eliminated from {:?}",
                topo.set(a).name,
                topo.set(b).name,
                targets
            );
            stack.push(Record::BoxClaim {
                cells: targets,
                value: v,
            });
            return true;
        }
    }
    false
}
