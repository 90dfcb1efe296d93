//! T: naked and hidden tuple eliminations, orders 2 through 4.

use log::trace;

use super::types::Record;
use crate::board::Board;
use crate::topology::Topology;

const MAX_ORDER: usize = 4;

/// Order-k index subsets of `0..n`, in lexicographic order, grown by
/// appending one larger index to each order-(k-1) subset.
fn k_subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut subsets: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    for _ in 1..k {
        let mut grown = Vec::new();
        for s in &subsets {
            let last = *s.last().expect("subsets are non-empty");
            for next in (last + 1)..n {
                let mut t = s.clone();
                t.push(next);
                grown.push(t);
            }
        }
        subsets = grown;
    }
    subsets
}

/// Apply the first tuple elimination found. Scans sets in
/// first-occurrence order, subset orders 2..4, subsets
/// lexicographically. All eliminations from one subset land in a
/// single record. Returns true when a record was pushed.
pub(crate) fn apply_tuples(topo: &Topology, board: &mut Board, stack: &mut Vec<Record>) -> bool {
    let nsym = board.symbol_count();
    for set in topo.sets() {
        let open: Vec<usize> = set
            .membership
            .iter()
            .copied()
            .filter(|&m| board.content(m) == 0)
            .collect();
        if open.is_empty() {
            continue;
        }

        // contributed[v]: open cells in this set still offering v.
        let mut contributed = vec![0usize; nsym + 1];
        for &c in &open {
            for v in 1..=nsym {
                if board.offers(c, v) {
                    contributed[v] += 1;
                }
            }
        }

        for k in 2..=MAX_ORDER.min(open.len()) {
            for subset in k_subsets(open.len(), k) {
                let cells: Vec<usize> = subset.iter().map(|&i| open[i]).collect();
                let mut tcontr = vec![0usize; nsym + 1];
                for &c in &cells {
                    for v in 1..=nsym {
                        if board.offers(c, v) {
                            tcontr[v] += 1;
                        }
                    }
                }
                let discrete = (1..=nsym).filter(|&v| tcontr[v] > 0).count();

                let mut eliminations: Vec<(usize, usize)> = Vec::new();
                if discrete == k {
                    // Naked: the k cells own exactly k symbols; those
                    // symbols leave the rest of the set.
                    for v in 1..=nsym {
                        if tcontr[v] > 0 && contributed[v] > tcontr[v] {
                            for &c in &open {
                                if !cells.contains(&c) && board.offers(c, v) {
                                    eliminations.push((c, v));
                                }
                            }
                        }
                    }
                } else if discrete > k {
                    // Hidden: k symbols confined to these k cells push
                    // every shared symbol out of them.
                    let within = (1..=nsym)
                        .filter(|&v| tcontr[v] > 0 && contributed[v] == tcontr[v])
                        .count();
                    if within >= k {
                        for v in 1..=nsym {
                            if tcontr[v] > 0 && contributed[v] > tcontr[v] {
                                for &c in &cells {
                                    if board.offers(c, v) {
                                        eliminations.push((c, v));
                                    }
                                }
                            }
                        }
                    }
                }

                if !eliminations.is_empty() {
                    for &(c, v) in &eliminations {
                        board.suppress(c, v);
                    }
                    trace!(
                        "T: order-{k} tuple in {} eliminated {:?}",
                        set.name,
                        eliminations
                    );
                    stack.push(Record::Tuple { eliminations });
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_enumeration_is_lexicographic() {
        assert_eq!(
            k_subsets(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(k_subsets(4, 3).len(), 4);
        assert_eq!(k_subsets(3, 4), Vec::<Vec<usize>>::new());
    }

    #[test]
    fn naked_pair_clears_rest_of_set() {
        // One set of four cells over symbols 1..4.
        let topo = Topology::parse("s s s s").unwrap();
        let mut board = Board::new(&topo, 5);
        // Cells 0 and 1 are both down to {1,2}.
        for c in 0..2 {
            board.suppress(c, 3);
            board.suppress(c, 4);
        }
        let mut stack = Vec::new();
        assert!(apply_tuples(&topo, &mut board, &mut stack));
        assert!(!board.offers(2, 1));
        assert!(!board.offers(2, 2));
        assert!(!board.offers(3, 1));
        assert!(!board.offers(3, 2));
        assert!(board.offers(2, 3));
        match &stack[0] {
            Record::Tuple { eliminations } => {
                assert_eq!(eliminations, &vec![(2, 1), (3, 1), (2, 2), (3, 2)]);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn hidden_pair_clears_subset_cells() {
        let topo = Topology::parse("s s s s").unwrap();
        let mut board = Board::new(&topo, 5);
        // Symbols 1 and 2 can only go in cells 0 and 1.
        for c in 2..4 {
            board.suppress(c, 1);
            board.suppress(c, 2);
        }
        let mut stack = Vec::new();
        assert!(apply_tuples(&topo, &mut board, &mut stack));
        // Cells 0,1 keep 1,2 but lose 3,4.
        assert!(board.offers(0, 1));
        assert!(board.offers(1, 2));
        assert!(!board.offers(0, 3));
        assert!(!board.offers(0, 4));
        assert!(!board.offers(1, 3));
        assert!(!board.offers(1, 4));
    }

    #[test]
    fn no_tuple_on_fresh_board() {
        let topo = Topology::parse("s s s s").unwrap();
        let mut board = Board::new(&topo, 5);
        let mut stack = Vec::new();
        assert!(!apply_tuples(&topo, &mut board, &mut stack));
    }

    #[test]
    fn tuple_record_reverses_by_restore() {
        let topo = Topology::parse("s s s s").unwrap();
        let mut board = Board::new(&topo, 5);
        for c in 0..2 {
            board.suppress(c, 3);
            board.suppress(c, 4);
        }
        let snapshot = board.clone();
        let mut stack = Vec::new();
        assert!(apply_tuples(&topo, &mut board, &mut stack));
        if let Record::Tuple { eliminations } = &stack[0] {
            for &(c, v) in eliminations {
                board.restore(c, v);
            }
        }
        assert_eq!(board, snapshot);
    }
}
