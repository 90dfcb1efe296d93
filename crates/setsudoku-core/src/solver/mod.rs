//! Constraint engine: the F-N-B-T fixpoint and the search driver.
//!
//! Rules are tried in the order F, N, B, T; any progress restarts the
//! loop from F so the cheaper rules get another chance. When nothing
//! applies and cells remain, a `?` trial is pushed and the fixpoint
//! resumes on top of it. One shared stack records every reversible
//! change, so a later `solution` call can unwind past a reported
//! solution and continue the same search.

mod backtrack;
mod basic;
pub(crate) mod explain;
mod intersection;
mod subsets;
mod types;

use log::debug;

pub use types::{Rule, Status, Step, StepKind};

pub(crate) use types::Record;

use crate::board::Board;
use crate::topology::Topology;

use basic::ForcedOutcome;

/// How one fixpoint run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fixpoint {
    /// No rule applies; the board may be complete or stuck.
    Stalled,
    /// Some cell lost its last candidate.
    Contradiction,
}

fn run_fixpoint(topo: &Topology, board: &mut Board, stack: &mut Vec<Record>) -> Fixpoint {
    loop {
        match basic::apply_forced(topo, board, stack) {
            ForcedOutcome::Contradiction => return Fixpoint::Contradiction,
            ForcedOutcome::Applied => continue,
            ForcedOutcome::NoOp => {}
        }
        if basic::apply_necessary(topo, board, stack) {
            continue;
        }
        if intersection::apply_box_claim(topo, board, stack) {
            continue;
        }
        if subsets::apply_tuples(topo, board, stack) {
            continue;
        }
        return Fixpoint::Stalled;
    }
}

/// Outcome of one `next_solution` drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolveOutcome {
    /// The board is fully assigned; the stack reaches the solution.
    Solved,
    /// The search space is exhausted; the stack is empty and the
    /// board is back to its post-problem state.
    Exhausted,
    /// The iteration limit ran out; the stack is left in place.
    TooHard,
}

/// Drive the search to the next solution.
///
/// With a non-empty stack this first unwinds past the previously
/// reported solution and continues the same enumeration.
/// `iteration_limit` bounds the number of `?` trials pushed during
/// this call; 0 disables the bound.
pub(crate) fn next_solution(
    topo: &Topology,
    board: &mut Board,
    stack: &mut Vec<Record>,
    iteration_limit: usize,
) -> SolveOutcome {
    let mut pushed = 0usize;

    if !stack.is_empty() && !backtrack::unwind(topo, board, stack, &mut pushed) {
        return SolveOutcome::Exhausted;
    }

    loop {
        match run_fixpoint(topo, board, stack) {
            Fixpoint::Contradiction => {
                if !backtrack::unwind(topo, board, stack, &mut pushed) {
                    return SolveOutcome::Exhausted;
                }
            }
            Fixpoint::Stalled => {
                if board.unassigned() == 0 {
                    debug!("solution found after {pushed} trials");
                    return SolveOutcome::Solved;
                }
                if iteration_limit > 0 && pushed + 1 > iteration_limit {
                    debug!("iteration limit {iteration_limit} hit");
                    return SolveOutcome::TooHard;
                }
                pushed += 1;
                backtrack::push_choice(topo, board, stack);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin(n: usize) -> Topology {
        let spec: Vec<String> = (0..n)
            .flat_map(|r| (0..n).map(move |c| format!("c{c},r{r}")))
            .collect();
        Topology::parse(&spec.join(" ")).unwrap()
    }

    fn contents(topo: &Topology, board: &Board) -> Vec<usize> {
        (0..topo.cell_count()).map(|c| board.content(c)).collect()
    }

    #[test]
    fn deduction_completes_seeded_latin3() {
        let topo = latin(3);
        let mut board = Board::new(&topo, 4);
        // Diagonal givens 1,2,3 leave a unique Latin square.
        assert!(board.try_set(&topo, 0, 1));
        assert!(board.try_set(&topo, 4, 2));
        assert!(board.try_set(&topo, 8, 3));
        let mut stack = Vec::new();
        assert_eq!(
            next_solution(&topo, &mut board, &mut stack, 0),
            SolveOutcome::Solved
        );
        assert_eq!(contents(&topo, &board), vec![1, 3, 2, 3, 2, 1, 2, 1, 3]);
        assert!(stack.iter().all(|r| r.rule() != Rule::Choice));
    }

    #[test]
    fn contradiction_unwinds_to_exhausted() {
        let topo = latin(2);
        let mut board = Board::new(&topo, 3);
        // Impossible: cell 3 may hold nothing.
        board.suppress(3, 1);
        board.suppress(3, 2);
        let mut stack = Vec::new();
        assert_eq!(
            next_solution(&topo, &mut board, &mut stack, 0),
            SolveOutcome::Exhausted
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn enumeration_continues_across_calls() {
        let topo = latin(2);
        let mut board = Board::new(&topo, 3);
        let baseline = board.clone();
        let mut stack = Vec::new();
        let mut seen = Vec::new();
        loop {
            match next_solution(&topo, &mut board, &mut stack, 0) {
                SolveOutcome::Solved => seen.push(contents(&topo, &board)),
                SolveOutcome::Exhausted => break,
                SolveOutcome::TooHard => panic!("no limit set"),
            }
        }
        // The saved-list continuation revisits each filling through
        // every first-choice cell: 8 reports over the 2 squares.
        assert_eq!(seen.len(), 8);
        assert_eq!(seen[0], vec![1, 2, 2, 1]);
        assert_eq!(seen[1], vec![2, 1, 1, 2]);
        assert!(seen.iter().all(|s| s == &seen[0] || s == &seen[1]));
        // Exhaustion restores the board exactly.
        assert_eq!(board, baseline);
    }

    #[test]
    fn iteration_limit_reports_too_hard() {
        let topo = latin(4);
        let mut board = Board::new(&topo, 5);
        let mut stack = Vec::new();
        assert_eq!(
            next_solution(&topo, &mut board, &mut stack, 1),
            SolveOutcome::TooHard
        );
    }

    #[test]
    fn undo_restores_post_problem_state_after_search() {
        let topo = latin(3);
        let mut board = Board::new(&topo, 4);
        assert!(board.try_set(&topo, 0, 1));
        let baseline = board.clone();
        let mut stack = Vec::new();
        while next_solution(&topo, &mut board, &mut stack, 0) == SolveOutcome::Solved {}
        assert!(stack.is_empty());
        assert_eq!(board, baseline);
    }
}
