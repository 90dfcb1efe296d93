//! Basic example of driving the puzzle engine.

use setsudoku_core::{Puzzle, Status};

fn main() {
    env_logger::init();

    // A standard 9×9 Sudoku out of the box.
    let mut puzzle = Puzzle::new();
    puzzle
        .problem(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .expect("well-formed problem");

    println!("Solving a standard Sudoku...\n");
    match puzzle.solution().expect("problem was loaded") {
        Some(solved) => {
            println!("{solved}");
            println!("Rules used: {}", puzzle.constraints_used());
        }
        None => println!("No solution ({})", puzzle.status_text()),
    }

    // A second call continues the same enumeration.
    if puzzle.solution().expect("problem was loaded").is_none() {
        assert_eq!(puzzle.status(), Status::NoSolution);
        println!("The solution is unique.\n");
    }

    // The topology is just data: a 6×6 brick layout.
    println!("--- 6x6 brick layout ---\n");
    puzzle.set("brick", "3,2,6").expect("valid brick dimensions");
    puzzle
        .problem("1.3....56......5.4.6...1.1.6.....3.2")
        .expect("well-formed problem");
    if let Some(solved) = puzzle.solution().expect("problem was loaded") {
        println!("{solved}");
    }

    // Per-cell restrictions: odd/even masks on empty cells.
    println!("--- odd/even masks ---\n");
    puzzle.set("sudoku", "3").expect("valid order");
    puzzle
        .set("allowed_symbols", "o=1,3,5,7,9\ne=2,4,6,8")
        .expect("valid masks");
    puzzle
        .problem(
            "oeo4oe7eoeoeo89oe3oe9oeoeo6eoeoe5eoooooeeoeeo6o8ooeoeoooeeoe9oeeeoeo1ooeoeoooee7e",
        )
        .expect("well-formed problem");
    if let Some(solved) = puzzle.solution().expect("problem was loaded") {
        println!("{solved}");
        println!("Rules used: {}", puzzle.constraints_used());
    }
}
