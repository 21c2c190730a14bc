use std::{
    error::Error,
    fs,
    io::{self, IsTerminal},
    process,
};

use rod_labyrinth::{parse_grid, solve, RodPlacement};

// Format:
// a . is free space,
// a # is a wall the rod can never cover.
//
// The rod starts lying along the top-left corner and has to reach the
// bottom-right corner.
const EXAMPLES: &[&str] = &[
    "
.........
#...#....
....#....
.#.....#.
.#.....#.
",
    "
.........
#...#..#.
....#....
.#.....#.
.#.....#.
",
    "
..........
.#....#...
.#........
..........
..........
.#........
.#...#....
......#...
..........
..........
",
];

fn run(source: &str) -> Result<(), Box<dyn Error>> {
    let grid = parse_grid(source)?;

    println!("----");
    println!("{}", grid);
    println!("----");

    let (visited, generated, result) = solve(&grid, RodPlacement::START);

    if let Some(cost) = result {
        println!("Found a solution in {} moves", cost);
    } else {
        println!("No solution found");
    }
    println!(
        "Visited {} placements (generated {} total).",
        visited, generated
    );
    println!();

    Ok(())
}

fn run_all() -> Result<(), Box<dyn Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();

    if !paths.is_empty() {
        for path in paths {
            let source = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
            log::info!("solving {}", path);
            run(&source)?;
        }
    } else if !io::stdin().is_terminal() {
        run(&io::read_to_string(io::stdin())?)?;
    } else {
        for source in EXAMPLES {
            run(source)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    // returning the error from main would print its Debug form
    if let Err(e) = run_all() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
