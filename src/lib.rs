use std::{
    collections::VecDeque,
    error::Error,
    fmt::{self, Display, Write},
    ops::Index,
};

use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

pub const MIN_SIDE: usize = 3;
pub const MAX_SIDE: usize = 1000;

const FREE: u8 = b'.';
const WALL: u8 = b'#';

/// A grid position. `x` grows to the right, `y` grows downwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Cell {
        Cell { x, y }
    }

    // None when the offset walks off the top or left edge
    fn offset(self, (dx, dy): (isize, isize)) -> Option<Cell> {
        Some(Cell {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Orientation {
    /// Occupies the anchor and the cell to its right.
    Horizontal,
    /// Occupies the anchor and the cell below it.
    Vertical,
}

impl Orientation {
    pub fn rotated(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    // offset from the anchor to the second occupied cell
    fn tail(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        })
    }
}

/// Where the rod is: its top-left cell plus its orientation.
///
/// This is the node identity of the search graph; two placements are the same
/// node iff anchor and orientation match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RodPlacement {
    pub anchor: Cell,
    pub orientation: Orientation,
}

impl RodPlacement {
    /// The fixed starting placement, lying along the top row.
    pub const START: RodPlacement = RodPlacement::new(Cell::new(1, 0), Orientation::Horizontal);

    pub const fn new(anchor: Cell, orientation: Orientation) -> RodPlacement {
        RodPlacement {
            anchor,
            orientation,
        }
    }

    /// The two cells the rod covers, anchor first.
    pub fn cells(&self) -> [Cell; 2] {
        let (dx, dy) = self.orientation.tail();
        [
            self.anchor,
            Cell::new(self.anchor.x + dx as usize, self.anchor.y + dy as usize),
        ]
    }

    fn shifted(self, delta: (isize, isize)) -> Option<RodPlacement> {
        Some(RodPlacement::new(self.anchor.offset(delta)?, self.orientation))
    }

    fn rotated(self) -> RodPlacement {
        RodPlacement::new(self.anchor, self.orientation.rotated())
    }
}

impl Display for RodPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.orientation, self.anchor)
    }
}

/// Why a labyrinth was rejected. Every variant means the input is not a valid
/// labyrinth; the variant only says which check failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidLabyrinth {
    TooFewRows(usize),
    TooManyRows(usize),
    TooFewColumns(usize),
    TooManyColumns(usize),
    NotRectangular { row: usize },
    UnexpectedSymbol { row: usize, column: usize, symbol: u8 },
    BlockedStart,
}

impl Display for InvalidLabyrinth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid labyrinth: ")?;
        match self {
            InvalidLabyrinth::TooFewRows(n) | InvalidLabyrinth::TooManyRows(n) => write!(
                f,
                "{} rows, expected between {} and {}",
                n, MIN_SIDE, MAX_SIDE
            ),
            InvalidLabyrinth::TooFewColumns(n) | InvalidLabyrinth::TooManyColumns(n) => write!(
                f,
                "{} columns, expected between {} and {}",
                n, MIN_SIDE, MAX_SIDE
            ),
            InvalidLabyrinth::NotRectangular { row } => {
                write!(f, "row {} differs in length from the first row", row)
            }
            InvalidLabyrinth::UnexpectedSymbol { row, column, symbol } => write!(
                f,
                "unexpected symbol {:?} at row {}, column {}",
                *symbol as char, row, column
            ),
            InvalidLabyrinth::BlockedStart => {
                f.write_str("the three top-left cells must be free")
            }
        }
    }
}

impl Error for InvalidLabyrinth {}

/// The play area. Immutable once built; `Grid::new` is the only way in and it
/// rejects anything the search could not handle.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    blocked: Vec<bool>,
}

impl Grid {
    pub fn new(from: Vec<Vec<u8>>) -> Result<Grid, InvalidLabyrinth> {
        let rows = from.len();
        if rows < MIN_SIDE {
            return Err(InvalidLabyrinth::TooFewRows(rows));
        }
        if rows > MAX_SIDE {
            return Err(InvalidLabyrinth::TooManyRows(rows));
        }

        let columns = from[0].len();
        if columns < MIN_SIDE {
            return Err(InvalidLabyrinth::TooFewColumns(columns));
        }
        if columns > MAX_SIDE {
            return Err(InvalidLabyrinth::TooManyColumns(columns));
        }

        if let Some(row) = from.iter().position(|r| r.len() != columns) {
            return Err(InvalidLabyrinth::NotRectangular { row });
        }

        for (row, line) in from.iter().enumerate() {
            if let Some(column) = line.iter().position(|&c| c != FREE && c != WALL) {
                return Err(InvalidLabyrinth::UnexpectedSymbol {
                    row,
                    column,
                    symbol: line[column],
                });
            }
        }

        if from[0][..3].contains(&WALL) {
            return Err(InvalidLabyrinth::BlockedStart);
        }

        let blocked = from.iter().flatten().map(|&c| c == WALL).collect();
        Ok(Grid {
            rows,
            columns,
            blocked,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.columns && cell.y < self.rows
    }

    /// True iff `cell` holds a wall. Cells outside the grid hold nothing, so
    /// callers do their own bounds check.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self[cell]
    }

    fn is_open(&self, cell: Option<Cell>) -> bool {
        cell.map_or(false, |c| self.in_bounds(c) && !self[c])
    }

    /// The two accepting placements, both covering the bottom-right corner.
    pub fn goals(&self) -> [RodPlacement; 2] {
        [
            RodPlacement::new(
                Cell::new(self.columns - 2, self.rows - 1),
                Orientation::Horizontal,
            ),
            RodPlacement::new(
                Cell::new(self.columns - 1, self.rows - 2),
                Orientation::Vertical,
            ),
        ]
    }

    pub fn is_goal(&self, rod: RodPlacement) -> bool {
        self.goals().contains(&rod)
    }
}

impl Index<Cell> for Grid {
    type Output = bool;
    fn index(&self, cell: Cell) -> &Self::Output {
        &self.blocked[cell.y * self.columns + cell.x]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in self.blocked.chunks(self.columns) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            for &wall in line {
                f.write_char((if wall { WALL } else { FREE }) as char)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid {}x{}\n{}", self.rows, self.columns, self)
    }
}

pub fn parse_grid(b: &str) -> Result<Grid, InvalidLabyrinth> {
    let rows: Vec<Vec<u8>> = b
        .trim_matches(|c: char| c == '\n' || c == '\r')
        .lines()
        .map(|row| row.strip_suffix('\r').unwrap_or(row).as_bytes().to_vec())
        .collect();

    Grid::new(rows)
}

/// Four slides and a rotation at most.
pub type Moves = SmallVec<[RodPlacement; 5]>;

const DELTAS: &[(isize, isize)] = &[(1, 0), (-1, 0), (0, -1), (0, 1)];

// cells around the anchor that must be clear for the rod to swing through
// its pivot: the rows above and below a horizontal rod, the columns either
// side of a vertical one
#[auto_enums::auto_enum(Iterator)]
fn pivot_clearance(orientation: Orientation) -> impl Iterator<Item = (isize, isize)> {
    match orientation {
        Orientation::Horizontal => (-1isize..=1).cartesian_product([-1isize, 1]),
        Orientation::Vertical => [-1isize, 1].into_iter().cartesian_product(-1isize..=1),
    }
}

fn perform_moves(grid: &Grid, rod: RodPlacement, out: &mut Moves) {
    for &delta in DELTAS {
        // the current footprint is free, so this only really tests the
        // cells the rod moves into
        if let Some(next) = rod.shifted(delta) {
            if next.cells().iter().all(|&c| grid.is_open(Some(c))) {
                out.push(next);
            }
        }
    }

    if pivot_clearance(rod.orientation).all(|d| grid.is_open(rod.anchor.offset(d))) {
        out.push(rod.rotated());
    }
}

/// Every placement reachable from `rod` in exactly one move.
pub fn successors(grid: &Grid, rod: RodPlacement) -> Moves {
    let mut out = Moves::new();
    perform_moves(grid, rod, &mut out);
    out
}

struct SearchNode {
    rod: RodPlacement,
    steps: usize,
}

/// Breadth-first search from `start` to either goal placement.
///
/// Returns the number of placements settled, the number of successors
/// generated, and the minimum move count (`None` when no goal is reachable).
pub fn solve(grid: &Grid, start: RodPlacement) -> (usize, usize, Option<usize>) {
    debug!(
        "searching {}x{} grid from {}",
        grid.rows, grid.columns, start
    );

    let mut visited = FxHashSet::default();
    let mut generated = 0;
    let mut frontier = VecDeque::from([SearchNode {
        rod: start,
        steps: 0,
    }]);
    let mut buffer = Moves::new();
    let mut layer = 0;

    while let Some(node) = frontier.pop_front() {
        // a placement can be queued more than once within a layer
        if !visited.insert(node.rod) {
            continue;
        }

        if node.steps > layer {
            trace!("layer {} reached, {} placements settled", node.steps, visited.len());
            layer = node.steps;
        }

        if grid.is_goal(node.rod) {
            debug!(
                "reached {} in {} moves, visited {} (generated {})",
                node.rod,
                node.steps,
                visited.len(),
                generated
            );
            return (visited.len(), generated, Some(node.steps));
        }

        buffer.clear();
        perform_moves(grid, node.rod, &mut buffer);
        generated += buffer.len();

        let steps = node.steps + 1;
        frontier.extend(
            buffer
                .drain(..)
                .filter(|rod| !visited.contains(rod))
                .map(|rod| SearchNode { rod, steps }),
        );
    }

    debug!(
        "no goal reachable, visited {} (generated {})",
        visited.len(),
        generated
    );
    (visited.len(), generated, None)
}

/// Minimum number of moves from the fixed start, or `None` if the corner
/// cannot be reached.
pub fn min_moves(grid: &Grid) -> Option<usize> {
    solve(grid, RodPlacement::START).2
}

pub fn min_dist_lab(labyrinth: &str) -> Result<Option<usize>, InvalidLabyrinth> {
    let grid = parse_grid(labyrinth)?;
    Ok(min_moves(&grid))
}
