use crate::utils::error::PuzzleError;
use crate::utils::grid::{Coordinate, Direction, Directions, Grid, grid_cell};
use crate::utils::traversal::{Step, Transition, Visit, Walk, breadth_first, flood_fill, steer};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "bfs"])]
pub struct Solver;

grid_cell! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Pipe {
        Vertical = '|',
        Horizontal = '-',
        NorthEast = 'L',
        NorthWest = 'J',
        SouthWest = '7',
        SouthEast = 'F',
        Ground = '.',
        Start = 'S',
        Outside = 'O',
    }
}

impl Pipe {
    fn openings(self) -> Directions {
        match self {
            Pipe::Vertical => Directions::VERTICAL,
            Pipe::Horizontal => Directions::HORIZONTAL,
            Pipe::NorthEast => Directions::UP | Directions::RIGHT,
            Pipe::NorthWest => Directions::UP | Directions::LEFT,
            Pipe::SouthWest => Directions::DOWN | Directions::LEFT,
            Pipe::SouthEast => Directions::DOWN | Directions::RIGHT,
            Pipe::Start => Directions::all(),
            Pipe::Ground | Pipe::Outside => Directions::empty(),
        }
    }
}

impl Transition for Pipe {
    fn exits(&self, heading: Option<Direction>) -> Directions {
        match heading {
            // never straight back into the pipe we came from
            Some(heading) => self.openings().difference(heading.opposite().into()),
            None => self.openings(),
        }
    }

    fn admits(&self, heading: Direction) -> bool {
        self.openings().contains(heading.opposite().into())
    }
}

#[derive(Debug)]
pub struct SharedData {
    /// Input surrounded by one ring of ground, so the corner is always outside.
    grid: Grid<Pipe>,
    start: usize,
    main_loop: Option<Vec<usize>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = input.parse::<Grid<Pipe>>()?.padded(Pipe::Ground);
        let start = grid
            .position(|&pipe| pipe == Pipe::Start)
            .ok_or(PuzzleError::MissingMarker('S'))?;

        Ok(SharedData {
            grid,
            start,
            main_loop: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((main_loop(shared)?.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let path = main_loop(shared)?.to_vec();
        Ok(enclosed_tiles(&shared.grid, &path).to_string())
    }
}

struct LoopWalk<'g> {
    grid: &'g Grid<Pipe>,
    start: usize,
}

impl Walk for LoopWalk<'_> {
    type Node = Step;
    type Key = Step;

    fn key(&self, node: &Step) -> Step {
        *node
    }

    fn visit(&mut self, node: &Step, _depth: usize) -> Visit {
        if node.index == self.start && node.heading.is_some() {
            Visit::Goal
        } else {
            Visit::Expand
        }
    }

    fn successors(&self, node: &Step, _depth: usize, out: &mut Vec<Step>) {
        out.extend(steer(self.grid, *node));
    }
}

/// Cells of the loop through `start`, in walking order, starting at `start`.
pub fn find_loop(grid: &Grid<Pipe>, start: usize) -> Option<Vec<usize>> {
    let mut walk = LoopWalk { grid, start };
    let found = breadth_first(&mut walk, [Step::start(start)]).found?;

    let mut path: Vec<usize> = found.path.iter().map(|step| step.index).collect();
    // the walk ends back on the start
    path.pop();
    Some(path)
}

fn main_loop(shared: &mut SharedData) -> Result<&[usize], PuzzleError> {
    let path = match shared.main_loop.take() {
        Some(path) => path,
        None => find_loop(&shared.grid, shared.start)
            .ok_or(PuzzleError::NotFound("loop through the start tile"))?,
    };
    Ok(shared.main_loop.insert(path).as_slice())
}

/// Ground tiles strictly inside the loop polygon.
fn enclosed_tiles(grid: &Grid<Pipe>, path: &[usize]) -> usize {
    let mut on_loop = vec![false; grid.len()];
    for &index in path {
        on_loop[index] = true;
    }

    let mut grid = grid.clone();
    for (index, &keep) in on_loop.iter().enumerate() {
        if !keep {
            grid[index] = Pipe::Ground;
        }
    }
    flood_fill(&mut grid, 0, |&pipe| pipe == Pipe::Ground, Pipe::Outside);

    let vertices: Vec<Coordinate> = path
        .iter()
        .map(|&index| grid.index_to_coordinate(index))
        .collect();

    (0..grid.len())
        .filter(|&index| grid[index] == Pipe::Ground)
        .filter(|&index| encloses(&vertices, grid.index_to_coordinate(index)))
        .count()
}

/// Even-odd ray cast against a closed polygon.
fn encloses(vertices: &[Coordinate], point: Coordinate) -> bool {
    let (x, y) = (point.x as f64, point.y as f64);

    vertices
        .iter()
        .circular_tuple_windows()
        .filter(|(a, b)| {
            let (xa, ya) = (a.x as f64, a.y as f64);
            let (xb, yb) = (b.x as f64, b.y as f64);
            (ya > y) != (yb > y) && x < (xb - xa) * (y - ya) / (yb - ya) + xa
        })
        .count()
        % 2
        == 1
}
