use crate::utils::error::PuzzleError;
use crate::utils::grid::{Coordinate, Grid, grid_cell};
use crate::utils::torus::{Torus, TorusPos};
use crate::utils::traversal::{Profile, profile, reach};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const STEPS: usize = 64;
const INFINITE_STEPS: usize = 26_501_365;

/// Whole tiles walked before the first sample used for extrapolation.
const WARM_UP_TILES: usize = 1;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs", "torus"])]
pub struct Solver;

grid_cell! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Plot {
        Garden = '.',
        Rock = '#',
        Start = 'S',
    }
}

#[derive(Debug)]
pub struct Garden {
    grid: Grid<Plot>,
    start: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = input.parse::<Grid<Plot>>()?;
        let start = grid
            .position(|&plot| plot == Plot::Start)
            .ok_or(PuzzleError::MissingMarker('S'))?;
        Ok(Garden { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.plots_after(STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.tiled_plots_after(INFINITE_STEPS)?.to_string())
    }
}

impl Garden {
    /// Plots the gardener can stand on after exactly `steps` steps.
    pub fn plots_after(&self, steps: usize) -> usize {
        let grid = &self.grid;
        reach(self.start, steps, |&index| index, |index, out| {
            out.extend(
                grid.neighbors(*index)
                    .iter()
                    .filter(|(_, neighbor)| *neighbor.value != Plot::Rock)
                    .map(|(_, neighbor)| neighbor.index),
            )
        })
        .exact
    }

    /// Same as [`Garden::plots_after`] on the garden repeated infinitely.
    pub fn plots_after_on_torus(&self, steps: usize) -> usize {
        self.torus_profile(steps).exact(steps)
    }

    fn torus_profile(&self, budget: usize) -> Profile {
        let torus = Torus::new(&self.grid);
        profile(TorusPos::origin(self.start), budget, |&pos| pos, |pos, out| {
            out.extend(
                torus
                    .neighbors(*pos)
                    .into_iter()
                    .map(|(_, next)| next)
                    .filter(|&next| *torus.cell(next) != Plot::Rock),
            )
        })
    }

    /// Plots reachable in exactly `steps` on the infinite garden.
    ///
    /// With `n` the side length and `steps = r + k * n`, the plot count is a
    /// quadratic in `k` once the first tiles are behind the walker, provided
    /// the garden is square, the walk starts in its centre and the border
    /// and centre lanes are free of rocks. On an odd side the tiles alternate
    /// parity, so only `k` of the same parity as the target are sampled.
    /// Three samples fix the quadratic and a fourth must agree with it.
    /// Step counts within the sampled range are walked directly.
    pub fn tiled_plots_after(&self, steps: usize) -> Result<usize, PuzzleError> {
        let side = self.grid.columns();
        let centre = Coordinate {
            x: side / 2,
            y: side / 2,
        };
        if self.grid.rows() != side {
            return Err(PuzzleError::Unsupported(format!(
                "garden is {}x{}, expected a square",
                side,
                self.grid.rows()
            )));
        }
        if self.grid.index_to_coordinate(self.start) != centre {
            return Err(PuzzleError::Unsupported(
                "start is not in the centre of the garden".into(),
            ));
        }

        let (tiles, remainder) = (steps / side, steps % side);
        let first = WARM_UP_TILES + (tiles + WARM_UP_TILES) % 2;
        let check = first + 6;

        let walked = self.torus_profile(remainder + check * side);
        if steps <= walked.budget() {
            return Ok(walked.exact(steps));
        }

        let middle = side / 2;
        let blocked = (0..self.grid.len()).any(|index| {
            let Coordinate { x, y } = self.grid.index_to_coordinate(index);
            let lane = [x, y].iter().any(|&v| v == 0 || v == middle || v == side - 1);
            lane && self.grid[index] == Plot::Rock
        });
        if blocked {
            return Err(PuzzleError::Unsupported(
                "rocks on the garden border or centre lanes".into(),
            ));
        }

        let plots = |k: usize| walked.exact(remainder + k * side);
        let samples = [first, first + 2, first + 4].map(plots);
        if extrapolate(samples, 3) != Some(plots(check)) {
            return Err(PuzzleError::Unsupported(
                "plot count does not grow quadratically from tile to tile".into(),
            ));
        }

        extrapolate(samples, (tiles - first) / 2)
            .ok_or_else(|| PuzzleError::Unsupported("plot count out of range".into()))
    }
}

/// Value at `n` of the quadratic through `(0, a)`, `(1, b)`, `(2, c)`.
fn extrapolate([a, b, c]: [usize; 3], n: usize) -> Option<usize> {
    let (a, b, c, n) = (
        i128::try_from(a).ok()?,
        i128::try_from(b).ok()?,
        i128::try_from(c).ok()?,
        i128::try_from(n).ok()?,
    );
    let value = a + n * (b - a) + n * (n - 1) / 2 * (c - 2 * b + a);
    usize::try_from(value).ok()
}
