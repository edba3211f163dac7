use crate::utils::grid::{Direction, Directions, Grid, grid_cell};
use crate::utils::traversal::{Step, Transition, Visit, Walk, breadth_first, steer};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "bfs"])]
pub struct Solver;

grid_cell! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Tile {
        Empty = '.',
        Mirror = '/',
        BackMirror = '\\',
        FlatSplitter = '-',
        UprightSplitter = '|',
    }
}

impl Transition for Tile {
    fn exits(&self, heading: Option<Direction>) -> Directions {
        let Some(heading) = heading else {
            return Directions::empty();
        };

        match self {
            Tile::Empty => heading.into(),
            Tile::Mirror => match heading {
                Direction::Up => Direction::Right,
                Direction::Right => Direction::Up,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Down,
            }
            .into(),
            Tile::BackMirror => match heading {
                Direction::Up => Direction::Left,
                Direction::Right => Direction::Down,
                Direction::Down => Direction::Right,
                Direction::Left => Direction::Up,
            }
            .into(),
            Tile::FlatSplitter if Directions::VERTICAL.contains(heading.into()) => {
                Directions::HORIZONTAL
            }
            Tile::UprightSplitter if Directions::HORIZONTAL.contains(heading.into()) => {
                Directions::VERTICAL
            }
            Tile::FlatSplitter | Tile::UprightSplitter => heading.into(),
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.parse::<Grid<Tile>>()?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let entry = Step {
            index: 0,
            heading: Some(Direction::Right),
        };
        Ok(energized(shared, entry).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .border_entries()
            .into_iter()
            .map(|(index, heading)| {
                energized(
                    shared,
                    Step {
                        index,
                        heading: Some(heading),
                    },
                )
            })
            .max()
            .unwrap_or_default();
        Ok(best.to_string())
    }
}

struct Beam<'g> {
    grid: &'g Grid<Tile>,
    lit: Vec<bool>,
    count: usize,
}

impl Walk for Beam<'_> {
    type Node = Step;
    type Key = Step;

    fn key(&self, node: &Step) -> Step {
        *node
    }

    fn visit(&mut self, node: &Step, _depth: usize) -> Visit {
        if !self.lit[node.index] {
            self.lit[node.index] = true;
            self.count += 1;
        }
        Visit::Expand
    }

    fn successors(&self, node: &Step, _depth: usize, out: &mut Vec<Step>) {
        out.extend(steer(self.grid, *node));
    }
}

/// Tiles a beam passes through when it enters the grid at `entry`.
pub fn energized(grid: &Grid<Tile>, entry: Step) -> usize {
    let mut beam = Beam {
        grid,
        lit: vec![false; grid.len()],
        count: 0,
    };
    breadth_first(&mut beam, [entry]);
    beam.count
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn test_parts() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "46");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "51");
    }

    #[test]
    fn test_round_trip_keeps_backslashes() {
        let grid = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(grid.to_string(), SAMPLE);
    }

    #[test]
    fn test_splitter_sends_beam_both_ways() {
        let grid = <Solver as AocParser>::parse("...\n.|.\n...").unwrap();
        let entry = Step {
            index: 3,
            heading: Some(Direction::Right),
        };
        assert_eq!(energized(&grid, entry), 4);
    }

    #[test]
    fn test_beam_loop_terminates() {
        let grid = <Solver as AocParser>::parse(r"/.\
...
\./").unwrap();
        let entry = Step {
            index: 1,
            heading: Some(Direction::Right),
        };
        assert_eq!(energized(&grid, entry), 8);
    }
}
