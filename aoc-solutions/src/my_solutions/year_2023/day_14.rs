use crate::utils::grid::{Direction, Grid, grid_cell};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

const SPIN_CYCLES: usize = 1_000_000_000;

/// One spin cycle tilts the platform in this order.
const SPIN: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle"])]
pub struct Solver;

grid_cell! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Rock {
        Round = 'O',
        Cube = '#',
        Empty = '.',
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Rock>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.parse::<Grid<Rock>>()?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        tilt(&mut platform, Direction::Up);
        Ok(north_load(&platform).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(load_after_spins(shared.clone(), SPIN_CYCLES).to_string())
    }
}

/// Roll every round rock as far as it goes in `direction`.
pub fn tilt(platform: &mut Grid<Rock>, direction: Direction) {
    let (columns, rows) = (platform.columns(), platform.rows());
    let (lanes, length) = match direction {
        Direction::Up | Direction::Down => (columns, rows),
        Direction::Left | Direction::Right => (rows, columns),
    };
    // offset 0 is the edge the rocks roll towards
    let at = |lane: usize, offset: usize| match direction {
        Direction::Up => offset * columns + lane,
        Direction::Down => (rows - 1 - offset) * columns + lane,
        Direction::Left => lane * columns + offset,
        Direction::Right => lane * columns + columns - 1 - offset,
    };

    for lane in 0..lanes {
        let mut free = 0;
        for offset in 0..length {
            let index = at(lane, offset);
            match platform[index] {
                Rock::Cube => free = offset + 1,
                Rock::Round => {
                    platform[index] = Rock::Empty;
                    platform[at(lane, free)] = Rock::Round;
                    free += 1;
                }
                Rock::Empty => {}
            }
        }
    }
}

pub fn spin(platform: &mut Grid<Rock>) {
    for direction in SPIN {
        tilt(platform, direction);
    }
}

/// Each round rock weighs as many rows as it is from the south edge.
pub fn north_load(platform: &Grid<Rock>) -> usize {
    platform
        .row_slices()
        .enumerate()
        .map(|(y, row)| {
            let rounds = row.iter().filter(|&&rock| rock == Rock::Round).count();
            rounds * (platform.rows() - y)
        })
        .sum()
}

/// North load after `cycles` spins, skipping ahead once a layout repeats.
fn load_after_spins(mut platform: Grid<Rock>, cycles: usize) -> usize {
    let mut seen = HashMap::new();
    let mut history = Vec::new();

    for cycle in 0..cycles {
        if let Some(&first) = seen.get(&platform) {
            let period = cycle - first;
            return north_load(&history[first + (cycles - first) % period]);
        }
        seen.insert(platform.clone(), cycle);
        history.push(platform.clone());
        spin(&mut platform);
    }

    north_load(&platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....";

    const TILTED_NORTH: &str = "\
OOOO.#.O..
OO..#....#
OO..O##..O
O..#.OO...
........#.
..#....#.#
..O..#.O.O
..O.......
#....###..
#....#....";

    const ONE_CYCLE: &str = "\
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....";

    #[test]
    fn test_tilt_north() {
        let mut platform = <Solver as AocParser>::parse(SAMPLE).unwrap();
        tilt(&mut platform, Direction::Up);

        assert_eq!(platform.to_string(), TILTED_NORTH);
        assert_eq!(north_load(&platform), 136);
    }

    #[test]
    fn test_single_spin() {
        let mut platform = <Solver as AocParser>::parse(SAMPLE).unwrap();
        spin(&mut platform);
        assert_eq!(platform.to_string(), ONE_CYCLE);
    }

    #[test]
    fn test_parts() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "136");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "64");
    }

    #[test]
    fn test_short_spin_counts_match_direct_simulation() {
        let platform = <Solver as AocParser>::parse(SAMPLE).unwrap();
        let mut direct = platform.clone();
        for cycles in 0..30 {
            assert_eq!(load_after_spins(platform.clone(), cycles), north_load(&direct));
            spin(&mut direct);
        }
    }

    #[test]
    fn test_tilt_each_way() {
        let mut platform: Grid<Rock> = ".O#O.\n.....".parse().unwrap();
        tilt(&mut platform, Direction::Right);
        assert_eq!(platform.to_string(), ".O#.O\n.....");
        tilt(&mut platform, Direction::Left);
        assert_eq!(platform.to_string(), "O.#O.\n.....");
        tilt(&mut platform, Direction::Down);
        assert_eq!(platform.to_string(), "..#..\nO..O.");
    }
}
