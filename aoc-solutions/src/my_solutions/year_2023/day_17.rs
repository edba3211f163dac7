use crate::utils::error::PuzzleError;
use crate::utils::grid::Grid;
use crate::utils::shortest_path::{RunLimits, StateKey, least_cost};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let digit = |c: char| c.to_digit(10).and_then(|d| u8::try_from(d).ok());
        Ok(Grid::parse_with(input, digit)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        minimal_heat_loss(shared, RunLimits::default())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        minimal_heat_loss(shared, RunLimits::new(4, 10)?)
    }
}

fn minimal_heat_loss(city: &Grid<u8>, limits: RunLimits) -> Result<String, SolveError> {
    let cost = least_cost(city, limits, StateKey::Heading)
        .ok_or(PuzzleError::NotFound("route to the factory"))?;
    Ok(cost.to_string())
}
