use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistryBuilder,
    SolveError, Solver,
};

#[derive(Debug, Clone)]
struct SharedData {
    rows: Vec<String>,
    widest: Option<usize>,
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 25, tags = ["macro-test", "dependent"])]
struct DependentSolver;

impl AocParser for DependentSolver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows: Vec<String> = input.lines().map(str::to_owned).collect();
        if rows.is_empty() {
            return Err(ParseError::MissingData("no rows".into()));
        }
        Ok(SharedData { rows, widest: None })
    }
}

impl PartSolver<1> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared.rows.iter().map(String::len).max().unwrap_or(0);
        shared.widest = Some(widest);
        Ok(widest.to_string())
    }
}

impl PartSolver<2> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared
            .widest
            .unwrap_or_else(|| shared.rows.iter().map(String::len).max().unwrap_or(0));
        Ok((widest * shared.rows.len()).to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 24, tags = ["macro-test"])]
struct SinglePartSolver;

impl AocParser for SinglePartSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for SinglePartSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<DependentSolver as Solver>::PARTS, 2);
    assert_eq!(<SinglePartSolver as Solver>::PARTS, 1);
}

#[test]
fn test_dispatch_reaches_each_part() {
    let mut shared = DependentSolver::parse("ab\nabcd\nabc").unwrap();

    assert_eq!(DependentSolver::solve_part(&mut shared, 1).unwrap(), "4");
    assert_eq!(shared.widest, Some(4));
    assert_eq!(DependentSolver::solve_part(&mut shared, 2).unwrap(), "12");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = SinglePartSolver::parse("abc").unwrap();

    assert!(matches!(
        SinglePartSolver::solve_part(&mut shared, 2),
        Err(SolveError::PartNotImplemented(2))
    ));
    assert!(matches!(
        SinglePartSolver::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}

#[test]
fn test_plugins_register_by_tag() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"dependent"))
        .unwrap()
        .build();

    assert!(registry.contains(2015, 25));
    assert!(!registry.contains(2015, 24));

    let mut solver = registry.create_solver(2015, 25, "xy\nxyz").unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "6");
}

#[test]
fn test_all_plugins_registered() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert_eq!(registry.len(), 2);
    let mut solver = registry.create_solver(2015, 24, "grid").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "dirg");
}
