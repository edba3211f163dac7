//! Parsed puzzle state and the timing around it
//!
//! One [`SolverInstance`] is created per puzzle input. Its shared data lives
//! across part calls, so a result cached by part 1 (the traced pipe loop,
//! the settled platform) is still there when part 2 runs.

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock span of one parse or solve call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Timing {
    fn measure<T>(run: impl FnOnce() -> T) -> (T, Self) {
        let start = Utc::now();
        let value = run();
        (value, Self { start, end: Utc::now() })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    fn micros(&self) -> i64 {
        self.duration().num_microseconds().unwrap_or_default()
    }
}

/// Answer to one part
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub timing: Timing,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.timing.duration()
    }
}

/// A puzzle input parsed by `S`, ready to have its parts solved
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed: Timing,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input`; a malformed grid or missing marker fails here, before
    /// any part runs.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed) = Timing::measure(|| S::parse(input));
        let shared = shared?;
        log::debug!("parsed {}/{:02} in {}µs", year, day, parsed.micros());

        Ok(Self {
            year,
            day,
            shared,
            parsed,
        })
    }
}

/// Object-safe face of [`SolverInstance`], as handed out by the registry
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("{}/{:02} part {}: {}", solver.year(), solver.day(), part, result.answer);
///     }
///     println!("parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve one part; parts outside `1..=parts()` are rejected
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_timing(&self) -> Timing;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_timing().duration()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, timing) =
            Timing::measure(|| S::solve_part_checked_range(&mut self.shared, part));
        let answer = answer?;
        log::debug!(
            "solved {}/{:02} part {} in {}µs",
            self.year,
            self.day,
            part,
            timing.micros()
        );

        Ok(SolveResult { answer, timing })
    }

    fn parse_timing(&self) -> Timing {
        self.parsed
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
