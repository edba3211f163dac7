//! Sequential runner: selects registered solvers, loads inputs, solves parts

use crate::config::Config;
use crate::error::CliError;
use crate::inputs::InputStore;
use aoc_solver::SolverRegistry;
use chrono::TimeDelta;
use itertools::Itertools;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Result from a single part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, Arc<CliError>>,
    /// Only set on the first part run for a day; later parts reuse the parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// A selected solver and the parts to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

pub struct Runner<'r> {
    registry: &'r SolverRegistry,
    inputs: InputStore,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl<'r> Runner<'r> {
    pub fn new(registry: &'r SolverRegistry, config: &Config) -> Self {
        Self {
            registry,
            inputs: InputStore::new(config.input_dir.clone()),
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        }
    }

    /// Solvers matching the filters, ordered by (year, day)
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .sorted()
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|item| !item.parts.is_empty())
            .collect()
    }

    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Work items with no saved input
    pub fn missing_inputs<'w>(&self, items: &'w [WorkItem]) -> Vec<&'w WorkItem> {
        items
            .iter()
            .filter(|item| !self.inputs.contains(item.year, item.day))
            .collect()
    }

    pub fn input_path(&self, item: &WorkItem) -> std::path::PathBuf {
        self.inputs.path(item.year, item.day)
    }

    /// Run every item in order, handing each part's result to `sink` as soon
    /// as it is available
    pub fn run<F>(&self, items: &[WorkItem], mut sink: F)
    where
        F: FnMut(SolverResult),
    {
        for item in items {
            self.run_item(item, &mut sink);
        }
    }

    fn run_item<F>(&self, item: &WorkItem, sink: &mut F)
    where
        F: FnMut(SolverResult),
    {
        log::info!("running {}/{:02}", item.year, item.day);

        let input = match self.inputs.read(item.year, item.day) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("{}", e);
                return fail_all(item, CliError::from(e), sink);
            }
        };

        let mut solver = match self.registry.create_solver(item.year, item.day, &input) {
            Ok(solver) => solver,
            Err(e) => {
                log::warn!("{}/{:02}: {}", item.year, item.day, e);
                return fail_all(item, CliError::from(e), sink);
            }
        };

        let mut parse_duration = Some(solver.parse_duration());
        for part in item.parts.clone() {
            let (answer, solve_duration) = match solver.solve(part) {
                Ok(result) => {
                    let duration = result.duration();
                    (Ok(result.answer), duration)
                }
                Err(e) => {
                    let error = CliError::Solver(aoc_solver::SolverError::SolveError(e));
                    (Err(Arc::new(error)), TimeDelta::zero())
                }
            };
            sink(SolverResult {
                year: item.year,
                day: item.day,
                part,
                answer,
                parse_duration: parse_duration.take(),
                solve_duration,
            });
        }
    }
}

/// Report the same setup failure against every requested part
fn fail_all<F>(item: &WorkItem, error: CliError, sink: &mut F)
where
    F: FnMut(SolverResult),
{
    let error = Arc::new(error);
    for part in item.parts.clone() {
        sink(SolverResult {
            year: item.year,
            day: item.day,
            part,
            answer: Err(Arc::clone(&error)),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        });
    }
}
