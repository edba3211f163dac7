//! Output formatting for solver results

use crate::runner::SolverResult;
use aoc_solver::FactoryInfo;
use chrono::TimeDelta;
use std::time::Instant;

/// Running totals for the summary line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Tally {
    pub fn record(&mut self, result: &SolverResult) {
        if result.answer.is_ok() {
            self.solved += 1;
            self.parse_time += result.parse_duration.unwrap_or_default();
            self.solve_time += result.solve_duration;
        } else {
            self.failed += 1;
        }
    }
}

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) if self.quiet => println!("{}", answer),
            Ok(_) => println!("{}", format_line(result)),
            Err(e) if self.quiet => eprintln!("Error: {}", e),
            Err(_) => eprintln!("{}", format_line(result)),
        }
    }

    /// Print the totals and wall-clock time
    pub fn print_summary(&self, tally: &Tally) {
        if self.quiet {
            return;
        }

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", tally.solved, tally.failed);
        println!("Total parse time: {}", format_duration(tally.parse_time));
        println!("Total solve time: {}", format_duration(tally.solve_time));
        let elapsed = TimeDelta::from_std(self.start_time.elapsed()).unwrap_or(TimeDelta::MAX);
        println!("Elapsed wall-clock time: {}", format_duration(elapsed));
    }
}

/// `2023/17 Part 1: 102 (parse: 12µs, solve: 1.20ms)`
fn format_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

/// `2023/17 (2 parts) [grid, dijkstra]`
pub fn format_info(info: &FactoryInfo) -> String {
    format!(
        "{}/{:02} ({} parts) [{}]",
        info.year,
        info.day,
        info.parts,
        info.tags.join(", ")
    )
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
