//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers on local inputs", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}_day{day:02}.txt` inputs
    /// [default: $AOC_INPUT_DIR or ~/.cache/aoc_solver/inputs]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// List matching solvers without running them
    #[arg(short, long)]
    pub list: bool,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        let args = Args::try_parse_from([
            "aoc", "--year", "2023", "-d", "17", "-p", "2", "--tags", "grid,bfs",
        ])
        .unwrap();

        assert_eq!(args.year, Some(2023));
        assert_eq!(args.day, Some(17));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["grid", "bfs"]);
        assert!(!args.quiet);
        assert!(args.input_dir.is_none());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
