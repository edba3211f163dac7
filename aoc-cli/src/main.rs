//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod config;
mod error;
mod inputs;
mod output;
mod runner;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use output::{OutputFormatter, Tally};
use runner::Runner;

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    log::debug!("{:?}", config);

    let registry = build_registry(&config.tags)?;
    let runner = Runner::new(&registry, &config);

    let work_items = runner.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    if config.list {
        for info in work_items
            .iter()
            .filter_map(|item| registry.get_info(item.year, item.day))
        {
            println!("{}", output::format_info(&info));
        }
        return Ok(());
    }

    let missing = runner.missing_inputs(&work_items);
    if !missing.is_empty() && !config.quiet {
        println!("Missing {} input file(s):", missing.len());
        for item in &missing {
            println!("  - {}", runner.input_path(item).display());
        }
        println!();
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let formatter = OutputFormatter::new(config.quiet);
    let mut tally = Tally::default();
    runner.run(&work_items, |result| {
        formatter.print_result(&result);
        tally.record(&result);
    });
    formatter.print_summary(&tally);

    Ok(())
}

/// Build registry, keeping only plugins that carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
