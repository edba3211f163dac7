//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default input directory
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";

const DEFAULT_INPUT_DIR: &str = "~/.cache/aoc_solver/inputs";

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags a solver must all carry to be selected
    pub tags: Vec<String>,
    /// Directory holding the puzzle inputs
    pub input_dir: PathBuf,
    /// List solvers instead of running them
    pub list: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var_os(INPUT_DIR_ENV))
    }

    /// Input directory precedence: `--input-dir`, then `env_input_dir`, then the default.
    fn resolve(args: Args, env_input_dir: Option<OsString>) -> Result<Self, CliError> {
        let input_dir = args
            .input_dir
            .or_else(|| env_input_dir.filter(|dir| !dir.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let tags: Vec<String> = args
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let input_dir = expand_tilde(&input_dir);
        if input_dir.exists() && !input_dir.is_dir() {
            return Err(CliError::Config(format!(
                "input directory {} is not a directory",
                input_dir.display()
            )));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags,
            input_dir,
            list: args.list,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
