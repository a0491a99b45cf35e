//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags every selected solver must carry
    pub tags: Vec<String>,
    /// Root of the input and answer files
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Whether to write answers back to the answers files
    pub record: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Default log filter when RUST_LOG is unset
    pub log_level: &'static str,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        let tags: Vec<String> = args
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            record: args.record,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Result<Config, CliError> {
        let args = Args::try_parse_from(std::iter::once("aoc").chain(args.iter().copied()))
            .map_err(|e| CliError::Config(e.to_string()))?;
        Config::from_args(args)
    }

    #[test]
    fn defaults() {
        let config = config(&["--input-dir", "inputs"]).unwrap();
        assert_eq!(config.year_filter, None);
        assert_eq!(config.parallelize_by, ParallelizeBy::Day);
        assert_eq!(config.input_dir, PathBuf::from("inputs"));
        assert!(config.thread_count >= 1);
        assert_eq!(config.log_level, "warn");
        assert!(!config.record);
    }

    #[test]
    fn filters_and_tags() {
        let config = config(&["-y", "2024", "-d", "7", "-p", "2", "--tags", "grid, dp,"]).unwrap();
        assert_eq!(config.year_filter, Some(2024));
        assert_eq!(config.day_filter, Some(7));
        assert_eq!(config.part_filter, Some(2));
        assert_eq!(config.tags, vec!["grid".to_string(), "dp".to_string()]);
    }

    #[test]
    fn out_of_range_day_and_part_are_rejected() {
        assert!(config(&["--day", "26"]).is_err());
        assert!(config(&["--part", "3"]).is_err());
        assert!(config(&["--threads", "0"]).is_err());
    }

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(config(&["-vv"]).unwrap().log_level, "debug");
        assert_eq!(config(&["-vvvv"]).unwrap().log_level, "trace");
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
        assert_eq!(expand_tilde(Path::new("rel/~x")), PathBuf::from("rel/~x"));
    }
}
