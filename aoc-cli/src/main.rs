//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, SolverResult};
use inputs::InputStore;
use itertools::Itertools;
use output::{OutputFormatter, Summary};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(summary) if summary.has_failures() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the `-v` derived level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(args: Args) -> Result<Summary, CliError> {
    let config = Config::from_args(args)?;
    init_tracing(config.log_level);
    info!(input_dir = %config.input_dir.display(), "starting");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Executor(e.into()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(Summary::default());
    }

    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() && !config.quiet {
        println!("Missing {} input file(s):", missing.len());
        for &(year, day) in &missing {
            println!("  - {}", executor.store().input_path(year, day).display());
        }
    }

    // Wall-clock time in the summary starts here, before any solver runs
    let formatter = OutputFormatter::new(config.quiet);
    let store = executor.store().clone();
    let results = run_executor(executor, &formatter)?;

    if config.record {
        record_answers(&store, &results);
    }

    let summary = Summary::from_results(&results);
    formatter.print_summary(&summary);
    Ok(summary)
}

/// Run the executor and collect results in (year, day, part) order
fn run_executor(
    executor: Executor,
    formatter: &OutputFormatter,
) -> Result<Vec<SolverResult>, CliError> {
    let work_items = executor.collect_work_items();
    if !formatter.is_quiet() {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    Ok(results)
}

/// Write successful answers back as the expected answers of each day
fn record_answers(store: &InputStore, results: &[SolverResult]) {
    let by_day = results
        .iter()
        .filter_map(|r| r.answer.as_deref().ok().map(|a| ((r.year, r.day), (r.part, a))))
        .into_group_map();

    for ((year, day), answers) in by_day.into_iter().sorted_unstable_by_key(|&(k, _)| k) {
        match store.record_answers(year, day, &answers) {
            Ok(()) => info!(year, day, parts = answers.len(), "recorded answers"),
            Err(e) => warn!("could not record answers for {year}/{day:02}: {e}"),
        }
    }
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
