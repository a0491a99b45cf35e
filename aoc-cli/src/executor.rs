//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the result that paid for parsing the input
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
    /// Recorded answer for this part, if the answers file has one
    pub expected: Option<String>,
}

/// Outcome of comparing an answer with the recorded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { expected: String },
    /// No recorded answer, or no answer to compare
    Unchecked,
}

impl SolverResult {
    pub fn verdict(&self) -> Verdict {
        match (&self.answer, &self.expected) {
            (Ok(answer), Some(expected)) if answer == expected => Verdict::Pass,
            (Ok(_), Some(expected)) => Verdict::Fail {
                expected: expected.clone(),
            },
            _ => Verdict::Unchecked,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    store: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.sync_executor_config.store
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Work items whose input file is absent
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        work_items
            .iter()
            .filter(|w| !self.store().contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;
        debug!(
            items = work_items.len(),
            mode = ?cfg.parallelize_by,
            threads = self.thread_pool.current_num_threads(),
            "scheduling work"
        );

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel(by_year, &tx)
            }
            // Part mode additionally splits each item's parts in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel(singles, &tx)
            }
        }
    }

    /// Run groups in parallel; items inside a group run in order
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, cfg) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(ArcExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run given the part filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// A result carrying the same error for a part that never ran
fn error_result(
    work: &WorkItem,
    part: u8,
    error: ArcExecutorError,
    expected: Option<String>,
) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
        expected,
    }
}

/// Load the input and answers for one puzzle and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let answers = cfg.store.read_answers(year, day).unwrap_or_else(|e| {
        warn!(year, day, error = %e, "ignoring unreadable answers file");
        Vec::new()
    });
    let expected = |part: u8| answers.get(usize::from(part) - 1).cloned().flatten();

    let input = match cfg.store.read_input(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error: ArcExecutorError = ExecutorError::Input { year, day, source }.into();
            for part in work.parts.clone() {
                send(tx, error_result(work, part, error.clone(), expected(part)))?;
            }
            return Ok(());
        }
    };

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, cfg, &expected)
    } else {
        run_parts_sequential(work, &input, tx, cfg, &expected)
    }
}

/// Parse once, then solve parts in order so later parts see earlier caches
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
    expected: &(dyn Fn(u8) -> Option<String> + Sync),
) -> Result<(), ArcExecutorError> {
    let mut solver = match cfg.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let error: ArcExecutorError = ExecutorError::Solver(e).into();
            for part in work.parts.clone() {
                send(tx, error_result(work, part, error.clone(), expected(part)))?;
            }
            return Ok(());
        }
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(work, part, &mut *solver, expected(part));
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

/// Every part gets its own parse so parts can run on separate threads
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
    expected: &(dyn Fn(u8) -> Option<String> + Sync),
) -> Result<(), ArcExecutorError> {
    work.parts
        .clone()
        .into_par_iter()
        .filter_map(|part| {
            let result = match cfg.registry.create_solver(work.year, work.day, input) {
                Ok(mut solver) => {
                    let mut result = solve_part(work, part, &mut *solver, expected(part));
                    result.parse_duration = Some(solver.parse_duration());
                    result
                }
                Err(e) => error_result(
                    work,
                    part,
                    ExecutorError::Solver(e).into(),
                    expected(part),
                ),
            };
            send(tx, result).err()
        })
        .reduce_with(ArcExecutorError::combine)
        .map_or(Ok(()), Err)
}

fn solve_part(
    work: &WorkItem,
    part: u8,
    solver: &mut dyn DynSolver,
    expected: Option<String>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Err(e) => (
            Err(ExecutorError::Solver(SolverError::SolveError(e)).into()),
            TimeDelta::zero(),
        ),
    };
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer,
        parse_duration: None,
        solve_duration,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    /// Sums the numbers in the input; part 2 doubles the sum
    #[derive(aoc_solver::AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Summer;

    impl AocParser for Summer {
        type SharedData<'a> = Vec<i64>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Summer {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Summer {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok((2 * shared.iter().sum::<i64>()).to_string())
        }
    }

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<Summer>(2015, 1)
            .and_then(|b| b.register::<Summer>(2015, 2))
            .and_then(|b| b.register::<Summer>(2016, 1))
            .unwrap()
            .build();
        let dir = dir.path().to_str().unwrap();
        let args = Args::try_parse_from(
            ["aoc", "--input-dir", dir].iter().chain(extra.iter()).copied(),
        )
        .unwrap();
        let config = Config::from_args(args).unwrap();
        Executor::new(registry, &config).unwrap()
    }

    fn write(dir: &TempDir, year: u16, name: &str, text: &str) {
        let path = dir.path().join(year.to_string());
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(name), text).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn work_items_follow_filters() {
        let dir = TempDir::new().unwrap();
        let all = executor(&dir, &[]).collect_work_items();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].parts, 1..=2);

        let filtered = executor(&dir, &["--year", "2015", "--part", "2"]).collect_work_items();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|w| w.parts == (2..=2)));
    }

    #[test]
    fn part_beyond_solver_is_skipped() {
        assert!(filter_parts(Some(2), 1).is_empty());
        assert_eq!(filter_parts(None, 1), 1..=1);
    }

    #[test]
    fn missing_inputs_are_listed() {
        let dir = TempDir::new().unwrap();
        write(&dir, 2015, "day01.txt", "1 2 3");
        let executor = executor(&dir, &[]);
        let items = executor.collect_work_items();
        assert_eq!(executor.missing_inputs(&items), vec![(2015, 2), (2016, 1)]);
    }

    #[test]
    fn verdicts_follow_answers_file() {
        for mode in ["sequential", "year", "day", "part"] {
            let dir = TempDir::new().unwrap();
            write(&dir, 2015, "day01.txt", "1 2 3");
            write(&dir, 2015, "day01.answers", "6\n13\n");
            write(&dir, 2015, "day02.txt", "1 x");
            let results = run(&executor(&dir, &["--parallelize-by", mode]));

            assert_eq!(results.len(), 6, "mode {mode}");
            assert_eq!(results[0].verdict(), Verdict::Pass);
            assert_eq!(
                results[1].verdict(),
                Verdict::Fail {
                    expected: "13".to_string()
                }
            );
            assert_eq!(results[1].answer.as_deref().ok(), Some("12"));
            // 2015/02 fails to parse, 2016/01 has no input
            assert!(results[2..].iter().all(|r| r.answer.is_err()));
            assert!(results[2..].iter().all(|r| r.verdict() == Verdict::Unchecked));
        }
    }

    #[test]
    fn sequential_parts_share_one_parse() {
        let dir = TempDir::new().unwrap();
        write(&dir, 2015, "day01.txt", "4 5");
        let results = run(&executor(&dir, &["--day", "1", "--year", "2015"]));
        assert_eq!(results.len(), 2);
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }
}
