//! Output formatting for solver results

use crate::executor::{SolverResult, Verdict};
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Totals printed after the last result
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub passes: usize,
    pub mismatches: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    pub fn from_results(results: &[SolverResult]) -> Self {
        results.iter().fold(Self::default(), |mut s, r| {
            if r.answer.is_ok() {
                s.solved += 1;
                s.parse_time += r.parse_duration.unwrap_or_default();
                s.solve_time += r.solve_duration;
            } else {
                s.failed += 1;
            }
            match r.verdict() {
                Verdict::Pass => s.passes += 1,
                Verdict::Fail { .. } => s.mismatches += 1,
                Verdict::Unchecked => {}
            }
            s
        })
    }

    /// Whether the run should exit non-zero
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.mismatches > 0
    }
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Wall-clock time since the formatter was created
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(_), _) => eprintln!("{}", format_result(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }

        let compute_time = summary.parse_time + summary.solve_time;
        let elapsed = self.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!(
            "Answers: {} passed, {} failed",
            summary.passes, summary.mismatches
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if !elapsed.is_zero() {
            let compute_secs = compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

/// One result line: answer, timings and verdict
pub fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    let answer = match &result.answer {
        Ok(answer) => answer,
        Err(e) => return format!("{prefix}: Error - {e}"),
    };
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let verdict = match result.verdict() {
        Verdict::Pass => " ✓ PASS".to_string(),
        Verdict::Fail { expected } => format!(" ✗ FAIL (expected {expected})"),
        Verdict::Unchecked => String::new(),
    };

    format!(
        "{prefix}: {answer} ({parse_timing}solve: {}){verdict}",
        format_duration(result.solve_duration)
    )
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
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

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d)
        .map(format_duration)
        .unwrap_or_else(|_| format!("{:.2}s", d.as_secs_f64()))
}
