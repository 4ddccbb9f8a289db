//! Named multi-benchmark suites.
//!
//! A [`BenchmarkSuite`] is an ordered registry of (name, unit-of-work) pairs.
//! Running it executes each entry as an independent [`Benchmark`] with a
//! shared iteration count and the default warmup count, returning results in
//! registration order. Progress is printed to stdout as each entry finishes;
//! the printed text is observability output only, never data the suite
//! returns.

use colored::Colorize;

use crate::benchmark::{Benchmark, BenchmarkResult, DEFAULT_WARMUP_ITERATIONS};
use crate::output::terminal::format_summary_line;

/// One registered suite entry.
struct SuiteEntry {
    name: String,
    work: Box<dyn FnMut()>,
}

/// Ordered registry of independently run benchmarks.
#[derive(Default)]
pub struct BenchmarkSuite {
    entries: Vec<SuiteEntry>,
}

impl BenchmarkSuite {
    /// Create an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit of work. Duplicate names are permitted; both entries run
    /// independently.
    pub fn add<F>(&mut self, name: impl Into<String>, work: F)
    where
        F: FnMut() + 'static,
    {
        self.entries.push(SuiteEntry {
            name: name.into(),
            work: Box::new(work),
        });
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every entry in registration order with the given measured
    /// iteration count and the default warmup count.
    ///
    /// Prints a header and one summary line per finished entry.
    pub fn run(&mut self, iterations: usize) -> Vec<BenchmarkResult> {
        log::debug!(
            "running suite: {} entries, {} iterations each",
            self.entries.len(),
            iterations
        );
        println!(
            "{}",
            format!(
                "Running {} benchmarks ({} iterations each)",
                self.entries.len(),
                iterations
            )
            .bold()
        );

        let mut results = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            let benchmark = Benchmark::new(entry.name.clone())
                .iterations(iterations)
                .warmup_iterations(DEFAULT_WARMUP_ITERATIONS);
            let result = benchmark.run(&mut entry.work);
            println!("{}", format_summary_line(&result));
            results.push(result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_follow_registration_order() {
        let mut suite = BenchmarkSuite::new();
        for name in ["A", "B", "C"] {
            suite.add(name, || {});
        }

        let results = suite.run(10);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(results.iter().all(|r| r.durations.len() == 10));
    }

    #[test]
    fn test_duplicate_names_run_independently() {
        let mut suite = BenchmarkSuite::new();
        suite.add("same", || {});
        suite.add("same", || {});
        assert_eq!(suite.len(), 2);

        let results = suite.run(5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "same");
        assert_eq!(results[1].name, "same");
    }

    #[test]
    fn test_empty_suite_runs_to_empty_results() {
        let mut suite = BenchmarkSuite::new();
        assert!(suite.is_empty());
        assert!(suite.run(10).is_empty());
    }

    #[test]
    fn test_entries_observe_side_effects() {
        use std::cell::Cell;
        use std::rc::Rc;

        let counter = Rc::new(Cell::new(0usize));
        let seen = counter.clone();
        let mut suite = BenchmarkSuite::new();
        suite.add("count", move || seen.set(seen.get() + 1));

        suite.run(4);
        // 4 measured + default warmup executions.
        assert_eq!(counter.get(), 4 + DEFAULT_WARMUP_ITERATIONS);
    }
}
