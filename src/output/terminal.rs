//! Terminal output formatting with colors.

use colored::Colorize;

use crate::benchmark::{BenchmarkComparison, BenchmarkResult};

/// One-line summary of a benchmark result, used for suite progress output.
pub fn format_summary_line(result: &BenchmarkResult) -> String {
    let stats = result.statistics();
    format!(
        "  {}: mean {:.4}s, min {:.4}s, max {:.4}s ({} iterations)",
        result.name.bold(),
        stats.mean(),
        stats.min(),
        stats.max(),
        stats.count()
    )
}

/// Multi-line summary of a benchmark result.
pub fn format_result(result: &BenchmarkResult) -> String {
    let stats = result.statistics();
    let mut out = String::new();

    out.push_str(&format!("{}\n", result.name.bold()));
    out.push_str(&format!("  iterations: {}\n", stats.count()));
    out.push_str(&format!("  mean:       {:.4}s\n", stats.mean()));
    out.push_str(&format!("  median:     {:.4}s\n", stats.median()));
    out.push_str(&format!("  min:        {:.4}s\n", stats.min()));
    out.push_str(&format!("  max:        {:.4}s\n", stats.max()));
    out.push_str(&format!("  std dev:    {:.4}s\n", stats.std_dev()));
    out.push_str(&format!("  p95:        {:.4}s\n", stats.percentile(95.0)));
    out
}

/// Summary of a baseline/candidate comparison.
///
/// The verdict line is green when the candidate is faster, red otherwise.
pub fn format_comparison(comparison: &BenchmarkComparison) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} vs {}\n",
        comparison.baseline.name.bold(),
        comparison.candidate.name.bold()
    ));
    out.push_str(&format!(
        "  baseline mean:  {:.4}s\n",
        comparison.baseline.statistics().mean()
    ));
    out.push_str(&format!(
        "  candidate mean: {:.4}s\n",
        comparison.candidate.statistics().mean()
    ));

    let verdict = format!(
        "{:.2}x speedup ({:+.1}%)",
        comparison.speedup(),
        comparison.improvement_percent()
    );
    if comparison.is_faster() {
        out.push_str(&format!("  {}\n", verdict.green().bold()));
    } else {
        out.push_str(&format!("  {}\n", verdict.red().bold()));
    }
    out
}
