use crate::client::constants::{HISTOGRAM_BAR_WIDTH, REPORTED_PERCENTILES};
use crate::client::histogram::LatencyHistogram;
use crate::client::statistics::Statistics;
use colored::*;
use tracing::{info, warn};

/// Message printed instead of the results table when every request failed
pub const NO_SUCCESSFUL_REQUESTS: &str = "No successful requests";

/// Reporter for rendering measurement results as text
pub struct Reporter;

impl Reporter {
    /// Renders the summary and percentile table.
    ///
    /// With no successful requests this is exactly [`NO_SUCCESSFUL_REQUESTS`].
    pub fn render_results(stats: &Statistics) -> String {
        if stats.success_count() == 0 {
            return NO_SUCCESSFUL_REQUESTS.to_string();
        }

        let mut lines = Vec::new();
        if let Some(first) = stats.first_request_us() {
            lines.push(format!("First request time: {} μs", first));
        }
        lines.push(String::new());
        lines.push("Results:".to_string());
        lines.push(format!("Successful requests: {}", stats.success_count()));
        lines.push(format!("Failed requests: {}", stats.failure_count()));
        lines.push(String::new());

        lines.push("┌───────┬───────────┐".to_string());
        lines.push("│ %tile │ Time (μs) │".to_string());
        lines.push("├───────┼───────────┤".to_string());
        for p in REPORTED_PERCENTILES {
            let value = stats.percentile(p).unwrap_or_default();
            lines.push(format!("│{:^7}│ {:>9} │", format!("p{}", p), value));
        }
        lines.push("└───────┴───────────┘".to_string());

        lines.join("\n")
    }

    /// Renders one line per bucket, bars scaled to the fullest bucket.
    ///
    /// Empty when there are no samples.
    pub fn render_histogram(histogram: Option<&LatencyHistogram>) -> String {
        let Some(histogram) = histogram else {
            return String::new();
        };

        let max_count = histogram.max_count().max(1);
        let mut lines = vec![String::new(), "Latency Distribution (μs):".to_string()];
        for bucket in histogram.buckets() {
            let bar = "█".repeat(bucket.count * HISTOGRAM_BAR_WIDTH / max_count);
            lines.push(format!(
                "{:>6} - {:>6} | {:<width$} | {}",
                bucket.lower,
                bucket.upper,
                bar,
                bucket.count,
                width = HISTOGRAM_BAR_WIDTH
            ));
        }
        lines.join("\n")
    }

    /// Print the results table to stdout
    pub fn print_results(&self, stats: &Statistics) {
        if stats.success_count() == 0 {
            warn!(
                failures = stats.failure_count(),
                "No successful requests recorded"
            );
            println!("{}", Self::render_results(stats).red());
            return;
        }

        println!("{}", Self::render_results(stats));
        info!(
            successes = stats.success_count(),
            failures = stats.failure_count(),
            p50_us = stats.percentile(50),
            "Results reported"
        );
    }

    /// Print the latency histogram to stdout; nothing without samples
    pub fn print_histogram(&self, stats: &Statistics) {
        let histogram = LatencyHistogram::new(stats.samples());
        if histogram.is_some() {
            println!("{}", Self::render_histogram(histogram.as_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::client::measurement::RequestOutcome;
    use std::time::Duration;

    fn timeout() -> RequestOutcome {
        RequestOutcome::failure(5_000_000, ClientError::Timeout(Duration::from_secs(5)))
    }

    #[test]
    fn test_render_results_table() {
        let outcomes: Vec<RequestOutcome> = [30, 10, 50, 20, 40]
            .into_iter()
            .map(RequestOutcome::success)
            .chain(std::iter::once(timeout()))
            .collect();
        let stats = Statistics::new(&outcomes);

        let expected = [
            "First request time: 30 μs",
            "",
            "Results:",
            "Successful requests: 5",
            "Failed requests: 1",
            "",
            "┌───────┬───────────┐",
            "│ %tile │ Time (μs) │",
            "├───────┼───────────┤",
            "│  p0   │        10 │",
            "│  p25  │        20 │",
            "│  p50  │        30 │",
            "│  p75  │        40 │",
            "│ p100  │        50 │",
            "└───────┴───────────┘",
        ]
        .join("\n");
        assert_eq!(Reporter::render_results(&stats), expected);
    }

    #[test]
    fn test_render_results_omits_failed_first_request() {
        let outcomes = vec![timeout(), RequestOutcome::success(100), RequestOutcome::success(200)];
        let rendered = Reporter::render_results(&Statistics::new(&outcomes));

        assert!(!rendered.contains("First request time"));
        assert!(rendered.starts_with("\nResults:"));
        assert!(rendered.contains("│  p50  │       200 │"));
        assert!(rendered.contains("│  p25  │       100 │"));
    }

    #[test]
    fn test_render_results_no_successes() {
        let stats = Statistics::new(&[timeout(), timeout()]);
        assert_eq!(Reporter::render_results(&stats), "No successful requests");
    }

    #[test]
    fn test_render_results_zero_runs() {
        let stats = Statistics::new(&[]);
        assert_eq!(Reporter::render_results(&stats), NO_SUCCESSFUL_REQUESTS);
        assert_eq!(
            Reporter::render_histogram(LatencyHistogram::new(stats.samples()).as_ref()),
            ""
        );
    }

    #[test]
    fn test_render_histogram_lines() {
        let hist = LatencyHistogram::new(&[0, 0, 0, 100]).unwrap();
        let rendered = Reporter::render_histogram(Some(&hist));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Latency Distribution (μs):");
        assert_eq!(
            lines[2],
            format!("     0 -      5 | {} | 3", "█".repeat(40))
        );
        assert_eq!(lines[3], format!("     5 -     10 | {} | 0", " ".repeat(40)));
        assert_eq!(
            lines[21],
            format!("    95 -    100 | {}{} | 1", "█".repeat(13), " ".repeat(27))
        );
    }

    #[test]
    fn test_render_histogram_zero_variance() {
        let hist = LatencyHistogram::new(&[42, 42]).unwrap();
        let rendered = Reporter::render_histogram(Some(&hist));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[2], format!("    42 -     42 | {} | 2", "█".repeat(40)));
        assert!(lines[3..].iter().all(|l| l.ends_with("| 0")));
    }

    #[test]
    fn test_print_results_smoke() {
        let reporter = Reporter;
        let stats = Statistics::new(&[RequestOutcome::success(1000), timeout()]);
        reporter.print_results(&stats);
        reporter.print_histogram(&stats);

        let empty = Statistics::new(&[]);
        reporter.print_results(&empty);
        reporter.print_histogram(&empty);
    }
}
