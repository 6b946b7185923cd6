use crate::client::measurement::RequestOutcome;
use tracing::debug;

/// Summary of an outcome sequence: sorted successful latencies and failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    sorted_us: Vec<u64>,
    failures: usize,
    first_us: Option<u64>,
}

impl Statistics {
    /// Partition outcomes into successes and failures.
    pub fn new(outcomes: &[RequestOutcome]) -> Self {
        let mut sorted_us: Vec<u64> = outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.elapsed_us)
            .collect();
        sorted_us.sort_unstable();

        let failures = outcomes.len() - sorted_us.len();
        let first_us = outcomes
            .first()
            .filter(|o| o.is_success())
            .map(|o| o.elapsed_us);

        debug!(
            successes = sorted_us.len(),
            failures = failures,
            "Statistics calculated"
        );

        Self {
            sorted_us,
            failures,
            first_us,
        }
    }

    /// Successful latencies in ascending order (microseconds)
    pub fn samples(&self) -> &[u64] {
        &self.sorted_us
    }

    pub fn success_count(&self) -> usize {
        self.sorted_us.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Latency of request 0, if it succeeded
    pub fn first_request_us(&self) -> Option<u64> {
        self.first_us
    }

    pub fn min(&self) -> Option<u64> {
        self.sorted_us.first().copied()
    }

    pub fn max(&self) -> Option<u64> {
        self.sorted_us.last().copied()
    }

    /// Percentile `p` (0..=100) of the successful latencies, `None` if there are none
    pub fn percentile(&self, p: u32) -> Option<u64> {
        percentile(&self.sorted_us, p)
    }
}

/// Nearest-rank percentile of an ascending slice, `None` when it is empty.
///
/// The index is `round((n - 1) * p / 100)`, halves rounded away from zero, so
/// for `[100, 200]` p50 selects 200.
pub fn percentile(sorted: &[u64], p: u32) -> Option<u64> {
    let last = sorted.len().checked_sub(1)?;
    let index = (last as f64 * f64::from(p.min(100)) / 100.0).round() as usize;
    sorted.get(index.min(last)).copied()
}
