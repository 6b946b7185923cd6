use crate::client::constants::HISTOGRAM_BUCKETS;
use tracing::debug;

/// One equal-width latency range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub lower: u64,
    pub upper: u64,
    pub count: usize,
}

/// Latency histogram with a fixed number of equal-width buckets spanning
/// `[min, max]` of the samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyHistogram {
    buckets: Vec<Bucket>,
}

impl LatencyHistogram {
    /// Bucket the samples; `None` when there are none.
    ///
    /// When every sample is equal the buckets collapse onto `[min, min]` and
    /// bucket 0 holds all of them.
    pub fn new(samples: &[u64]) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;

        let buckets = if max == min {
            let mut buckets = vec![
                Bucket {
                    lower: min,
                    upper: min,
                    count: 0,
                };
                HISTOGRAM_BUCKETS
            ];
            buckets[0].count = samples.len();
            buckets
        } else {
            let width = (max - min) as f64 / HISTOGRAM_BUCKETS as f64;
            let mut counts = [0usize; HISTOGRAM_BUCKETS];
            for &sample in samples {
                let index = ((sample - min) as f64 / width) as usize;
                // The max sample lands exactly on the upper edge
                counts[index.min(HISTOGRAM_BUCKETS - 1)] += 1;
            }
            counts
                .iter()
                .enumerate()
                .map(|(i, &count)| Bucket {
                    lower: (i as f64 * width) as u64 + min,
                    upper: ((i + 1) as f64 * width) as u64 + min,
                    count,
                })
                .collect()
        };

        debug!(min_us = min, max_us = max, "Histogram built");
        Some(Self { buckets })
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Largest bucket count, used to scale the bars
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
