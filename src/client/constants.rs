//! Constants used throughout the client application

/// Default STUN server queried when `--host` is not given
pub const DEFAULT_STUN_HOST: &str = "stun.cloudflare.com:3478";

/// Receive buffer size for STUN responses
pub const RECV_BUFFER_SIZE: usize = 512;

/// Number of equal-width histogram buckets
pub const HISTOGRAM_BUCKETS: usize = 20;

/// Width of the longest histogram bar in characters
pub const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Percentiles shown in the results table
pub const REPORTED_PERCENTILES: [u32; 5] = [0, 25, 50, 75, 100];

/// Progress bar tick interval in milliseconds
pub const PROGRESS_TICK_INTERVAL_MS: u64 = 100;
