//! Client module for the STUN latency measurement tool

pub mod config;
pub mod constants;
pub mod error;
pub mod histogram;
pub mod logging;
pub mod measurement;
pub mod progress;
pub mod reporter;
pub mod socket;
pub mod statistics;

pub use config::{parse_duration, Config};
pub use constants::*;
pub use error::{ClientError, Result};
pub use histogram::{Bucket, LatencyHistogram};
pub use logging::init_logging_with_config;
pub use measurement::{measurement_phase, run_session, sample_request, RequestOutcome};
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
pub use reporter::{Reporter, NO_SUCCESSFUL_REQUESTS};
pub use socket::{StunSocket, UdpStunSocket};
pub use statistics::{percentile, Statistics};
