use crate::client::error::ClientError;
use crate::client::progress::ProgressSink;
use crate::client::socket::StunSocket;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome of a single timed binding request
#[derive(Debug)]
pub struct RequestOutcome {
    /// Wall-clock time around the request, successful or not
    pub elapsed_us: u64,
    /// Why the request failed; `None` on success
    pub error: Option<ClientError>,
}

impl RequestOutcome {
    pub fn success(elapsed_us: u64) -> Self {
        Self {
            elapsed_us,
            error: None,
        }
    }

    pub fn failure(elapsed_us: u64, error: ClientError) -> Self {
        Self {
            elapsed_us,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Perform one binding request and time it.
///
/// Returns the outcome together with the reflexive address when the request
/// succeeded. Failures are never retried.
pub fn sample_request<S: StunSocket>(
    socket: &mut S,
    timeout: Duration,
) -> (RequestOutcome, Option<SocketAddr>) {
    let start = Instant::now();
    let result = socket.binding_request(timeout);
    let elapsed_us = start.elapsed().as_micros() as u64;

    match result {
        Ok(addr) => (RequestOutcome::success(elapsed_us), Some(addr)),
        Err(e) => {
            debug!(error = %e, elapsed_us = elapsed_us, "Request failed");
            (RequestOutcome::failure(elapsed_us, e), None)
        }
    }
}

/// Run `run_count` requests back to back over the same socket.
///
/// The returned sequence has exactly `run_count` entries in request order. The
/// sink sees one `advance(1)` per request and the address of the first success.
pub fn measurement_phase<S: StunSocket, P: ProgressSink>(
    socket: &mut S,
    run_count: usize,
    timeout: Duration,
    progress: &mut P,
) -> Vec<RequestOutcome> {
    let mut outcomes = Vec::with_capacity(run_count);
    let mut address_reported = false;

    for i in 0..run_count {
        let (outcome, mapped) = sample_request(socket, timeout);
        debug!(
            request = i + 1,
            elapsed_us = outcome.elapsed_us,
            success = outcome.is_success(),
            "Request completed"
        );

        if let Some(addr) = mapped {
            if !address_reported {
                progress.public_address(addr);
                address_reported = true;
            }
        }

        outcomes.push(outcome);
        progress.advance(1);
    }
    progress.finish();

    debug!(
        successes = outcomes.iter().filter(|o| o.is_success()).count(),
        failures = outcomes.iter().filter(|o| !o.is_success()).count(),
        "Measurement phase completed"
    );
    outcomes
}

/// Run a full measurement over `socket`, closing it afterwards.
pub fn run_session<S: StunSocket, P: ProgressSink>(
    mut socket: S,
    run_count: usize,
    timeout: Duration,
    progress: &mut P,
) -> Vec<RequestOutcome> {
    let outcomes = measurement_phase(&mut socket, run_count, timeout, progress);
    if let Err(e) = socket.close() {
        warn!(error = %e, "Failed to close socket");
    }
    outcomes
}
