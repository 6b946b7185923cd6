use crate::client::constants::PROGRESS_TICK_INTERVAL_MS;
use crate::client::error::{ClientError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

/// Receives per-request notifications from the measurement loop
pub trait ProgressSink {
    /// Called once per completed request
    fn advance(&mut self, by: u64);

    /// Called with the reflexive address of the first successful request
    fn public_address(&mut self, _addr: SocketAddr) {}

    /// Called once after the last request
    fn finish(&mut self) {}
}

/// Sink that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&mut self, _by: u64) {}
}

/// Terminal progress bar; the public address line goes to `out`
pub struct ProgressTracker<W: Write = io::Stdout> {
    pb: ProgressBar,
    out: W,
}

impl ProgressTracker {
    /// Create a progress bar for `run_count` requests writing to stdout;
    /// `quiet` hides the bar only
    pub fn new(run_count: usize, quiet: bool) -> Result<Self> {
        Self::with_output(run_count, quiet, io::stdout())
    }
}

impl<W: Write> ProgressTracker<W> {
    pub fn with_output(run_count: usize, quiet: bool, out: W) -> Result<Self> {
        if quiet {
            return Ok(Self {
                pb: ProgressBar::hidden(),
                out,
            });
        }

        let pb = ProgressBar::new(run_count as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>7}/{len:7} [{elapsed_precise}] {per_sec}",
            )
            .map_err(|e| ClientError::Config(format!("Failed to create progress style: {}", e)))?
            .progress_chars("█░"),
        );
        pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_INTERVAL_MS));
        Ok(Self { pb, out })
    }
}

impl<W: Write> ProgressSink for ProgressTracker<W> {
    fn advance(&mut self, by: u64) {
        self.pb.inc(by);
    }

    fn public_address(&mut self, addr: SocketAddr) {
        let out = &mut self.out;
        let written = self.pb.suspend(|| {
            writeln!(out, "Your IP is: {}", addr.ip())?;
            out.flush()
        });
        if let Err(e) = written {
            warn!(error = %e, "Failed to print public address");
        }
    }

    fn finish(&mut self) {
        self.pb.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_tracker_counts_progress() -> Result<()> {
        let mut tracker = ProgressTracker::new(3, true)?;
        tracker.advance(1);
        tracker.advance(2);
        assert_eq!(tracker.pb.position(), 3);
        tracker.finish();
        assert!(tracker.pb.is_finished());
        Ok(())
    }

    #[test]
    fn test_public_address_written_when_quiet() -> Result<()> {
        let mut tracker = ProgressTracker::with_output(3, true, Vec::new())?;
        tracker.public_address("203.0.113.7:40000".parse().unwrap());
        assert_eq!(
            String::from_utf8(tracker.out).unwrap(),
            "Your IP is: 203.0.113.7\n"
        );
        Ok(())
    }

    #[test]
    fn test_public_address_written_above_visible_bar() -> Result<()> {
        let mut tracker = ProgressTracker::with_output(3, false, Vec::new())?;
        tracker.advance(1);
        tracker.public_address("[2001:db8::7]:3478".parse().unwrap());
        tracker.finish();
        assert_eq!(
            String::from_utf8(tracker.out).unwrap(),
            "Your IP is: 2001:db8::7\n"
        );
        Ok(())
    }

    #[test]
    fn test_no_progress_is_inert() {
        let mut sink = NoProgress;
        sink.advance(1);
        sink.public_address("127.0.0.1:1".parse().unwrap());
        sink.finish();
    }
}
