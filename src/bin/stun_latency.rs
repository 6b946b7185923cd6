use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use stun_latency::client::{
    init_logging_with_config, run_session, Config, ProgressTracker, Reporter, Statistics,
    UdpStunSocket,
};
use tracing::{error, info};

fn main() {
    // Parse CLI arguments
    let config = Config::parse();

    init_logging_with_config(&config.log_level, config.is_json_format());

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!(error = %e, "Run failed");
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let server = config.server_address();
    let socket = UdpStunSocket::connect(&server)
        .with_context(|| format!("failed to dial STUN server {}", server))?;

    info!(
        server = %socket.server(),
        runs = config.runs,
        timeout_ms = config.timeout.as_millis() as u64,
        "Starting STUN requests"
    );
    println!("{}", "Starting STUN requests...".cyan());

    let mut progress = ProgressTracker::new(config.runs, config.quiet)?;
    let outcomes = run_session(socket, config.runs, config.timeout, &mut progress);
    println!();

    let stats = Statistics::new(&outcomes);
    let reporter = Reporter;
    reporter.print_results(&stats);
    reporter.print_histogram(&stats);
    Ok(())
}
