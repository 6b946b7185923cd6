use crate::client::constants::DEFAULT_STUN_HOST;
use crate::client::error::{ClientError, Result};
use crate::protocol::STUN_DEFAULT_PORT;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Parser, Debug, Clone)]
#[command(name = "stun-latency")]
#[command(about = "Measure STUN binding request round-trip latency")]
pub struct Config {
    /// STUN server hostname (port defaults to 3478)
    #[arg(long, default_value = DEFAULT_STUN_HOST)]
    pub host: String,

    /// Number of times to run the STUN request
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// Timeout for each STUN request (e.g. 5s, 500ms, 1m30s)
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Disable the progress bar
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

impl Config {
    /// Returns the server address with the default STUN port filled in
    pub fn server_address(&self) -> String {
        let host = self.host.trim();

        if host.parse::<SocketAddr>().is_ok() {
            return host.to_string();
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return SocketAddr::new(ip, STUN_DEFAULT_PORT).to_string();
        }
        if host.starts_with('[') {
            return if host.ends_with(']') {
                format!("{}:{}", host, STUN_DEFAULT_PORT)
            } else {
                host.to_string()
            };
        }
        match host.rsplit_once(':') {
            Some((_, port)) if port.parse::<u16>().is_ok() => host.to_string(),
            _ => format!("{}:{}", host, STUN_DEFAULT_PORT),
        }
    }

    /// Validates the configuration values
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        if self.host.trim().is_empty() {
            return Err(ClientError::Config("host must not be empty".into()));
        }
        if self.runs == 0 {
            return Err(ClientError::Config("runs must be > 0".into()));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be > 0".into()));
        }
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ClientError::Config(format!(
                "log_level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        debug!("Configuration validated successfully");
        Ok(())
    }

    /// Returns true if JSON format logging is enabled
    pub fn is_json_format(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Parses durations such as `5s`, `250ms`, `1.5s` or `1m30s`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
pub fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".into());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let mut total_ns = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
        let value: f64 = rest[..number_end]
            .parse()
            .map_err(|_| format!("invalid duration '{}': expected a number", input))?;
        rest = &rest[number_end..];

        let unit_end = rest.find(is_numeric).unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("invalid duration '{}': missing unit", input)),
            unit => return Err(format!("invalid duration '{}': unknown unit '{}'", input, unit)),
        };
        total_ns += value * scale;
        rest = &rest[unit_end..];
    }

    if total_ns > u64::MAX as f64 {
        return Err(format!("invalid duration '{}': out of range", input));
    }
    Ok(Duration::from_nanos(total_ns.round() as u64))
}
