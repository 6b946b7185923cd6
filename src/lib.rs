//! stun-latency - STUN binding request latency measurement tool
//!
//! This library issues a series of timed STUN binding requests against a single
//! server over one UDP socket and summarises the round-trip times as percentiles
//! and an ASCII histogram.

pub mod client;
pub mod protocol;
