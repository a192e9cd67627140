//! Lightweight in-process self-metrics.
//!
//! Counters and gauges describing the relay itself (requests, decode errors,
//! active scrapes). Stored as atomics and rendered by the `/metrics` handler.
//! These never mix with ingested samples.

pub mod metrics;
