//! federator gateway library entry.
//!
//! Wires config, the latest-value store, HTTP handlers and self-metrics into
//! the relay service. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;
