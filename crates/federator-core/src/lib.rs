//! federator core: transport-agnostic ingestion primitives and error types.
//!
//! This crate owns the metric identity model, the remote-write wire decoding
//! (snappy + protobuf), and the conversion from decoded series into samples.
//! It carries no HTTP or async runtime dependencies so the gateway and tests
//! can share it freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed payloads surface as `FederatorError` instead of crashing the
//! relay.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod convert;
pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{FederatorError, Result};
