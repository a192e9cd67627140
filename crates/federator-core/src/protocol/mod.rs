//! Wire protocol modules.
//!
//! Only the Prometheus remote-write v1 format is supported: a snappy block
//! compressed protobuf `WriteRequest`.
//!
//! Decoders are panic-free: malformed input is reported as `FederatorError`
//! so a hostile sender can only fail its own request.

pub mod remote;
