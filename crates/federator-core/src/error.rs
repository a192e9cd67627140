//! Shared error type across federator crates.

use thiserror::Error;

/// Stable error codes surfaced in logs, metrics labels and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Payload is not valid snappy.
    Decompression,
    /// Decompressed payload is not a valid write request.
    Decode,
    /// Store failed to apply a batch.
    StoreWrite,
    /// Response sink failed mid-stream.
    Sink,
    /// Invalid configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Decompression => "DECOMPRESSION",
            ClientCode::Decode => "DECODE",
            ClientCode::StoreWrite => "STORE_WRITE",
            ClientCode::Sink => "SINK",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// True when the caller sent something we could not accept.
    pub fn is_client_fault(self) -> bool {
        matches!(self, ClientCode::Decompression | ClientCode::Decode)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FederatorError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FederatorError {
    #[error("snappy decompression failed: {0}")]
    Decompression(String),
    #[error("protobuf decode failed: {0}")]
    Decode(String),
    #[error("store write failed: {0}")]
    StoreWrite(String),
    #[error("sink write failed: {0}")]
    Sink(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FederatorError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FederatorError::Decompression(_) => ClientCode::Decompression,
            FederatorError::Decode(_) => ClientCode::Decode,
            FederatorError::StoreWrite(_) => ClientCode::StoreWrite,
            FederatorError::Sink(_) => ClientCode::Sink,
            FederatorError::Config(_) => ClientCode::Config,
            FederatorError::Internal(_) => ClientCode::Internal,
        }
    }
}
