//! Latest-value sample store.
//!
//! The store owns its own synchronization. Callers only get `write` and
//! `read`; the underlying map never leaves this module.

pub mod memory;

use async_trait::async_trait;

use federator_core::error::Result;
use federator_core::model::Sample;

pub use memory::MemoryStore;

/// Destination for snapshot lines produced by `SampleStore::read`.
#[async_trait]
pub trait SnapshotSink: Send {
    /// Write one line. `line` carries no trailing newline.
    async fn write_line(&mut self, line: &str) -> Result<()>;

    /// Push out anything buffered. Called once after the last line.
    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl SnapshotSink for Vec<u8> {
    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.extend_from_slice(line.as_bytes());
        self.push(b'\n');
        Ok(())
    }
}

/// Concurrent map from canonical identity to the last written sample.
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Upsert every sample as one atomic batch. Later samples in the batch
    /// replace earlier ones with the same identity.
    async fn write(&self, samples: Vec<Sample>) -> Result<()>;

    /// Stream one `<identity> <value> <timestamp>` line per entry, in no
    /// particular order. Sink failures are returned as-is.
    async fn read(&self, sink: &mut dyn SnapshotSink) -> Result<()>;

    /// Number of distinct identities held.
    async fn len(&self) -> usize;
}
