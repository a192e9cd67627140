use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use federator_core::error::Result;
use federator_core::model::Sample;

use super::{SampleStore, SnapshotSink};

/// In-memory store guarded by a single reader/writer lock.
///
/// Entries are never evicted. Overwrites follow arrival order, so an older
/// timestamp written later replaces a newer one.
///
/// `read` holds the shared lock for the whole snapshot, so a slow sink
/// delays writers until it finishes.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Sample>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SampleStore for MemoryStore {
    async fn write(&self, samples: Vec<Sample>) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }
        // Keys are built before locking to keep the exclusive hold short.
        let keyed: Vec<(String, Sample)> = samples
            .into_iter()
            .map(|s| (s.metric().canonical(), s))
            .collect();

        let mut map = self.entries.write().await;
        for (key, sample) in keyed {
            map.insert(key, sample);
        }
        Ok(())
    }

    async fn read(&self, sink: &mut dyn SnapshotSink) -> Result<()> {
        {
            let map = self.entries.read().await;
            for sample in map.values() {
                sink.write_line(&sample.to_line()).await?;
            }
        }
        sink.flush().await
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
