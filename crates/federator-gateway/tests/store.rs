#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use federator_core::error::{FederatorError, Result};
use federator_core::model::{Metric, Sample};
use federator_gateway::store::{MemoryStore, SampleStore, SnapshotSink};
use federator_gateway::transport::federate::ChannelSink;

fn metric(pairs: &[(&str, &str)]) -> Metric {
    pairs.iter().copied().collect()
}

async fn snapshot(store: &dyn SampleStore) -> HashMap<String, (String, String)> {
    let mut buf = Vec::new();
    store.read(&mut buf).await.unwrap();
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|l| {
            let mut cols = l.rsplitn(3, ' ');
            let ts = cols.next().unwrap().to_string();
            let value = cols.next().unwrap().to_string();
            let id = cols.next().unwrap().to_string();
            (id, (value, ts))
        })
        .collect()
}

#[tokio::test]
async fn last_write_wins_by_arrival() {
    let store = MemoryStore::new();
    let up = metric(&[("__name__", "up"), ("job", "a")]);

    store.write(vec![Sample::new(up.clone(), 1.0, 5000)]).await.unwrap();
    // Older timestamp still replaces the entry.
    store.write(vec![Sample::new(up, 0.0, 1000)]).await.unwrap();

    let snap = snapshot(&store).await;
    assert_eq!(snap.len(), 1);
    assert_eq!(
        snap[r#"__name__="up",job="a""#],
        ("0".to_string(), "1000".to_string())
    );
}

#[tokio::test]
async fn later_sample_in_batch_wins() {
    let store = MemoryStore::new();
    let up = metric(&[("__name__", "up"), ("job", "a")]);

    store
        .write(vec![
            Sample::new(up.clone(), 1.0, 1000),
            Sample::new(up, 0.0, 2000),
        ])
        .await
        .unwrap();

    let mut buf = Vec::new();
    store.read(&mut buf).await.unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "__name__=\"up\",job=\"a\" 0 2000\n");
}

#[tokio::test]
async fn label_order_shares_one_entry() {
    let store = MemoryStore::new();
    store
        .write(vec![Sample::new(metric(&[("a", "1"), ("b", "2")]), 1.0, 1)])
        .await
        .unwrap();
    store
        .write(vec![Sample::new(metric(&[("b", "2"), ("a", "1")]), 2.0, 2)])
        .await
        .unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(snapshot(&store).await[r#"a="1",b="2""#].0, "2");
}

#[tokio::test]
async fn empty_store_reads_nothing() {
    let store = MemoryStore::new();
    let mut buf = Vec::new();
    store.read(&mut buf).await.unwrap();
    assert!(buf.is_empty());
    store.write(vec![]).await.unwrap();
    assert_eq!(store.len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_lose_nothing() {
    let store = Arc::new(MemoryStore::new());
    let mut tasks = Vec::new();
    for w in 0..8 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            for i in 0..100 {
                let (w_s, i_s) = (w.to_string(), i.to_string());
                let m = metric(&[("writer", w_s.as_str()), ("i", i_s.as_str())]);
                store.write(vec![Sample::new(m, i as f64, i)]).await.unwrap();
            }
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    assert_eq!(store.len().await, 800);
    assert_eq!(snapshot(store.as_ref()).await.len(), 800);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reads_never_see_torn_entries() {
    let store = Arc::new(MemoryStore::new());
    let id = metric(&[("__name__", "ticks")]);

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for v in 0..2000i64 {
                store.write(vec![Sample::new(id.clone(), v as f64, v)]).await.unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                for (_, (value, ts)) in snapshot(store.as_ref()).await {
                    assert_eq!(value, ts, "value and timestamp from different writes");
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for r in readers {
        r.await.unwrap();
    }
}

struct BrokenSink {
    accepted: usize,
}

#[async_trait]
impl SnapshotSink for BrokenSink {
    async fn write_line(&mut self, _line: &str) -> Result<()> {
        if self.accepted == 1 {
            return Err(FederatorError::Sink("broken pipe".into()));
        }
        self.accepted += 1;
        Ok(())
    }
}

#[tokio::test]
async fn sink_failure_is_propagated() {
    let store = MemoryStore::new();
    store
        .write(vec![
            Sample::new(metric(&[("n", "1")]), 1.0, 1),
            Sample::new(metric(&[("n", "2")]), 2.0, 2),
        ])
        .await
        .unwrap();

    let mut sink = BrokenSink { accepted: 0 };
    let err = store.read(&mut sink).await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "SINK");
    assert_eq!(sink.accepted, 1);

    // The store is still usable afterwards.
    store.write(vec![Sample::new(metric(&[("n", "3")]), 3.0, 3)]).await.unwrap();
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn channel_sink_fails_when_client_is_gone() {
    let store = MemoryStore::new();
    store
        .write(vec![Sample::new(metric(&[("n", "1")]), 1.0, 1)])
        .await
        .unwrap();

    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let mut sink = ChannelSink::new(tx, 512);

    let err = store.read(&mut sink).await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "SINK");
}

#[tokio::test]
async fn channel_sink_chunks_lines() {
    let store = MemoryStore::new();
    let batch = (0..100)
        .map(|i| {
            let name = format!("{i:03}");
            Sample::new(metric(&[("series", name.as_str())]), 1.0, 1)
        })
        .collect();
    store.write(batch).await.unwrap();

    let (tx, mut rx) = mpsc::channel(64);
    let mut sink = ChannelSink::new(tx, 512);
    store.read(&mut sink).await.unwrap();
    drop(sink);

    let mut chunks = 0;
    let mut body = Vec::new();
    while let Some(chunk) = rx.recv().await {
        chunks += 1;
        body.extend_from_slice(&chunk);
    }
    assert!(chunks > 1);
    assert_eq!(String::from_utf8(body).unwrap().lines().count(), 100);
}
