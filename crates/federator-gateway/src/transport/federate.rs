//! `GET /federate`: stream the store snapshot as plain text.
//!
//! Status and headers go out before the body, so a failure while streaming
//! cannot change the status code. The snapshot runs in its own task and
//! feeds the response body through a bounded channel; when the client goes
//! away the channel closes and the read stops with a sink error.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use tokio::sync::mpsc;

use federator_core::error::{FederatorError, Result};

use crate::app_state::AppState;
use crate::store::SnapshotSink;

/// Sink batching lines into chunks for the response body channel.
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
    buf: BytesMut,
    chunk_bytes: usize,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Bytes>, chunk_bytes: usize) -> Self {
        Self {
            tx,
            buf: BytesMut::with_capacity(chunk_bytes),
            chunk_bytes,
        }
    }

    async fn send(&mut self) -> Result<()> {
        let chunk = self.buf.split().freeze();
        self.tx
            .send(chunk)
            .await
            .map_err(|_| FederatorError::Sink("client disconnected".into()))
    }
}

#[async_trait]
impl SnapshotSink for ChannelSink {
    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.buf.extend_from_slice(line.as_bytes());
        self.buf.put_u8(b'\n');
        if self.buf.len() >= self.chunk_bytes {
            self.send().await?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.send().await
    }
}

pub async fn federate(State(app): State<AppState>) -> Response {
    let server = &app.cfg().server;
    let (tx, rx) = mpsc::channel::<Bytes>(server.federate_queue);
    let mut sink = ChannelSink::new(tx, server.federate_chunk_bytes);

    let store = app.store();
    let metrics = app.metrics();
    metrics.federate_requests.inc(&[]);

    tokio::spawn(async move {
        metrics.federate_streams.inc(&[]);
        if let Err(e) = store.read(&mut sink).await {
            metrics.sink_errors.inc(&[]);
            tracing::warn!(error = %e, "federate stream aborted");
        }
        metrics.federate_streams.dec(&[]);
    });

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok::<_, Infallible>(chunk), rx))
    });

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
