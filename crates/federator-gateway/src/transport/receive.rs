//! `POST /receive`: remote-write ingestion.
//!
//! Pipeline: snappy -> protobuf -> samples -> one store batch.
//! Nothing reaches the store unless the whole body decodes.

use std::time::Instant;

use axum::{body::Bytes, extract::State, http::StatusCode};

use federator_core::{
    convert::series_to_samples,
    error::Result,
    model::Sample,
    protocol::remote,
};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::store::SampleStore;

pub async fn receive(
    State(app): State<AppState>,
    body: Bytes,
) -> std::result::Result<StatusCode, ApiError> {
    let metrics = app.metrics();
    let started = Instant::now();
    let res = ingest(app.store().as_ref(), &body).await;
    metrics.receive_duration.observe(&[], started.elapsed());

    match res {
        Ok(n) => {
            metrics.receive_requests.inc(&[("outcome", "ok")]);
            metrics.samples_received.add(&[], n as u64);
            tracing::trace!(bytes = body.len(), samples = n, "write request applied");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            let code = e.client_code();
            if code.is_client_fault() {
                metrics.receive_requests.inc(&[("outcome", "bad_request")]);
                metrics.decode_errors.inc(&[("kind", code.as_str())]);
                tracing::debug!(error = %e, bytes = body.len(), "rejected write request");
            } else {
                metrics.receive_requests.inc(&[("outcome", "error")]);
                metrics.store_errors.inc(&[]);
                tracing::error!(error = %e, "failed to apply write request");
            }
            Err(ApiError(e))
        }
    }
}

/// Decode `body` and apply every series as a single batch. Returns the
/// number of samples written.
pub async fn ingest(store: &dyn SampleStore, body: &[u8]) -> Result<usize> {
    let req = remote::decode_write_request(body)?;
    let samples: Vec<Sample> = req.timeseries.iter().flat_map(series_to_samples).collect();
    let n = samples.len();
    store.write(samples).await?;
    Ok(n)
}
