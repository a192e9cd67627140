//! Prometheus remote-write v1 decoding.
//!
//! Message definitions mirror `prompb/types.proto` and `prompb/remote.proto`
//! for the fields the relay consumes. Exemplars, native histograms and
//! metadata are unknown to these structs and are skipped by prost.

use prost::Message;

use crate::error::{FederatorError, Result};
use crate::model::is_valid_label_name;

/// `prometheus.WriteRequest`.
#[derive(Clone, PartialEq, Message)]
pub struct WriteRequest {
    #[prost(message, repeated, tag = "1")]
    pub timeseries: Vec<TimeSeries>,
}

/// `prometheus.TimeSeries`: one label set plus its samples.
#[derive(Clone, PartialEq, Message)]
pub struct TimeSeries {
    #[prost(message, repeated, tag = "1")]
    pub labels: Vec<Label>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<WireSample>,
}

/// `prometheus.Label`.
#[derive(Clone, PartialEq, Message)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

/// `prometheus.Sample`. Timestamp is epoch milliseconds.
#[derive(Clone, PartialEq, Message)]
pub struct WireSample {
    #[prost(double, tag = "1")]
    pub value: f64,
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}

/// Undo snappy block compression.
pub fn decompress(body: &[u8]) -> Result<Vec<u8>> {
    snap::raw::Decoder::new()
        .decompress_vec(body)
        .map_err(|e| FederatorError::Decompression(e.to_string()))
}

/// Parse an uncompressed protobuf `WriteRequest`.
///
/// Label names outside `[a-zA-Z_][a-zA-Z0-9_]*` reject the whole request.
pub fn decode(buf: &[u8]) -> Result<WriteRequest> {
    let req = WriteRequest::decode(buf).map_err(|e| FederatorError::Decode(e.to_string()))?;
    for series in &req.timeseries {
        if let Some(bad) = series.labels.iter().find(|l| !is_valid_label_name(&l.name)) {
            return Err(FederatorError::Decode(format!(
                "invalid label name: {:?}",
                bad.name
            )));
        }
    }
    Ok(req)
}

/// Full pipeline for a `/receive` body: decompress, then decode.
pub fn decode_write_request(body: &[u8]) -> Result<WriteRequest> {
    let raw = decompress(body)?;
    let req = decode(&raw)?;
    tracing::trace!(
        compressed = body.len(),
        raw = raw.len(),
        series = req.timeseries.len(),
        "decoded write request"
    );
    Ok(req)
}

/// Snappy-compress an encoded request. Used by senders and tests.
pub fn encode_write_request(req: &WriteRequest) -> Result<Vec<u8>> {
    snap::raw::Encoder::new()
        .compress_vec(&req.encode_to_vec())
        .map_err(|e| FederatorError::Internal(format!("snappy compress failed: {e}")))
}
