//! Remote-write decode vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use federator_core::protocol::remote::{decode_write_request, encode_write_request};

use vector_loader::load;

#[test]
fn remote_write_vectors() {
    let files = [
        "remote_write_up.json",
        "remote_write_two_series.json",
        "remote_write_empty.json",
        "remote_write_no_samples.json",
        "bad_snappy.json",
        "bad_snappy_truncated.json",
        "bad_protobuf.json",
        "bad_label_name.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = decode_write_request(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            assert!(e.client_code().is_client_fault(), "vector={}", v.description);
            continue;
        }

        let req = res.expect("expected ok request");
        let ex = v.expect.expect("missing expect block");
        assert_eq!(req.timeseries.len(), ex.series.len(), "vector={}", v.description);

        for (got, want) in req.timeseries.iter().zip(ex.series.iter()) {
            let labels: std::collections::BTreeMap<String, String> = got
                .labels
                .iter()
                .map(|l| (l.name.clone(), l.value.clone()))
                .collect();
            assert_eq!(labels, want.labels, "vector={}", v.description);

            let samples: Vec<(f64, i64)> =
                got.samples.iter().map(|s| (s.value, s.timestamp)).collect();
            assert_eq!(samples, want.samples, "vector={}", v.description);
        }
    }
}

#[test]
fn encoder_output_decodes() {
    let v = load("remote_write_two_series.json");
    let req = decode_write_request(&v.frame.decode()).unwrap();

    let body = encode_write_request(&req).unwrap();
    let back = decode_write_request(&body).unwrap();
    assert_eq!(back, req);
}

#[test]
fn uncompressed_protobuf_is_rejected() {
    // A plain protobuf body must not be mistaken for snappy.
    let v = load("remote_write_up.json");
    let compressed = v.frame.decode();
    let raw = federator_core::protocol::remote::decompress(&compressed).unwrap();

    let err = decode_write_request(&raw).expect_err("must fail");
    assert!(err.client_code().is_client_fault());
}
