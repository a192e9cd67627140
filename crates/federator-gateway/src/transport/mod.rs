//! HTTP handlers for the relay surface.
//!
//! - `GET /`          : index page
//! - `POST /receive`  : remote-write ingestion
//! - `GET /federate`  : latest-value snapshot as plain text

pub mod federate;
pub mod index;
pub mod receive;
