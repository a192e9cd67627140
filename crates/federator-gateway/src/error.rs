//! HTTP mapping for `FederatorError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use federator_core::error::{ClientCode, FederatorError};

/// Handler error: status from the error code, body is the plain error text.
#[derive(Debug)]
pub struct ApiError(pub FederatorError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::Decompression | ClientCode::Decode => StatusCode::BAD_REQUEST,
            ClientCode::StoreWrite
            | ClientCode::Sink
            | ClientCode::Config
            | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FederatorError> for ApiError {
    fn from(e: FederatorError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, self.0.to_string()).into_response()
    }
}
