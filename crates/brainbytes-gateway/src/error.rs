//! HTTP mapping for `BrainBytesError`.
//!
//! Bad input is a 400; every other failure is a 500 carrying the error's
//! message as `{"error": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use brainbytes_core::error::ClientCode;
use brainbytes_core::protocol::chat::ErrorBody;
use brainbytes_core::BrainBytesError;

#[derive(Debug)]
pub struct ApiError(pub BrainBytesError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BrainBytesError> for ApiError {
    fn from(e: BrainBytesError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::from(&self.0))).into_response()
    }
}
