//! Extractors that report rejections through [`Error`]
//!
//! axum's own `Json` and `Query` answer malformed input with plain-text
//! bodies and a mix of 400/415/422. These wrappers route every rejection
//! through `impl IntoResponse for Error`, so clients always get a JSON
//! `{"error": ...}` body and a 400 (or 413 for oversized payloads).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;

use crate::Error;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge(rejection.body_text())
        } else {
            Error::InvalidArgument(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidArgument(rejection.body_text())
    }
}
