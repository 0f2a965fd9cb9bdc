//! Success half of the response envelope. Failures go through
//! [`ServerError`](crate::ServerError).

use api_types::Envelope;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{status: "success", data}` with the given status code.
#[derive(Debug)]
pub struct Success<T>(pub StatusCode, pub T);

impl<T> Success<T> {
    pub fn ok(data: T) -> Self {
        Self(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (self.0, Json(Envelope::success(self.1))).into_response()
    }
}
