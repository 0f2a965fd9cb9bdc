//! Request body extraction.

use std::ops::RangeInclusive;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::ServerError;

const INVALID_BODY: &str = "Invalid request body";

pub const NAME_LENGTH: RangeInclusive<usize> = 2..=100;
pub const USERNAME_LENGTH: RangeInclusive<usize> = 0..=50;

/// JSON body extractor that answers with the error envelope.
///
/// Unlike `axum::Json` it ignores `Content-Type` and reports every decoding
/// failure, syntax or shape, as a 400.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|err| {
            tracing::warn!("failed to read request body: {err}");
            ServerError::BadRequest(INVALID_BODY.to_string())
        })?;

        serde_json::from_slice(&bytes).map(ApiJson).map_err(|err| {
            tracing::debug!("rejected request body: {err}");
            ServerError::BadRequest(INVALID_BODY.to_string())
        })
    }
}

/// Path extractor that answers with the error envelope.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(err) => {
                tracing::debug!("rejected path {}: {err}", parts.uri.path());
                Err(ServerError::BadRequest("Invalid path parameter".to_string()))
            }
        }
    }
}

/// Checks the length of an already trimmed `value`, counted in characters.
pub fn bounded<'a>(
    value: &'a str,
    field: &str,
    length: RangeInclusive<usize>,
) -> Result<&'a str, ServerError> {
    if length.contains(&value.chars().count()) {
        return Ok(value);
    }
    let message = match *length.start() {
        0 => format!("{field} must be at most {} characters", length.end()),
        min => format!("{field} must be between {min} and {} characters", length.end()),
    };
    Err(ServerError::BadRequest(message))
}

/// Trims `value`, rejecting it when nothing is left.
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ServerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}
