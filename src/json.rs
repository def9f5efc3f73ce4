use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::models::ErrorResponse;

/// Request bodies larger than this are rejected before decoding.
pub const MAX_BODY_SIZE: usize = 1_048_576;

/// Failure modes of [`read_json`].
#[derive(Debug)]
pub enum BodyError {
    /// Body exceeded [`MAX_BODY_SIZE`].
    TooLarge,
    /// Transport error while collecting the body.
    Unreadable,
    /// Body was not valid JSON for the target type.
    Invalid(serde_json::Error),
    /// Valid JSON followed by more data; bodies must hold a single value.
    TrailingData,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge => write!(f, "body must not be larger than {MAX_BODY_SIZE} bytes"),
            Self::Unreadable => write!(f, "failed to read request body"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::TrailingData => write!(f, "body must only contain a single JSON object"),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

/// Serialize `payload` as pretty-printed JSON and build the full response.
///
/// Caller-supplied headers are applied before `Content-Type`. A
/// serialization failure is returned to the caller with no response
/// constructed, so nothing has been committed to the wire yet.
pub fn write_json<T: Serialize>(
    status: StatusCode,
    payload: &T,
    extra_headers: &[(&str, &str)],
) -> Result<Response<Full<Bytes>>, serde_json::Error> {
    let body = serde_json::to_vec_pretty(payload)?;

    let mut builder = Response::builder().status(status);
    for (name, value) in extra_headers {
        builder = builder.header(*name, *value);
    }

    Ok(builder
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))))
}

/// Collect a request body (capped at [`MAX_BODY_SIZE`]) and decode exactly
/// one JSON value from it. Trailing non-whitespace after the first value is
/// rejected, so concatenated objects and garbage suffixes both fail.
pub async fn read_json<B, T>(body: B) -> Result<T, BodyError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    T: DeserializeOwned,
{
    let bytes = match Limited::new(body, MAX_BODY_SIZE).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) if err.is::<LengthLimitError>() => return Err(BodyError::TooLarge),
        Err(_) => return Err(BodyError::Unreadable),
    };

    let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
    let value = T::deserialize(&mut deserializer).map_err(BodyError::Invalid)?;
    deserializer.end().map_err(|_| BodyError::TrailingData)?;

    Ok(value)
}

/// Build the structured error envelope `{error, status, message}`.
pub fn write_json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let envelope = ErrorResponse {
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        status: status.as_u16(),
        message: message.to_string(),
    };

    write_json(status, &envelope, &[]).unwrap_or_else(|_| {
        Response::builder()
            .status(status)
            .header("Content-Type", "text/plain")
            .body(Full::new(Bytes::from("Internal Server Error")))
            .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
    })
}
