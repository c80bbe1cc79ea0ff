//! Response classification
//!
//! Decides whether a raw API response is a success or one of the failure
//! kinds the OMDb API reports. Classification is a pure function of the
//! response, the queried value and the API key; nothing is retried here.

use crate::transport::RawResponse;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Upstream message for a wrong API key
pub(crate) const MESSAGE_INVALID_KEY: &str = "Invalid API key!";
/// Upstream message for a request without API key
pub(crate) const MESSAGE_NO_KEY_PROVIDED: &str = "No API key provided.";
/// Upstream message for a malformed IMDb ID
pub(crate) const MESSAGE_INCORRECT_IMDB_ID: &str = "Incorrect IMDb ID.";
/// Upstream message for an IMDb ID the backend fails to convert
pub(crate) const MESSAGE_VARCHAR_CONVERT: &str = "Error converting data type varchar to int.";
/// Upstream message for an unknown title
pub(crate) const MESSAGE_NOT_FOUND: &str = "Movie not found!";

/// A decoded JSON object as returned by the API
pub type Payload = Map<String, Value>;

/// Result of classifying a response: the decoded payload on success, or the
/// specific failure kind.
pub type ClassifiedResponse = Result<Payload, ApiFailure>;

/// Failure kinds reported by (or deduced from) the API response.
///
/// The variants are mutually exclusive and carry the context needed for a
/// precise diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiFailure {
    /// The body is not JSON, not an object, or lacks the `Response` flag
    #[error("Could not get movie data for \"{value}\". Got response: \"{output}\"")]
    InvalidResponse {
        value: String,
        output: String,
        status: u16,
    },

    /// The API key was rejected or missing
    #[error("Invalid or missing API key \"{api_key}\"")]
    InvalidApiKey { api_key: String, status: u16 },

    /// The IMDb ID is malformed
    #[error("Incorrect IMDb ID \"{value}\"")]
    IncorrectImdbId { value: String, status: u16 },

    /// No title matches the query
    #[error("Could not find movie \"{value}\"")]
    MovieNotFound { value: String, status: u16 },

    /// Any other error message reported by the API
    #[error("Could not get movie data for \"{value}\". Got error message: \"{error}\"")]
    ApiError {
        value: String,
        error: String,
        status: u16,
    },
}

impl ApiFailure {
    /// HTTP status code of the response that produced this failure
    pub fn status(&self) -> u16 {
        match self {
            ApiFailure::InvalidResponse { status, .. }
            | ApiFailure::InvalidApiKey { status, .. }
            | ApiFailure::IncorrectImdbId { status, .. }
            | ApiFailure::MovieNotFound { status, .. }
            | ApiFailure::ApiError { status, .. } => *status,
        }
    }
}

/// Classifies a raw response.
///
/// Rules, in order:
/// 1. No JSON object, or an empty/missing `Response` field: `InvalidResponse`
/// 2. `Response == "False"`: the `Error` message selects the failure kind,
///    unknown messages become `ApiError`
/// 3. Anything else: success, the decoded object is returned unchanged
///
/// # Arguments
///
/// * `raw` - The transport's response
/// * `value` - The queried value (IMDb ID or title), used for diagnostics
/// * `api_key` - The API key the request was sent with
pub fn classify(raw: RawResponse, value: &str, api_key: &str) -> ClassifiedResponse {
    let RawResponse {
        body,
        decoded,
        status,
    } = raw;

    let payload = match decoded {
        Some(Value::Object(map)) if !is_empty_flag(map.get("Response")) => map,
        _ => {
            return Err(ApiFailure::InvalidResponse {
                value: value.to_string(),
                output: body,
                status,
            });
        }
    };

    if payload.get("Response").and_then(Value::as_str) != Some("False") {
        return Ok(payload);
    }

    let error = payload
        .get("Error")
        .and_then(Value::as_str)
        .unwrap_or_default();
    warn!(value, status, error, "OMDb API reported an error");

    Err(match error {
        MESSAGE_INVALID_KEY | MESSAGE_NO_KEY_PROVIDED => ApiFailure::InvalidApiKey {
            api_key: api_key.to_string(),
            status,
        },
        MESSAGE_INCORRECT_IMDB_ID | MESSAGE_VARCHAR_CONVERT => ApiFailure::IncorrectImdbId {
            value: value.to_string(),
            status,
        },
        MESSAGE_NOT_FOUND => ApiFailure::MovieNotFound {
            value: value.to_string(),
            status,
        },
        other => ApiFailure::ApiError {
            value: value.to_string(),
            error: other.to_string(),
            status,
        },
    })
}

/// Whether a `Response` flag counts as absent: missing, null, false, an
/// empty string or "0".
fn is_empty_flag(flag: Option<&Value>) -> bool {
    match flag {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.is_empty(),
    }
}
