//! Cross-page hand-off of a single submission result.
//!
//! A success travels as JSON under the `data` query key, a failure as a
//! plain message under `error`. Exactly one key is ever produced. On landing
//! `error` is checked first, so it wins when both are present.

use crate::core::errors::{TransferDecodeError, TransferEncodeError};
use crate::models::{Recommendation, SubmissionResult};
use std::time::Duration;
use thiserror::Error;

pub const DATA_KEY: &str = "data";
pub const ERROR_KEY: &str = "error";

/// Message carried under `error` when a success payload cannot be serialized
const ENCODE_FAILURE_MESSAGE: &str = "recommendation could not be delivered";

/// Serialized form of one `SubmissionResult`, before URL encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPayload {
    Data(String),
    Error(String),
}

impl TransferPayload {
    pub fn encode(result: &SubmissionResult) -> Result<Self, TransferEncodeError> {
        match result {
            SubmissionResult::Success(recommendation) => {
                Ok(TransferPayload::Data(serde_json::to_string(recommendation)?))
            }
            SubmissionResult::Failure { message } => Ok(TransferPayload::Error(message.clone())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TransferPayload::Data(_) => DATA_KEY,
            TransferPayload::Error(_) => ERROR_KEY,
        }
    }

    pub fn to_query(&self) -> String {
        let value = match self {
            TransferPayload::Data(json) => json,
            TransferPayload::Error(message) => message,
        };
        format!("{}={}", self.key(), urlencoding::encode(value))
    }
}

/// Destination address carrying `result` for the landing page at `path`
pub fn destination(path: &str, result: &SubmissionResult) -> String {
    let payload = TransferPayload::encode(result).unwrap_or_else(|e| {
        tracing::error!("Failed to encode transfer payload: {}", e);
        TransferPayload::Error(ENCODE_FAILURE_MESSAGE.to_string())
    });

    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, payload.to_query())
}

/// Why the landing page has no recommendation to show
#[derive(Debug, Error)]
pub enum LandingError {
    /// The submitting page sent an explicit `error`
    #[error("{0}")]
    Reported(String),

    #[error(transparent)]
    Decode(#[from] TransferDecodeError),
}

/// Decode the landing page's raw query string
pub fn decode_query(query: &str) -> Result<Recommendation, LandingError> {
    decode_params(
        query_param(query, ERROR_KEY).as_deref(),
        query_param(query, DATA_KEY).as_deref(),
    )
}

/// Decode already URL-decoded `error` / `data` values
///
/// An empty `error` value counts as absent and decoding falls through to
/// `data`; likewise an empty `data` value is reported as missing.
pub fn decode_params(error: Option<&str>, data: Option<&str>) -> Result<Recommendation, LandingError> {
    if let Some(message) = error.filter(|m| !m.is_empty()) {
        return Err(LandingError::Reported(message.to_string()));
    }

    let data = data
        .filter(|d| !d.is_empty())
        .ok_or(TransferDecodeError::Missing)?;

    let value: serde_json::Value =
        serde_json::from_str(data).map_err(TransferDecodeError::Malformed)?;

    match value.get("recommended_menu") {
        Some(menu) if menu.is_object() => {}
        _ => return Err(TransferDecodeError::IncompleteRecommendation.into()),
    }

    serde_json::from_value(value)
        .map_err(|e| TransferDecodeError::Malformed(e).into())
}

/// Decode on landing, holding the result back until `min_display` has passed
pub async fn land(query: &str, min_display: Duration) -> Result<Recommendation, LandingError> {
    let started = tokio::time::Instant::now();
    let outcome = decode_query(query);
    tokio::time::sleep_until(started + min_display).await;
    outcome
}

/// First value for `key`, URL-decoded; `+` is read as a space
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some((k, v)) => Some((k, v)),
            None if !pair.is_empty() => Some((pair, "")),
            None => None,
        })
        .find(|(k, _)| percent_decode(k) == key)
        .map(|(_, v)| percent_decode(v))
}

fn percent_decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}
