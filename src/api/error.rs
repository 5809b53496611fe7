//! Error taxonomy for the Weezevent legacy API
//!
//! Non-200 responses carry either a structured JSON error envelope (a
//! top-level `error` object takes precedence over top-level fields) or an
//! arbitrary body. The importer performs no retries: any of these aborts
//! the run.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured error envelope returned by the platform.
    #[error("api error: {message} (type={kind}, code={code}, http_status={http_status})")]
    Remote {
        message: String,
        kind: String,
        code: i64,
        http_status: u16,
    },

    /// Non-200 response whose body is not a well-formed error envelope.
    #[error("server error (http_status={http_status}): {raw_body}")]
    Server { raw_body: String, http_status: u16 },

    /// Participant count mismatch after a bulk update. Reserved: the batch
    /// submit flow does not raise it today.
    #[error("not all participants have been updated: {updated}/{expected} ({extracted})")]
    PartialUpdate {
        expected: u64,
        extracted: u64,
        updated: u64,
    },

    /// Transport failure before any response arrived.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Classify a non-200 response body.
    ///
    /// `message` and `code` are mandatory in the envelope; a body missing
    /// either (or not JSON at all) degrades to [`ApiError::Server`] with the
    /// raw body preserved.
    pub fn from_error_body(http_status: u16, body: &str) -> Self {
        if let Ok(data) = serde_json::from_str::<Value>(body) {
            let data = match data.get("error") {
                Some(inner) => inner.clone(),
                None => data,
            };
            let message = data.get("message").and_then(Value::as_str);
            let code = data.get("code").and_then(as_code);
            if let (Some(message), Some(code)) = (message, code) {
                let kind = data
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                return ApiError::Remote {
                    message: message.to_string(),
                    kind,
                    code,
                    http_status,
                };
            }
        }
        ApiError::Server {
            raw_body: body.to_string(),
            http_status,
        }
    }
}

/// Error codes arrive as JSON numbers or numeric strings depending on the
/// endpoint.
fn as_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
