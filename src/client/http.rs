//! Shared HTTP client and auth utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::CoraError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> CoraError {
    match status {
        401 | 403 => CoraError::Authentication(error_message(body)),
        404 => CoraError::NotFound(error_message(body)),
        429 => CoraError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => CoraError::api(status, error_message(body)),
    }
}

/// Pull the human-readable message out of a Vapi error body.
///
/// Vapi answers with `{"message": ..., "error": ..., "statusCode": ...}`;
/// `message` may be a string or a list of validation messages.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    match value.get("message") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(messages)) => messages
            .iter()
            .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("retryAfter")
                .or_else(|| v.get("error").and_then(|e| e.get("retry_after")))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
