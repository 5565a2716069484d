use dataseed_core::CallOutcome;
use reqwest::StatusCode;

/// Map a transport-level failure onto an outcome.
///
/// Anything that never produced an HTTP response is worth retrying.
pub(crate) fn transport_failure(err: &reqwest::Error) -> CallOutcome {
    if err.is_timeout() {
        CallOutcome::transient("Request timeout")
    } else if err.is_connect() {
        CallOutcome::transient(format!("Connection error: {err}"))
    } else if err.is_decode() {
        CallOutcome::permanent(format!("Malformed response: {err}"))
    } else {
        CallOutcome::transient(format!("Request failed: {err}"))
    }
}

/// Map a non-success status onto an outcome.
pub(crate) fn status_failure(status: StatusCode, body: &str) -> CallOutcome {
    let reason = format!("HTTP {}: {}", status.as_u16(), truncate(body, 512));
    if is_retryable_status(status) {
        CallOutcome::transient(reason)
    } else {
        CallOutcome::permanent(reason)
    }
}

pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
}

pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
