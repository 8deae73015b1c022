use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

const RETRY_DELAY_MAX_EXPONENT: u32 = 6;

pub fn is_retryable_github_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

pub fn is_retryable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Reads an integral `Retry-After` header if the response carried one.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Exponential backoff delay for the given attempt; a server-provided
/// `Retry-After` always wins.
pub fn retry_delay(base_delay_ms: u64, attempt: usize, retry_after: Option<Duration>) -> Duration {
    if let Some(retry_after) = retry_after {
        return retry_after;
    }
    let exponent = attempt.saturating_sub(1).min(RETRY_DELAY_MAX_EXPONENT as usize) as u32;
    Duration::from_millis(base_delay_ms.max(1).saturating_mul(1_u64 << exponent))
}

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
