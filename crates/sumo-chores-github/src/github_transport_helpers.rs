//! Retry and error-shaping helpers for GitHub REST calls.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

const MAX_BACKOFF: Duration = Duration::from_secs(30);
const MAX_BACKOFF_DOUBLINGS: u32 = 10;
pub const ERROR_BODY_EXCERPT_CHARS: usize = 800;

/// Bounded exponential backoff shared by every GitHub read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(base_delay_ms.max(1)),
        }
    }

    /// Writes get exactly one attempt.
    pub fn single_attempt(&self) -> Self {
        Self {
            max_attempts: 1,
            ..*self
        }
    }

    pub fn has_attempts_left(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based).
    ///
    /// A server-provided `Retry-After` wins but never undercuts the base delay.
    pub fn backoff(&self, attempt: usize, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint.max(self.base_delay);
        }
        let doublings = u32::try_from(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX)
            .min(MAX_BACKOFF_DOUBLINGS);
        self.base_delay
            .saturating_mul(1_u32 << doublings)
            .min(MAX_BACKOFF)
    }
}

/// `Retry-After` in its delta-seconds form; HTTP dates are ignored.
pub fn retry_after_hint(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 500..=599)
}

pub fn is_transient_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Shorten a response body for inclusion in an error message.
pub fn error_body_excerpt(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
