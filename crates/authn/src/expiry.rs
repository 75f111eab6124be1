//! Token validity window.
//!
//! Tokens carry an issue timestamp rather than an expiry claim; the
//! gateway decides freshness. A token is live when its `iat` is no later
//! than the current time and strictly newer than the window's lower edge.
//! Both edges are deliberate: a future `iat` means a skewed or forged
//! clock and is rejected outright, and a token issued exactly one window
//! ago is already stale.

use chrono::Utc;

/// Validity window for capability tokens, in milliseconds (5 minutes).
pub const TOKEN_EXPIRY_MILLIS: i64 = 5 * 60 * 1000;

/// Returns the current wall-clock time in milliseconds since the epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Returns `true` if `issued_at` lies within the validity window ending
/// at `now`.
///
/// The window is half-open: `now - window < issued_at <= now`.
#[must_use]
pub fn is_within_window(issued_at: i64, now: i64, window: i64) -> bool {
    issued_at <= now && issued_at > now - window
}
