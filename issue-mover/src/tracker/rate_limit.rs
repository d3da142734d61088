//! Proactive waiting on the GitHub core API rate limit.
//!
//! Only the calls that write to a repository check the limit first; reads
//! are left to octocrab's own retry handling.

use chrono::Utc;
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for the core API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

/// Checks the current rate limit status for the core API (issues, comments).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: u32::try_from(core.remaining).unwrap_or(u32::MAX),
        reset: core.reset,
        limit: u32::try_from(core.limit).unwrap_or(u32::MAX),
    })
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// Waits only when fewer than `MIN_REMAINING_THRESHOLD` requests remain and
/// the reset lies in the future; the wait is capped at `MAX_WAIT_SECS`.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return false;
    }

    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    if info.reset <= now {
        return false;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    let actual_wait = wait_secs.min(MAX_WAIT_SECS);
    info!(
        remaining = info.remaining,
        wait_secs = actual_wait,
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
    true
}

/// Ensures sufficient rate limit before making a core API call.
///
/// A failed probe is logged and otherwise ignored; the real call will
/// report the problem if there is one.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) {
    match check_core_rate_limit(octocrab).await {
        Ok(info) => {
            wait_if_needed(&info).await;
        }
        Err(e) => warn!(error = %e, "Failed to check rate limit, continuing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_wait_with_plenty_remaining() {
        let info = RateLimitInfo {
            remaining: 100,
            reset: u64::MAX,
            limit: 5000,
        };

        assert!(!wait_if_needed(&info).await);
    }

    #[tokio::test]
    async fn no_wait_when_reset_passed() {
        let info = RateLimitInfo {
            remaining: 1,
            reset: 0,
            limit: 5000,
        };

        assert!(!wait_if_needed(&info).await);
    }
}
