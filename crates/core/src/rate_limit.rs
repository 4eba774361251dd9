use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Requests allowed per window by the Todoist REST API
pub const DEFAULT_REQUEST_LIMIT: u32 = 450;

/// Length of the rate limit window (15 minutes)
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

/// Limits applied by a [`RateWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_REQUEST_LIMIT,
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
        }
    }
}

/// The local request budget is used up until `reset_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rate limit exceeded. Resets at {}", .reset_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))]
pub struct BudgetExhausted {
    pub reset_at: DateTime<Utc>,
}

/// Fixed-window request counter.
///
/// `check` only evaluates the budget; callers `record` each request once it
/// has completed. The counter is only ever cleared by a window reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateWindow {
    pub window_start: DateTime<Utc>,
    pub requests_in_window: u32,
    #[serde(skip)]
    limits: RateLimits,
}

impl RateWindow {
    /// Create a window with the default Todoist limits, starting now
    pub fn new() -> Self {
        Self::with_limits(RateLimits::default(), Utc::now())
    }

    /// Create a window with custom limits starting at `now`
    pub fn with_limits(limits: RateLimits, now: DateTime<Utc>) -> Self {
        Self {
            window_start: now,
            requests_in_window: 0,
            limits,
        }
    }

    pub fn limits(&self) -> RateLimits {
        self.limits
    }

    /// When the current window ends
    pub fn reset_at(&self) -> DateTime<Utc> {
        self.window_start + self.limits.window
    }

    /// Check whether another request may be sent at `now`.
    ///
    /// Starts a fresh window when `now` is past the end of the current one.
    pub fn check(&mut self, now: DateTime<Utc>) -> Result<(), BudgetExhausted> {
        if now - self.window_start > self.limits.window {
            self.window_start = now;
            self.requests_in_window = 0;
        }

        if self.requests_in_window >= self.limits.max_requests {
            return Err(BudgetExhausted {
                reset_at: self.reset_at(),
            });
        }

        Ok(())
    }

    /// Count one completed request against the current window
    pub fn record(&mut self) {
        self.requests_in_window = self.requests_in_window.saturating_add(1);
    }
}

impl Default for RateWindow {
    fn default() -> Self {
        Self::new()
    }
}
