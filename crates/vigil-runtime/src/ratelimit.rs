//! Per-session sliding-window rate limiting
//!
//! Admission control for the signal append path. Each session keeps a
//! FIFO queue of admit timestamps behind its own mutex; the prune and
//! decide step runs under that lock, so no more than `limit` requests
//! are admitted in any rolling window per session regardless of how
//! many handlers race on it. The global map is created lazily on a
//! session's first request.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Default per-session admission limit
pub const DEFAULT_MAX_REQUESTS_PER_MINUTE: u32 = 100;

const WINDOW: Duration = Duration::from_secs(60);

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,

    /// Requests left in the current window (0 when denied)
    pub remaining: u32,

    pub limit: u32,

    /// How long until the window frees a slot; zero when allowed,
    /// clamped to at least one second when denied
    pub retry_after: Duration,
}

/// Sliding-window limiter keyed by session ID
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    enabled: bool,
    windows: RwLock<HashMap<Uuid, Arc<Mutex<VecDeque<Instant>>>>>,
}

impl RateLimiter {
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, WINDOW)
    }

    /// A limiter that admits everything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(DEFAULT_MAX_REQUESTS_PER_MINUTE)
        }
    }

    fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            enabled: true,
            windows: RwLock::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Prune, decide, and (when allowed) record one admission
    pub async fn check(&self, session_id: Uuid) -> RateLimitDecision {
        if !self.enabled {
            return RateLimitDecision {
                allowed: true,
                remaining: self.limit,
                limit: self.limit,
                retry_after: Duration::ZERO,
            };
        }

        let queue = self.queue_for(session_id).await;
        let mut timestamps = queue.lock().await;
        let now = Instant::now();

        while timestamps
            .front()
            .is_some_and(|&oldest| now.duration_since(oldest) >= self.window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() as u32 >= self.limit {
            let retry_after = timestamps
                .front()
                .map(|&oldest| (oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window)
                .max(Duration::from_secs(1));

            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                limit: self.limit,
                retry_after,
            };
        }

        timestamps.push_back(now);

        RateLimitDecision {
            allowed: true,
            remaining: self.limit - timestamps.len() as u32,
            limit: self.limit,
            retry_after: Duration::ZERO,
        }
    }

    async fn queue_for(&self, session_id: Uuid) -> Arc<Mutex<VecDeque<Instant>>> {
        {
            let windows = self.windows.read().await;
            if let Some(queue) = windows.get(&session_id) {
                return Arc::clone(queue);
            }
        }

        let mut windows = self.windows.write().await;
        Arc::clone(windows.entry(session_id).or_default())
    }
}
