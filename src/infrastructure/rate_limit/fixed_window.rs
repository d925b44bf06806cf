//! In-memory fixed-window rate limiter.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Request counter for one client within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub count: u32,
    pub window_reset_at: Instant,
}

/// Fixed-window request counter keyed by client identifier.
///
/// Each key gets `max_requests` requests per `window`. The first request after
/// `window_reset_at` replaces the record and starts a new window.
///
/// When the map grows past `prune_threshold` entries, expired records are swept
/// before the next check so a long-running process keeps bounded memory. At
/// most one sweep runs per window.
///
/// State is process-local: several instances behind a load balancer each keep
/// their own counters.
///
/// # Example
///
/// ```rust,ignore
/// let limiter = FixedWindowLimiter::new(10, Duration::from_secs(60), 500);
///
/// if !limiter.check("203.0.113.7") {
///     return Err(AppError::rate_limited("Rate limit exceeded. Please try again later."));
/// }
/// ```
#[derive(Clone)]
pub struct FixedWindowLimiter {
    inner: Arc<LimiterInner>,
}

struct LimiterInner {
    max_requests: u32,
    window: Duration,
    prune_threshold: usize,
    records: DashMap<String, RateLimitRecord>,
    last_prune: Mutex<Option<Instant>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration, prune_threshold: usize) -> Self {
        Self {
            inner: Arc::new(LimiterInner {
                max_requests,
                window,
                prune_threshold,
                records: DashMap::new(),
                last_prune: Mutex::new(None),
            }),
        }
    }

    /// Records a request for `key` and returns `true` if it is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Same as [`Self::check`] with an explicit clock reading.
    ///
    /// Within a window the request that reaches `max_requests` is still allowed;
    /// every later one is denied and leaves the count at `max_requests`.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        self.maybe_prune(now);

        let fresh = RateLimitRecord {
            count: 1,
            window_reset_at: now + self.inner.window,
        };

        match self.inner.records.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(fresh);
                true
            }
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();

                if now > record.window_reset_at {
                    *record = fresh;
                    true
                } else if record.count < self.inner.max_requests {
                    record.count += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Sweeps expired records when over the threshold and no sweep ran within
    /// the last window. A concurrent sweep in progress skips this one.
    fn maybe_prune(&self, now: Instant) {
        if self.inner.records.len() <= self.inner.prune_threshold {
            return;
        }

        let Ok(mut last_prune) = self.inner.last_prune.try_lock() else {
            return;
        };

        if last_prune.is_some_and(|at| now < at + self.inner.window) {
            return;
        }

        *last_prune = Some(now);
        self.prune(now);
    }

    /// Removes every record whose window ended before `now`.
    ///
    /// Returns the number of removed records.
    pub fn prune(&self, now: Instant) -> usize {
        let before = self.inner.records.len();
        self.inner
            .records
            .retain(|_, record| now <= record.window_reset_at);
        let removed = before.saturating_sub(self.inner.records.len());

        debug!(removed, "Pruned expired rate limit records");
        removed
    }

    /// Current record for `key`, if any.
    pub fn record(&self, key: &str) -> Option<RateLimitRecord> {
        self.inner.records.get(key).map(|r| *r)
    }

    /// Number of tracked clients.
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    pub fn max_requests(&self) -> u32 {
        self.inner.max_requests
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }
}
