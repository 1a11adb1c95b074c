use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;
use voting_errors::AppError;

const MAX_MUTATIONS_PER_MINUTE: u32 = 10;
const MAX_MUTATIONS_PER_HOUR: u32 = 60;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
struct RequestRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl RequestRecord {
    fn roll_windows(&mut self, now: Instant) {
        if now.duration_since(self.minute_start) > Duration::from_secs(60) {
            self.minute_count = 0;
            self.minute_start = now;
        }
        if now.duration_since(self.hour_start) > Duration::from_secs(3600) {
            self.hour_count = 0;
            self.hour_start = now;
        }
    }
}

impl Default for RequestRecord {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Caps how often one user may create polls or cast votes.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<Uuid, RequestRecord>>,
    last_cleanup: Arc<Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_MUTATIONS_PER_MINUTE, MAX_MUTATIONS_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    /// Refuses the user while either window is full. Does not count anything;
    /// call [`RateLimiter::record`] once the write went through.
    pub fn check(&self, user_id: Uuid) -> Result<(), AppError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let Some(mut record) = self.requests.get_mut(&user_id) else {
            return Ok(());
        };
        record.roll_windows(now);

        if record.minute_count >= self.per_minute {
            let wait_secs = 60u64.saturating_sub(now.duration_since(record.minute_start).as_secs());
            tracing::warn!("User {} hit the per-minute limit", user_id);
            return Err(AppError::RateLimited(wait_secs.max(1)));
        }

        if record.hour_count >= self.per_hour {
            let wait_secs = 3600u64.saturating_sub(now.duration_since(record.hour_start).as_secs());
            tracing::warn!("User {} hit the hourly limit", user_id);
            return Err(AppError::RateLimited(wait_secs.max(1)));
        }

        Ok(())
    }

    /// Counts one completed mutation against the user.
    pub fn record(&self, user_id: Uuid) {
        let now = Instant::now();
        let mut record = self.requests.entry(user_id).or_default();
        record.roll_windows(now);
        record.minute_count += 1;
        record.hour_count += 1;
    }

    fn maybe_cleanup(&self) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            let cutoff = Instant::now() - Duration::from_secs(3600);
            self.requests.retain(|_, v| v.hour_start > cutoff);
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spend(limiter: &RateLimiter, user: Uuid) -> Result<(), AppError> {
        limiter.check(user)?;
        limiter.record(user);
        Ok(())
    }

    #[test]
    fn test_limit_is_per_user() {
        let limiter = RateLimiter::with_limits(2, 10);
        let (ana, ben) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(spend(&limiter, ana).is_ok());
        assert!(spend(&limiter, ana).is_ok());
        assert!(matches!(limiter.check(ana), Err(AppError::RateLimited(_))));
        assert!(spend(&limiter, ben).is_ok());
    }

    #[test]
    fn test_hourly_limit() {
        let limiter = RateLimiter::with_limits(100, 3);
        let user = Uuid::new_v4();
        for _ in 0..3 {
            assert!(spend(&limiter, user).is_ok());
        }
        match limiter.check(user) {
            Err(AppError::RateLimited(secs)) => assert!(secs > 60),
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[test]
    fn test_refused_attempts_are_free() {
        let limiter = RateLimiter::with_limits(2, 10);
        let user = Uuid::new_v4();

        // Checks without a recorded write, as for invalid drafts or repeat votes.
        for _ in 0..20 {
            assert!(limiter.check(user).is_ok());
        }
        assert!(spend(&limiter, user).is_ok());
        assert!(spend(&limiter, user).is_ok());
        assert!(limiter.check(user).is_err());
    }
}
