//! Per-client fixed-window rate limiting
//!
//! Counts requests per client IP inside a fixed window. Requests with no
//! resolvable peer address all share a single bucket rather than bypassing
//! the limiter.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request limiter keyed by client IP
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: Mutex<HashMap<Option<IpAddr>, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from the given client. Returns the seconds until the
    /// window resets when the client is over its limit.
    pub fn check(&self, client: Option<IpAddr>) -> Result<(), u64> {
        let now = Instant::now();
        let mut buckets = match self.buckets.lock() {
            Ok(buckets) => buckets,
            // A poisoned lock means a panic elsewhere; failing open keeps the
            // limiter from taking the API down with it.
            Err(_) => return Ok(()),
        };

        if buckets.len() > PRUNE_THRESHOLD {
            let window = self.window;
            buckets.retain(|_, w| now.duration_since(w.started_at) < window);
        }

        let bucket = buckets.entry(client).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(bucket.started_at) >= self.window {
            bucket.started_at = now;
            bucket.count = 0;
        }

        bucket.count += 1;
        if bucket.count > self.max_requests {
            let remaining = self.window.saturating_sub(now.duration_since(bucket.started_at));
            return Err(remaining.as_secs().max(1));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last: u8) -> Option<IpAddr> {
        Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)))
    }

    #[test]
    fn test_requests_under_limit_pass() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.check(ip(1)).is_ok());
        }
    }

    #[test]
    fn test_request_over_limit_is_rejected_with_retry_after() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check(ip(1)).is_ok());
        assert!(limiter.check(ip(1)).is_ok());

        let retry_after = limiter.check(ip(1)).unwrap_err();
        assert!(retry_after >= 1);
        assert!(retry_after <= 60);
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check(ip(1)).is_ok());
        assert!(limiter.check(ip(2)).is_ok());
        assert!(limiter.check(ip(1)).is_err());
        assert!(limiter.check(ip(2)).is_err());
    }

    #[test]
    fn test_unattributable_clients_share_a_bucket() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check(None).is_ok());
        assert!(limiter.check(None).is_err());
    }

    #[test]
    fn test_window_reset_allows_new_requests() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.check(ip(1)).is_ok());
        assert!(limiter.check(ip(1)).is_err());

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check(ip(1)).is_ok());
    }
}
