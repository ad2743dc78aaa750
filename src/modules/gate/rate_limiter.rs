use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

/// Result of one `admit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub allowed: bool,
    /// Requests recorded in the trailing window, this one included.
    pub used: usize,
    pub limit: usize,
}

impl Admission {
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }
}

/// Per-identifier sliding-window counter.
///
/// Every call to [`admit`](Self::admit) is recorded, rejected ones too, so a client that keeps
/// hammering stays blocked until it goes quiet for a full window. Each identifier's sequence
/// is guarded by its dashmap shard lock for the duration of the call.
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window_secs: f64,
    log: DashMap<String, Vec<f64>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window_secs: window.as_secs_f64(),
            log: DashMap::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.max_requests
    }

    /// Record a request at `now` (epoch seconds) and decide whether it is allowed.
    pub fn admit(&self, identifier: &str, now: f64) -> Admission {
        let window = self.window_secs;
        let mut stamps = self.log.entry(identifier.to_string()).or_default();
        stamps.push(now);
        stamps.retain(|t| now - *t < window);
        let used = stamps.len();

        Admission {
            allowed: used <= self.max_requests,
            used,
            limit: self.max_requests,
        }
    }

    /// Purge stale stamps everywhere and drop identifiers left with none. Returns evicted count.
    pub fn sweep(&self, now: f64) -> usize {
        let window = self.window_secs;
        let before = self.log.len();
        self.log.retain(|_, stamps| {
            stamps.retain(|t| now - *t < window);
            !stamps.is_empty()
        });
        let evicted = before.saturating_sub(self.log.len());
        if evicted > 0 {
            debug!("🧹 Rate limiter swept {} idle identifiers ({} remain)", evicted, self.log.len());
        }
        evicted
    }

    /// Number of identifiers currently held.
    pub fn tracked(&self) -> usize {
        self.log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(3, Duration::from_secs(300))
    }

    #[test]
    fn test_first_three_admitted_fourth_rejected() {
        let rl = limiter();
        let t0 = 1_700_000_000.0;

        let remaining: Vec<usize> = (0..3)
            .map(|i| {
                let a = rl.admit("10.0.0.1", t0 + i as f64);
                assert!(a.allowed);
                a.remaining()
            })
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let fourth = rl.admit("10.0.0.1", t0 + 9.0);
        assert!(!fourth.allowed);
        assert_eq!(fourth.used, 4);
        assert_eq!(fourth.remaining(), 0);
    }

    #[test]
    fn test_window_expiry_readmits() {
        let rl = limiter();
        let t0 = 1_700_000_000.0;
        for i in 0..4 {
            rl.admit("10.0.0.1", t0 + i as f64);
        }
        assert!(!rl.admit("10.0.0.1", t0 + 10.0).allowed);

        // every earlier stamp is >= 300s old here
        let later = rl.admit("10.0.0.1", t0 + 310.0);
        assert!(later.allowed);
        assert_eq!(later.used, 1);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let rl = limiter();
        let t0 = 1_000.0;
        rl.admit("a", t0);
        rl.admit("a", t0 + 1.0);
        rl.admit("a", t0 + 2.0);
        // t0 is exactly 300s old and falls out of the window
        let a = rl.admit("a", t0 + 300.0);
        assert!(a.allowed);
        assert_eq!(a.used, 3);
    }

    #[test]
    fn test_identifiers_are_independent() {
        let rl = limiter();
        for i in 0..5 {
            rl.admit("busy", i as f64);
        }
        let other = rl.admit("quiet", 5.0);
        assert!(other.allowed);
        assert_eq!(other.used, 1);
        assert_eq!(rl.tracked(), 2);
    }

    #[test]
    fn test_sweep_evicts_idle_identifiers_only() {
        let rl = limiter();
        rl.admit("old", 0.0);
        rl.admit("fresh", 250.0);

        assert_eq!(rl.sweep(320.0), 1);
        assert_eq!(rl.tracked(), 1);

        // "fresh" keeps its stamp
        assert_eq!(rl.admit("fresh", 321.0).used, 2);
        assert_eq!(rl.admit("old", 321.0).used, 1);
    }

    #[test]
    fn test_concurrent_same_identifier_never_over_admits() {
        let rl = limiter();
        let now = 42.0;
        let admitted: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| rl.admit("shared", now).allowed as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(admitted, 3);
    }
}
