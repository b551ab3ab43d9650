use web_time::{Duration, Instant};

/// Default spacing between applied resizes.
pub const RESIZE_INTERVAL: Duration = Duration::from_millis(500);

/// Leading and trailing edge rate limiter for resize handling.
///
/// The first request after a quiet period fires immediately. Requests
/// inside the interval are coalesced into one trailing fire, which the host
/// collects by calling [`poll`](Self::poll) once per frame.
#[derive(Debug, Clone, Copy)]
pub struct ResizeThrottle {
    interval: Duration,
    last_fire: Option<Instant>,
    pending: bool,
}

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self::new(RESIZE_INTERVAL)
    }
}

impl ResizeThrottle {
    /// Throttle allowing one resize per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: false,
        }
    }

    /// A resize was observed at `now`. Returns `true` if it should be
    /// applied right away.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.fire(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns `true` once when a coalesced resize is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.ready(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    /// [`request`](Self::request) at the current time.
    pub fn request_now(&mut self) -> bool {
        self.request(Instant::now())
    }

    /// [`poll`](Self::poll) at the current time.
    pub fn poll_now(&mut self) -> bool {
        self.poll(Instant::now())
    }

    /// Whether a trailing resize is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn ready(&self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }

    fn fire(&mut self, now: Instant) {
        self.last_fire = Some(now);
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_fires_immediately() {
        let mut t = ResizeThrottle::default();
        assert!(t.request(Instant::now()));
        assert!(!t.is_pending());
    }

    #[test]
    fn burst_collapses_into_one_trailing_fire() {
        let mut t = ResizeThrottle::default();
        let t0 = Instant::now();
        assert!(t.request(t0));
        assert!(!t.request(t0 + Duration::from_millis(100)));
        assert!(!t.request(t0 + Duration::from_millis(200)));
        assert!(!t.poll(t0 + Duration::from_millis(499)));
        assert!(t.poll(t0 + Duration::from_millis(500)));
        assert!(!t.poll(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn quiet_period_resets_leading_edge() {
        let mut t = ResizeThrottle::new(Duration::from_millis(50));
        let t0 = Instant::now();
        assert!(t.request(t0));
        assert!(t.request(t0 + Duration::from_millis(60)));
    }
}
