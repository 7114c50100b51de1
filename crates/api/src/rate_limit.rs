use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Buckets {
    hits: HashMap<String, VecDeque<Instant>>,
    swept_at: Option<Instant>,
}

impl Buckets {
    // At most once per window, forget clients whose newest hit has aged out.
    fn sweep(&mut self, now: Instant, window: Duration) {
        let due = self
            .swept_at
            .map_or(true, |at| now.duration_since(at) >= window);
        if !due {
            return;
        }

        self.hits.retain(|_, hits| {
            hits.back()
                .is_some_and(|last| now.duration_since(*last) <= window)
        });
        self.swept_at = Some(now);
    }
}

/// Sliding-window request budget per client key.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    buckets: Arc<Mutex<Buckets>>,
    window: Duration,
    max_requests: usize,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(Buckets::default())),
            window,
            max_requests,
        }
    }

    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().hits.len()
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let window = self.window;
        let mut buckets = self.buckets.lock();
        buckets.sweep(now, window);

        let hits = buckets.hits.entry(client.to_owned()).or_default();
        hits.retain(|at| now.duration_since(*at) <= window);

        if hits.len() >= self.max_requests {
            return false;
        }
        hits.push_back(now);
        true
    }
}
