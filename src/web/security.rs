use actix_web::HttpRequest;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: usize,
    pub window: Duration,
}

/// Admin login attempts per client.
pub const LOGIN_LIMIT: RateLimit = RateLimit {
    max_requests: 5,
    window: Duration::from_secs(300),
};

/// Public press-release and contact submissions per client.
pub const SUBMISSION_LIMIT: RateLimit = RateLimit {
    max_requests: 10,
    window: Duration::from_secs(600),
};

/// Anonymous image uploads from the public submission form, per client.
pub const PUBLIC_UPLOAD_LIMIT: RateLimit = RateLimit {
    max_requests: 10,
    window: Duration::from_secs(600),
};

/// Simple in-memory sliding-window rate limiter
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Records the request and returns false once `key` is over `limit`.
    pub fn check(&self, key: &str, limit: RateLimit) -> bool {
        self.check_at(key, limit, Instant::now())
    }

    pub fn check_at(&self, key: &str, limit: RateLimit, now: Instant) -> bool {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();
        entry.retain(|&time| now.saturating_duration_since(time) < limit.window);

        if entry.len() >= limit.max_requests {
            return false;
        }
        entry.push(now);

        // Keep the map from growing without bound.
        requests.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rate-limit key for `scope` and the caller's address.
pub fn client_key(req: &HttpRequest, scope: &str) -> String {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    format!("{scope}:{client_ip}")
}
