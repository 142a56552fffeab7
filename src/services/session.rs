use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::services::clock::Clock;

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Opaque admin session tokens with a fixed lifetime. Tokens live in memory
/// only and do not survive a restart.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn issue(&self) -> Session {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = self.clock.now() + self.ttl;

        self.sessions().insert(token.clone(), expires_at);
        Session { token, expires_at }
    }

    /// True while the token is known and unexpired. Expired tokens are
    /// dropped on sight.
    pub fn validate(&self, token: &str) -> bool {
        let now = self.clock.now();
        let mut sessions = self.sessions();

        match sessions.get(token) {
            Some(&expires_at) if expires_at > now => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.sessions().remove(token);
    }

    /// Returns how many sessions were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, expires_at| *expires_at > now);
        before - sessions.len()
    }

    pub fn active_count(&self) -> usize {
        self.sessions().len()
    }
}
