//! Token-keyed store correlating a plan with its later check.

use deskplan_core::RgbImage;
use log::debug;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Opaque session handle, 32 lowercase hex digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn random() -> Self {
        Self(format!("{:032x}", rand::thread_rng().gen::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.trim().to_ascii_lowercase())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The canvases a later check compares against.
#[derive(Clone, Debug)]
pub struct StoredPlan {
    /// Pristine rectified canvas.
    pub before: Arc<RgbImage>,
    /// The canvas with arrows drawn.
    pub plan: Arc<RgbImage>,
}

struct Entry {
    plan: StoredPlan,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|t| t > now)
    }
}

/// In-memory session store with a fixed time-to-live.
///
/// Expired entries are invisible to lookups and are dropped on the next
/// insert or [`purge_expired`](Self::purge_expired).
pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<SessionToken, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionToken, Entry>> {
        // the map stays consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, plan: StoredPlan) -> SessionToken {
        self.insert_at(plan, Instant::now())
    }

    /// Store `plan` as if the current time were `now`.
    pub fn insert_at(&self, plan: StoredPlan, now: Instant) -> SessionToken {
        let mut entries = self.lock();
        entries.retain(|_, e| e.is_live(now));
        let mut token = SessionToken::random();
        while entries.contains_key(&token) {
            token = SessionToken::random();
        }
        entries.insert(
            token.clone(),
            Entry {
                plan,
                expires_at: now.checked_add(self.ttl),
            },
        );
        debug!("session {token} stored, {} live", entries.len());
        token
    }

    pub fn get(&self, token: &SessionToken) -> Option<StoredPlan> {
        self.get_at(token, Instant::now())
    }

    pub fn get_at(&self, token: &SessionToken, now: Instant) -> Option<StoredPlan> {
        self.lock()
            .get(token)
            .filter(|e| e.is_live(now))
            .map(|e| e.plan.clone())
    }

    /// Remove and return a live session.
    pub fn remove(&self, token: &SessionToken) -> Option<StoredPlan> {
        let now = Instant::now();
        self.lock()
            .remove(token)
            .filter(|e| e.is_live(now))
            .map(|e| e.plan)
    }

    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Drop sessions expired at `now`; returns how many were dropped.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }

    /// Number of stored sessions, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .field("sessions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(shade: u8) -> StoredPlan {
        StoredPlan {
            before: Arc::new(RgbImage::filled(4, 4, [shade; 3])),
            plan: Arc::new(RgbImage::filled(4, 4, [shade, 0, 0])),
        }
    }

    #[test]
    fn tokens_are_distinct_hex() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.insert(stored(1));
        let b = store.insert(stored(2));
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sessions_are_isolated_per_token() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.insert(stored(1));
        let b = store.insert(stored(2));
        assert_eq!(store.get(&a).expect("a").before.data[0], 1);
        assert_eq!(store.get(&b).expect("b").before.data[0], 2);
        assert!(store.get(&SessionToken::from("ffff")).is_none());
    }

    #[test]
    fn sessions_expire_after_ttl() {
        let store = SessionStore::new(Duration::from_secs(10));
        let t0 = Instant::now();
        let token = store.insert_at(stored(3), t0);
        assert!(store.get_at(&token, t0 + Duration::from_secs(9)).is_some());
        assert!(store.get_at(&token, t0 + Duration::from_secs(10)).is_none());

        assert_eq!(store.purge_expired_at(t0 + Duration::from_secs(5)), 0);
        assert_eq!(store.purge_expired_at(t0 + Duration::from_secs(11)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn unbounded_ttl_never_expires() {
        let store = SessionStore::new(Duration::from_secs(u64::MAX));
        let t0 = Instant::now();
        let token = store.insert_at(stored(4), t0);
        let much_later = t0 + Duration::from_secs(10 * 365 * 24 * 3600);
        assert!(store.get_at(&token, much_later).is_some());
        assert_eq!(store.purge_expired_at(much_later), 0);
    }

    #[test]
    fn insert_drops_expired_entries() {
        let store = SessionStore::new(Duration::from_secs(1));
        let t0 = Instant::now();
        store.insert_at(stored(1), t0);
        store.insert_at(stored(2), t0 + Duration::from_secs(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_consumes_the_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.insert(stored(1));
        assert!(store.remove(&token).is_some());
        assert!(store.get(&token).is_none());
    }

    #[test]
    fn token_parsing_normalizes_case() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.insert(stored(1));
        let upper = token.as_str().to_ascii_uppercase();
        assert!(store.get(&SessionToken::from(upper.as_str())).is_some());
    }
}
