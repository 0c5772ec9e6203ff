use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing::{debug, info};
use uuid::Uuid;

/// An authenticated session issued after a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub expires_at: SystemTime,
}

pub type SessionStore = Arc<Mutex<HashMap<String, Session>>>;

/// In-memory session issuing and lookup.
///
/// Sessions live for the process lifetime only and expire after the
/// configured TTL; the periodic maintenance sweep removes stale entries that
/// are never looked up again.
#[derive(Debug, Clone)]
pub struct SessionService {
    store: SessionStore,
    ttl: Duration,
}

impl SessionService {
    pub fn new(ttl_minutes: i64) -> Self {
        SessionService {
            store: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_minutes.max(1) as u64 * 60),
        }
    }

    /// Issue a new session for an authenticated user
    pub fn create(&self, email: &str, name: &str, roles: Vec<String>) -> Session {
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles,
            expires_at: SystemTime::now() + self.ttl,
        };

        let mut sessions = self.store.lock().unwrap();
        sessions.insert(session.token.clone(), session.clone());
        debug!(
            "Created session for {}, {} session(s) active",
            email,
            sessions.len()
        );

        session
    }

    /// Look up a session by token. An expired session is removed on
    /// observation and no longer authenticates.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.store.lock().unwrap();
        match sessions.get(token) {
            Some(session) if session.expires_at > SystemTime::now() => Some(session.clone()),
            Some(_) => {
                debug!("Session expired, removing");
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Remove a session (logout). Returns whether a session existed.
    pub fn remove(&self, token: &str) -> bool {
        self.store.lock().unwrap().remove(token).is_some()
    }

    /// Remove all expired sessions, returning how many were dropped
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.store.lock().unwrap();
        let initial_count = sessions.len();
        let now = SystemTime::now();

        sessions.retain(|_, session| session.expires_at > now);

        let removed = initial_count - sessions.len();
        if removed > 0 {
            info!(
                "Cleaned up {} expired session(s), {} remaining",
                removed,
                sessions.len()
            );
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_session_is_retrievable() {
        let service = SessionService::new(60);
        let session = service.create("a@x.com", "Alex", vec!["parent".to_string()]);

        let found = service.get(&session.token).expect("session must exist");
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.roles, vec!["parent".to_string()]);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let service = SessionService::new(60);
        assert!(service.get("no-such-token").is_none());
    }

    #[test]
    fn test_removed_session_no_longer_authenticates() {
        let service = SessionService::new(60);
        let session = service.create("a@x.com", "Alex", vec![]);

        assert!(service.remove(&session.token));
        assert!(service.get(&session.token).is_none());
        assert!(!service.remove(&session.token));
    }

    #[test]
    fn test_expired_session_is_dropped_on_lookup() {
        let service = SessionService::new(60);
        let session = service.create("a@x.com", "Alex", vec![]);

        // backdate the expiry
        {
            let mut sessions = service.store.lock().unwrap();
            sessions.get_mut(&session.token).unwrap().expires_at =
                SystemTime::now() - Duration::from_secs(60);
        }

        assert!(service.get(&session.token).is_none());
        assert!(service.store.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cleanup_removes_only_expired_sessions() {
        let service = SessionService::new(60);
        let stale = service.create("stale@x.com", "Stale", vec![]);
        let fresh = service.create("fresh@x.com", "Fresh", vec![]);

        {
            let mut sessions = service.store.lock().unwrap();
            sessions.get_mut(&stale.token).unwrap().expires_at =
                SystemTime::now() - Duration::from_secs(60);
        }

        assert_eq!(service.cleanup_expired(), 1);
        assert!(service.get(&fresh.token).is_some());
        assert!(service.get(&stale.token).is_none());
    }
}
