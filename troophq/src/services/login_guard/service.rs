use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use troophq_core::settings::lockout::LockoutSettings;

/// One identifier's consecutive login failures within the current window
#[derive(Debug, Clone, Copy)]
pub struct LoginAttemptRecord {
    pub count: u32,
    pub first_attempt: DateTime<Utc>,
}

type AttemptStore = Arc<Mutex<HashMap<String, LoginAttemptRecord>>>;

/// Tracks failed logins per identifier (email or IP) and locks an identifier
/// out once the failure threshold is reached within the rolling window.
///
/// State is held in memory for the process lifetime only: a restart clears
/// all lockouts. This is a known limitation, not a guarantee to rely on for
/// anything beyond a single process. Request-volume limiting on the login
/// route is a separate concern and lives in the rate limiting middleware.
#[derive(Debug)]
pub struct LoginAttemptGuard {
    attempts: AttemptStore,
    threshold: u32,
    window: Duration,
}

impl LoginAttemptGuard {
    pub fn new(settings: &LockoutSettings) -> Self {
        LoginAttemptGuard {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            threshold: settings.threshold,
            window: settings.window(),
        }
    }

    /// Whether the identifier is currently locked out.
    ///
    /// A record whose window has elapsed is removed on observation and no
    /// longer counts, whether or not it had reached the threshold.
    pub fn is_locked(&self, identifier: &str) -> bool {
        self.is_locked_at(identifier, Utc::now())
    }

    pub(crate) fn is_locked_at(&self, identifier: &str, now: DateTime<Utc>) -> bool {
        let mut attempts = self.attempts.lock().unwrap();

        let Some(record) = attempts.get(identifier).copied() else {
            return false;
        };

        if now >= record.first_attempt + self.window {
            debug!(
                "Lockout window for '{}' elapsed, dropping record",
                identifier
            );
            attempts.remove(identifier);
            return false;
        }

        record.count >= self.threshold
    }

    /// Record a failed login attempt and return the updated failure count.
    ///
    /// A failure outside the rolling window re-arms it: the record is reset
    /// to a fresh count of 1 instead of accumulating indefinitely.
    pub fn record_failure(&self, identifier: &str) -> u32 {
        self.record_failure_at(identifier, Utc::now())
    }

    pub(crate) fn record_failure_at(&self, identifier: &str, now: DateTime<Utc>) -> u32 {
        let mut attempts = self.attempts.lock().unwrap();

        let record = attempts
            .entry(identifier.to_string())
            .and_modify(|record| {
                if now - record.first_attempt > self.window {
                    record.count = 1;
                    record.first_attempt = now;
                } else {
                    record.count += 1;
                }
            })
            .or_insert(LoginAttemptRecord {
                count: 1,
                first_attempt: now,
            });

        if record.count == self.threshold {
            warn!(
                "Identifier '{}' locked out after {} failed login attempts",
                identifier, record.count
            );
        } else {
            debug!(
                "Failed login attempt {}/{} for '{}'",
                record.count, self.threshold, identifier
            );
        }

        record.count
    }

    /// Forget all failures for the identifier (called on successful login)
    pub fn clear_record(&self, identifier: &str) {
        let mut attempts = self.attempts.lock().unwrap();
        if attempts.remove(identifier).is_some() {
            debug!("Cleared login attempt record for '{}'", identifier);
        }
    }

    /// Drop all records whose window has elapsed.
    ///
    /// `is_locked` already purges on observation; this sweep catches records
    /// for identifiers that never come back, so the map does not grow without
    /// bound. Returns the number of removed records.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub(crate) fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut attempts = self.attempts.lock().unwrap();
        let initial_count = attempts.len();

        attempts.retain(|_, record| now < record.first_attempt + self.window);

        let removed = initial_count - attempts.len();
        if removed > 0 {
            debug!(
                "Purged {} stale login attempt record(s), {} remaining",
                removed,
                attempts.len()
            );
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn attempt_count(&self, identifier: &str) -> Option<u32> {
        self.attempts
            .lock()
            .unwrap()
            .get(identifier)
            .map(|record| record.count)
    }
}
