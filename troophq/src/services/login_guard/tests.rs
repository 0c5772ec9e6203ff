use super::service::LoginAttemptGuard;
use chrono::{Duration, Utc};
use std::sync::Arc;
use troophq_core::settings::lockout::LockoutSettings;

fn create_guard() -> LoginAttemptGuard {
    LoginAttemptGuard::new(&LockoutSettings {
        threshold: 5,
        window_minutes: 15,
    })
}

#[test]
fn test_below_threshold_is_not_locked() {
    let guard = create_guard();
    let now = Utc::now();

    for _ in 0..4 {
        guard.record_failure_at("a@x.com", now);
    }

    assert!(!guard.is_locked_at("a@x.com", now));
}

#[test]
fn test_reaching_threshold_locks() {
    let guard = create_guard();
    let now = Utc::now();

    for _ in 0..5 {
        guard.record_failure_at("a@x.com", now);
    }

    assert!(guard.is_locked_at("a@x.com", now));
}

#[test]
fn test_unknown_identifier_is_not_locked() {
    let guard = create_guard();
    assert!(!guard.is_locked("nobody@x.com"));
}

#[test]
fn test_lockout_expires_and_record_is_dropped() {
    let guard = create_guard();
    let start = Utc::now();

    for _ in 0..5 {
        guard.record_failure_at("a@x.com", start);
    }
    assert!(guard.is_locked_at("a@x.com", start + Duration::minutes(14)));

    // past the window the lockout lifts and the record is gone
    assert!(!guard.is_locked_at("a@x.com", start + Duration::minutes(16)));
    assert_eq!(guard.attempt_count("a@x.com"), None);

    // the next failure starts a fresh count, not threshold + 1
    let count = guard.record_failure_at("a@x.com", start + Duration::minutes(16));
    assert_eq!(count, 1);
}

#[test]
fn test_clear_record_resets_counting() {
    let guard = create_guard();
    let now = Utc::now();

    for _ in 0..3 {
        guard.record_failure_at("a@x.com", now);
    }
    guard.clear_record("a@x.com");

    assert!(!guard.is_locked_at("a@x.com", now));
    assert_eq!(guard.record_failure_at("a@x.com", now), 1);
}

#[test]
fn test_stale_window_rearms_instead_of_accumulating() {
    let guard = create_guard();
    let start = Utc::now();

    assert_eq!(guard.record_failure_at("a@x.com", start), 1);

    // a failure after the window elapsed starts over at 1, not 2
    let count = guard.record_failure_at("a@x.com", start + Duration::minutes(16));
    assert_eq!(count, 1);
}

#[test]
fn test_failures_within_window_accumulate_from_first_attempt() {
    let guard = create_guard();
    let start = Utc::now();

    guard.record_failure_at("a@x.com", start);
    guard.record_failure_at("a@x.com", start + Duration::minutes(5));
    guard.record_failure_at("a@x.com", start + Duration::minutes(10));
    guard.record_failure_at("a@x.com", start + Duration::minutes(14));
    let count = guard.record_failure_at("a@x.com", start + Duration::minutes(14));

    assert_eq!(count, 5);
    assert!(guard.is_locked_at("a@x.com", start + Duration::minutes(14)));
}

#[test]
fn test_identifiers_do_not_interact() {
    let guard = create_guard();
    let now = Utc::now();

    for _ in 0..5 {
        guard.record_failure_at("a@x.com", now);
    }

    assert!(guard.is_locked_at("a@x.com", now));
    assert!(!guard.is_locked_at("b@x.com", now));
    assert_eq!(guard.record_failure_at("b@x.com", now), 1);
}

#[test]
fn test_concurrent_failures_are_not_lost() {
    let guard = Arc::new(create_guard());
    let now = Utc::now();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = guard.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    guard.record_failure_at("a@x.com", now);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(guard.attempt_count("a@x.com"), Some(200));
}

#[test]
fn test_purge_expired_drops_only_stale_records() {
    let guard = create_guard();
    let start = Utc::now();

    guard.record_failure_at("stale@x.com", start);
    guard.record_failure_at("fresh@x.com", start + Duration::minutes(10));

    let removed = guard.purge_expired_at(start + Duration::minutes(16));
    assert_eq!(removed, 1);
    assert_eq!(guard.attempt_count("stale@x.com"), None);
    assert_eq!(guard.attempt_count("fresh@x.com"), Some(1));
}

// the end-to-end scenario: four misses, a fifth locks, minute 16 unlocks
#[test]
fn test_lockout_timeline() {
    let guard = create_guard();
    let start = Utc::now();

    for i in 0..4 {
        guard.record_failure_at("a@x.com", start + Duration::seconds(i * 10));
    }
    assert!(!guard.is_locked_at("a@x.com", start + Duration::minutes(1)));

    guard.record_failure_at("a@x.com", start + Duration::minutes(1));
    assert!(guard.is_locked_at("a@x.com", start + Duration::minutes(1)));

    assert!(!guard.is_locked_at("a@x.com", start + Duration::minutes(16)));
    assert_eq!(guard.attempt_count("a@x.com"), None);
}
