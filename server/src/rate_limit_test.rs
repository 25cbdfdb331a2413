
use super::*;

#[test]
fn account_allows_up_to_limit() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();

    for i in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(
            rl.check_and_record_at("user@example.com", now).is_ok(),
            "attempt {i} should succeed"
        );
    }
    assert!(matches!(
        rl.check_and_record_at("user@example.com", now),
        Err(RateLimitError::AccountExceeded { .. })
    ));
}

#[test]
fn global_allows_up_to_limit() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();

    // Use distinct accounts to avoid hitting the per-account limit first.
    for i in 0..DEFAULT_GLOBAL_LIMIT {
        let email = format!("user{i}@example.com");
        assert!(rl.check_and_record_at(&email, now).is_ok(), "attempt {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at("late@example.com", now),
        Err(RateLimitError::GlobalExceeded { .. })
    ));
}

#[test]
fn window_expiry_allows_new_attempts() {
    let rl = LoginRateLimiter::new();
    let start = Instant::now();

    // Fill up the per-account limit.
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        rl.check_and_record_at("user@example.com", start).unwrap();
    }
    assert!(rl.check_and_record_at("user@example.com", start).is_err());

    // After the window passes, attempts should succeed again.
    let after_window =
        start + Duration::from_secs(DEFAULT_PER_ACCOUNT_WINDOW_SECS) + Duration::from_millis(1);
    assert!(rl.check_and_record_at("user@example.com", after_window).is_ok());
}

#[test]
fn distinct_accounts_do_not_interfere() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();

    // Fill up account A.
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        rl.check_and_record_at("a@example.com", now).unwrap();
    }
    assert!(rl.check_and_record_at("a@example.com", now).is_err());

    // Account B should still be able to attempt.
    assert!(rl.check_and_record_at("b@example.com", now).is_ok());
}

#[test]
fn mixed_case_retries_share_a_window() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();

    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        rl.check_and_record_at("User@Example.com", now).unwrap();
    }
    assert!(matches!(
        rl.check_and_record_at("  user@example.COM ", now),
        Err(RateLimitError::AccountExceeded { .. })
    ));
}

#[test]
fn stale_account_entries_are_dropped_after_their_window() {
    let rl = LoginRateLimiter::new();
    let start = Instant::now();

    for i in 0..50 {
        let email = format!("user{i}@example.com");
        rl.check_and_record_at(&email, start).unwrap();
    }

    // Any later check sweeps out entries whose windows have fully expired.
    let after_window =
        start + Duration::from_secs(DEFAULT_PER_ACCOUNT_WINDOW_SECS) + Duration::from_millis(1);
    rl.check_and_record_at("fresh@example.com", after_window).unwrap();

    let inner = rl.inner.lock().unwrap();
    assert_eq!(inner.account_attempts.len(), 1);
    assert!(inner.account_attempts.contains_key("fresh@example.com"));
}

#[test]
fn error_messages_are_stable() {
    let account = RateLimitError::AccountExceeded { limit: 10, window_secs: 60 };
    assert_eq!(
        account.to_string(),
        "account rate limit exceeded (max 10 attempts/60s)"
    );

    let global = RateLimitError::GlobalExceeded { limit: 100, window_secs: 60 };
    assert_eq!(
        global.to_string(),
        "global rate limit exceeded (max 100 attempts/60s)"
    );
}
