//! In-memory rate limiting for login attempts.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by normalized email so mixed-case retries share one window.
//! Two limits enforced:
//! - Per-account: 10 attempts/min
//! - Global: 100 attempts/min
//!
//! Windows are pruned on check and emptied account entries are dropped;
//! there is no background sweeper.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use payloads::normalize_email;

const DEFAULT_PER_ACCOUNT_LIMIT: usize = 10;
const DEFAULT_PER_ACCOUNT_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 100;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Clone, Copy)]
struct RateLimitConfig {
    per_account_limit: usize,
    per_account_window: Duration,
    global_limit: usize,
    global_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_account_window_secs = env_parse("LOGIN_RATE_LIMIT_PER_ACCOUNT_WINDOW_SECS", DEFAULT_PER_ACCOUNT_WINDOW_SECS);
        let global_window_secs = env_parse("LOGIN_RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_account_limit: env_parse("LOGIN_RATE_LIMIT_PER_ACCOUNT", DEFAULT_PER_ACCOUNT_LIMIT),
            per_account_window: Duration::from_secs(per_account_window_secs),
            global_limit: env_parse("LOGIN_RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("account rate limit exceeded (max {limit} attempts/{window_secs}s)")]
    AccountExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} attempts/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct LoginRateLimiter {
    inner: std::sync::Arc<Mutex<LoginRateLimiterInner>>,
    config: RateLimitConfig,
}

struct LoginRateLimiterInner {
    /// Attempt timestamps keyed by normalized email.
    account_attempts: HashMap<String, VecDeque<Instant>>,
    /// Attempt timestamps across all accounts.
    global_attempts: VecDeque<Instant>,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: std::sync::Arc::new(Mutex::new(LoginRateLimiterInner {
                account_attempts: HashMap::new(),
                global_attempts: VecDeque::new(),
            })),
            config: RateLimitConfig::from_env(),
        }
    }

    /// Check both per-account and global limits, then record the attempt.
    pub fn check_and_record(&self, email: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(email, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, email: &str, now: Instant) -> Result<(), RateLimitError> {
        let account = normalize_email(email);
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        // Prune and check global first (no borrow conflict).
        prune_window(&mut inner.global_attempts, now, cfg.global_window);
        if inner.global_attempts.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Prune every account window, dropping entries that empty out so the
        // map only holds accounts with attempts still inside their window.
        inner.account_attempts.retain(|_, attempts| {
            prune_window(attempts, now, cfg.per_account_window);
            !attempts.is_empty()
        });

        let account_deque = inner.account_attempts.entry(account).or_default();
        if account_deque.len() >= cfg.per_account_limit {
            return Err(RateLimitError::AccountExceeded {
                limit: cfg.per_account_limit,
                window_secs: cfg.per_account_window.as_secs(),
            });
        }

        // Record.
        account_deque.push_back(now);
        inner.global_attempts.push_back(now);

        Ok(())
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
