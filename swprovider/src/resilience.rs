//! Standard retry/backoff policy and operational hook contracts.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::{ProviderError, ProviderId};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    /// Fraction of each delay that may be randomly shaved off, in `0.0..=1.0`.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: 0.25,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self::new(1)
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    pub fn should_retry(&self, attempt: u32, error: &ProviderError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }

    /// Capped exponential delay reduced by a random share of at most `jitter`.
    pub fn jittered_backoff_for_attempt(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        let base = self.backoff_for_attempt(attempt);
        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 {
            return base;
        }

        let reduction = rng.gen_range(0.0..=jitter);
        base.mul_f64(1.0 - reduction)
    }
}

pub trait ProviderOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {}

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    provider: ProviderId,
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn ProviderOperationHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, ProviderError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, ProviderError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(provider, operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(provider, operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    let delay = policy.jittered_backoff_for_attempt(attempt, &mut rand::thread_rng());
                    hooks.on_retry_scheduled(provider, operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_failure(provider, operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::{ProviderError, ProviderErrorKind, ProviderId};

    #[test]
    fn retry_policy_uses_retryable_flag_and_attempt_limit() {
        let policy = RetryPolicy::new(3);
        let retryable = ProviderError::timeout("timed out");
        let non_retryable = ProviderError::invalid_request("bad request");

        assert!(policy.should_retry(1, &retryable));
        assert!(policy.should_retry(2, &retryable));
        assert!(!policy.should_retry(3, &retryable));
        assert!(!policy.should_retry(1, &non_retryable));
        assert!(!RetryPolicy::disabled().should_retry(1, &retryable));
    }

    #[test]
    fn retry_policy_backoff_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(250),
            backoff_multiplier: 2.0,
            jitter: 0.0,
        };

        assert_eq!(policy.backoff_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_millis(250));
        assert_eq!(policy.backoff_for_attempt(4), Duration::from_millis(250));
    }

    #[test]
    fn jittered_backoff_stays_within_bounds() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            jitter: 0.5,
        };
        let mut rng = StdRng::seed_from_u64(7);

        for attempt in 1..=4 {
            let base = policy.backoff_for_attempt(attempt);
            for _ in 0..50 {
                let delay = policy.jittered_backoff_for_attempt(attempt, &mut rng);
                assert!(delay <= base);
                assert!(delay >= base.mul_f64(0.5));
            }
        }
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let policy = RetryPolicy::new(3).with_jitter(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            policy.jittered_backoff_for_attempt(2, &mut rng),
            policy.backoff_for_attempt(2)
        );
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ProviderOperationHooks for RecordingHooks {
        fn on_attempt_start(&self, provider: ProviderId, operation: &str, attempt: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{provider}:{operation}:{attempt}"));
        }

        fn on_retry_scheduled(
            &self,
            provider: ProviderId,
            operation: &str,
            attempt: u32,
            _delay: Duration,
            _error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("retry:{provider}:{operation}:{attempt}"));
        }

        fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{provider}:{operation}:{attempts}"));
        }

        fn on_failure(
            &self,
            provider: ProviderId,
            operation: &str,
            attempts: u32,
            error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{provider}:{operation}:{attempts}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn execute_with_retry_retries_and_reports_hooks() {
        let policy = RetryPolicy::new(3);
        let hooks = RecordingHooks::default();
        let attempts = Arc::new(Mutex::new(0_u32));
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = execute_with_retry(
            ProviderId::Groq,
            "generate",
            &policy,
            &hooks,
            {
                let attempts = Arc::clone(&attempts);
                move |attempt| {
                    let attempts = Arc::clone(&attempts);
                    async move {
                        *attempts.lock().expect("attempts lock") = attempt;
                        if attempt < 3 {
                            Err(ProviderError::new(
                                ProviderErrorKind::RateLimited,
                                "slow down",
                                true,
                            ))
                        } else {
                            Ok("ok")
                        }
                    }
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("result should succeed"), "ok");
        assert_eq!(*attempts.lock().expect("attempts lock"), 3);

        let sleeps = sleeps.lock().expect("sleep lock").clone();
        assert_eq!(sleeps.len(), 2);
        assert!(sleeps[0] <= policy.backoff_for_attempt(1));
        assert!(sleeps[1] <= policy.backoff_for_attempt(2));

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"success:groq:generate:3".to_string()));
    }

    #[tokio::test]
    async fn execute_with_retry_surfaces_last_error_after_exhaustion() {
        let policy = RetryPolicy::new(2);
        let hooks = RecordingHooks::default();

        let result = execute_with_retry::<(), _, _, _, _>(
            ProviderId::OpenAi,
            "generate",
            &policy,
            &hooks,
            |_| async move { Err(ProviderError::timeout("still timing out")) },
            |_| async move {},
        )
        .await;

        let error = result.expect_err("result should fail");
        assert_eq!(error.kind, ProviderErrorKind::Timeout);
        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"failure:openai:generate:2:Timeout".to_string()));
    }

    #[tokio::test]
    async fn execute_with_retry_stops_on_non_retryable_error() {
        let policy = RetryPolicy::new(5);
        let hooks = RecordingHooks::default();

        let result = execute_with_retry::<(), _, _, _, _>(
            ProviderId::OpenAi,
            "generate",
            &policy,
            &hooks,
            |_| async move { Err(ProviderError::invalid_request("bad input")) },
            |_| async move {},
        )
        .await;

        let error = result.expect_err("result should fail");
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.iter().any(|item| item.contains("failure:openai:generate:1")));
    }
}
