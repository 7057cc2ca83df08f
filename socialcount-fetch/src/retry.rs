//! Retry policy and the resilient fetch loop.
//!
//! [`ResilientFetcher::execute`] drives one logical fetch through the states
//! `Attempting → {Success | RetryScheduled → Attempting | Exhausted | Fatal}`,
//! bounded by an overall time budget and a [`CancelSignal`]. It never
//! returns an `Err` of its own; the terminal state and the last observed
//! failure are reported in a [`RetryOutcome`].

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cancel::CancelSignal;
use crate::error::{FetchError, TransportError};
use crate::transport::RawResponse;

/// Statuses worth another attempt: request timeout, rate limited, bad
/// gateway, service unavailable, gateway timeout.
pub const RETRYABLE_STATUSES: [u16; 5] = [408, 429, 502, 503, 504];

/// Returns true if `status` is in [`RETRYABLE_STATUSES`].
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

// ============================================================================
// Classification
// ============================================================================

/// How a single attempt's outcome is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Return the outcome.
    Success,
    /// Schedule another attempt if the budget allows.
    Retryable,
    /// Return the failure without retrying.
    Fatal,
}

/// Classifies the outcome of one attempt.
pub type Classifier = fn(&Result<RawResponse, TransportError>) -> Classification;

/// Transient network errors and [`RETRYABLE_STATUSES`] are retryable;
/// 2xx succeeds; everything else is fatal.
pub fn default_classifier(outcome: &Result<RawResponse, TransportError>) -> Classification {
    match outcome {
        Ok(response) if response.is_success() => Classification::Success,
        Ok(response) if is_retryable_status(response.status) => Classification::Retryable,
        Ok(_) => Classification::Fatal,
        Err(e) if e.is_retryable() => Classification::Retryable,
        Err(_) => Classification::Fatal,
    }
}

// ============================================================================
// Retry Policy
// ============================================================================

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Whether to double the delay after each attempt.
    pub exponential_backoff: bool,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
    /// Fraction by which each delay is randomly scaled up or down (0.0 - 1.0).
    pub jitter: f64,
    /// Budget across all attempts and delays.
    pub overall_timeout: Duration,
    /// Outcome classification.
    pub classifier: Classifier,
}

impl RetryPolicy {
    /// Creates a retry policy with the given attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
            exponential_backoff: true,
            max_delay: Duration::from_secs(30),
            jitter: 0.25,
            overall_timeout: Duration::from_secs(10),
            classifier: default_classifier,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
            jitter: 0.0,
            ..Self::new(1)
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum single delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Sets the jitter fraction, clamped to `0.0..=1.0`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Sets the overall time budget.
    pub fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    /// Replaces the outcome classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Calculates the un-jittered delay after the given attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            2u32.checked_pow(attempt.saturating_sub(1))
                .and_then(|factor| self.base_delay.checked_mul(factor))
                .unwrap_or(self.max_delay)
        } else {
            self.base_delay
        };

        delay.min(self.max_delay)
    }

    /// Calculates the delay after the given attempt number with jitter.
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.delay_for_attempt(attempt);
        if self.jitter <= 0.0 || delay.is_zero() {
            return delay;
        }

        let factor = 1.0 + rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        delay.mul_f64(factor).min(self.max_delay)
    }

    /// Classifies an attempt outcome.
    pub fn classify(&self, outcome: &Result<RawResponse, TransportError>) -> Classification {
        (self.classifier)(outcome)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

// ============================================================================
// Retry Outcome
// ============================================================================

/// Terminal state of one [`ResilientFetcher::execute`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// An attempt succeeded.
    Success,
    /// An attempt failed with a non-retryable outcome.
    Fatal,
    /// Every attempt failed with a retryable outcome.
    Exhausted,
    /// The overall time budget ran out.
    TimedOut,
    /// The caller cancelled.
    Cancelled,
}

/// The outcome of a resilient fetch.
#[derive(Debug)]
pub struct RetryOutcome {
    /// The response, or the last observed failure.
    pub result: Result<RawResponse, FetchError>,
    /// How the loop ended.
    pub terminal: Terminal,
    /// Number of attempts started.
    pub attempts: u32,
    /// Delays slept between attempts.
    pub delays: Vec<Duration>,
    /// Total time spent.
    pub elapsed: Duration,
}

impl RetryOutcome {
    /// Returns true if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        self.terminal == Terminal::Success
    }
}

/// Per-invocation bookkeeping. Never shared.
struct RetryState {
    attempt: u32,
    started: Instant,
    last_error: Option<FetchError>,
    delays: Vec<Duration>,
}

impl RetryState {
    fn new() -> Self {
        Self {
            attempt: 0,
            started: Instant::now(),
            last_error: None,
            delays: Vec::new(),
        }
    }

    fn finish(self, result: Result<RawResponse, FetchError>, terminal: Terminal) -> RetryOutcome {
        RetryOutcome {
            result,
            terminal,
            attempts: self.attempt,
            delays: self.delays,
            elapsed: self.started.elapsed(),
        }
    }

    fn timed_out(mut self, budget: Duration) -> RetryOutcome {
        let error = self.last_error.take().unwrap_or(FetchError::Timeout(budget));
        self.finish(Err(error), Terminal::TimedOut)
    }
}

fn into_error(outcome: Result<RawResponse, TransportError>) -> FetchError {
    match outcome {
        Ok(response) => FetchError::HttpStatus {
            status: response.status,
        },
        Err(e) => FetchError::Transport(e),
    }
}

// ============================================================================
// Resilient Fetcher
// ============================================================================

/// Runs an operation under a [`RetryPolicy`] on behalf of one source.
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    source: String,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    /// Creates a fetcher for the named source.
    pub fn new(source: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            source: source.into(),
            policy,
        }
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes `operation` until it succeeds, fails fatally, exhausts its
    /// attempts, runs out of time, or is cancelled.
    pub async fn execute<F, Fut>(&self, cancel: &CancelSignal, mut operation: F) -> RetryOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<RawResponse, TransportError>>,
    {
        let budget = self.policy.overall_timeout;
        let mut state = RetryState::new();
        let deadline = state.started + budget;

        loop {
            if cancel.is_cancelled() {
                return state.finish(Err(FetchError::Cancelled), Terminal::Cancelled);
            }

            state.attempt += 1;
            debug!(platform = %self.source, attempt = state.attempt, "Attempting request");

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return state.finish(Err(FetchError::Cancelled), Terminal::Cancelled);
                }
                () = tokio::time::sleep_until(deadline) => {
                    warn!(platform = %self.source, budget = ?budget, "Request budget exhausted");
                    return state.timed_out(budget);
                }
                outcome = operation() => outcome,
            };

            match self.policy.classify(&outcome) {
                Classification::Success => {
                    let result = outcome.map_err(FetchError::Transport);
                    return state.finish(result, Terminal::Success);
                }
                Classification::Fatal => {
                    return state.finish(Err(into_error(outcome)), Terminal::Fatal);
                }
                Classification::Retryable => {}
            }

            let retry_after = outcome.as_ref().ok().and_then(|r| r.retry_after);
            let error = into_error(outcome);

            if state.attempt >= self.policy.max_attempts {
                warn!(
                    platform = %self.source,
                    attempts = state.attempt,
                    error = %error,
                    "Retry attempts exhausted"
                );
                return state.finish(Err(error), Terminal::Exhausted);
            }

            let mut delay = self.policy.jittered_delay(state.attempt);
            if let Some(hint) = retry_after {
                delay = delay.max(hint.min(self.policy.max_delay));
            }

            if Instant::now() + delay >= deadline {
                warn!(
                    platform = %self.source,
                    attempt = state.attempt,
                    delay = ?delay,
                    error = %error,
                    "Next retry would exceed the request budget"
                );
                state.last_error = Some(error);
                return state.timed_out(budget);
            }

            warn!(
                platform = %self.source,
                attempt = state.attempt,
                max_attempts = self.policy.max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Request failed, retrying"
            );
            state.last_error = Some(error);

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return state.finish(Err(FetchError::Cancelled), Terminal::Cancelled);
                }
                () = tokio::time::sleep(delay) => {}
            }
            state.delays.push(delay);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3)
            .with_base_delay(Duration::from_millis(10))
            .with_overall_timeout(Duration::from_secs(5))
    }

    /// Returns an operation that replays `script` in order, repeating the
    /// last entry once the script runs out.
    fn scripted(
        script: Vec<Result<RawResponse, TransportError>>,
    ) -> (
        Arc<AtomicU32>,
        impl FnMut() -> std::future::Ready<Result<RawResponse, TransportError>>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let script = Arc::new(Mutex::new(script));
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) as usize;
            let script = script.lock().unwrap();
            let entry = &script[n.min(script.len() - 1)];
            let outcome = match entry {
                Ok(r) => Ok(r.clone()),
                Err(TransportError::Connect(m)) => Err(TransportError::Connect(m.clone())),
                Err(TransportError::InvalidUrl(m)) => Err(TransportError::InvalidUrl(m.clone())),
                Err(_) => Err(TransportError::Timeout),
            };
            std::future::ready(outcome)
        };
        (calls, op)
    }

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(8));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(10).with_base_delay(Duration::from_secs(10));

        // Capped at 30 seconds
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(30));
        assert_eq!(policy.delay_for_attempt(100), Duration::from_secs(30));
    }

    #[test]
    fn test_jitter_bounds() {
        let policy = RetryPolicy::default().with_jitter(0.25);
        for _ in 0..200 {
            let delay = policy.jittered_delay(2);
            assert!(delay >= Duration::from_millis(1500), "{delay:?}");
            assert!(delay <= Duration::from_millis(2500), "{delay:?}");
        }

        let exact = RetryPolicy::default().with_jitter(0.0);
        assert_eq!(exact.jittered_delay(2), Duration::from_secs(2));
    }

    #[test]
    fn test_default_classifier() {
        let ok: Result<RawResponse, TransportError> = Ok(RawResponse::new(200, "ok"));
        assert_eq!(default_classifier(&ok), Classification::Success);

        for status in RETRYABLE_STATUSES {
            let r = Ok(RawResponse::new(status, ""));
            assert_eq!(default_classifier(&r), Classification::Retryable, "{status}");
        }

        for status in [400, 401, 403, 404, 500, 501] {
            let r = Ok(RawResponse::new(status, ""));
            assert_eq!(default_classifier(&r), Classification::Fatal, "{status}");
        }

        let connect = Err(TransportError::Connect("refused".into()));
        assert_eq!(default_classifier(&connect), Classification::Retryable);

        let bad_url = Err(TransportError::InvalidUrl("nope".into()));
        assert_eq!(default_classifier(&bad_url), Classification::Fatal);
    }

    #[tokio::test]
    async fn test_succeeds_after_two_retryable_failures() {
        let (calls, op) = scripted(vec![
            Ok(RawResponse::new(503, "")),
            Ok(RawResponse::new(429, "")),
            Ok(RawResponse::new(200, "payload")),
        ]);
        let fetcher = ResilientFetcher::new("test", fast_policy());

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert_eq!(outcome.terminal, Terminal::Success);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.result.unwrap().body, "payload");
        assert_eq!(outcome.delays.len(), 2);
        let slept: Duration = outcome.delays.iter().sum();
        assert!(outcome.elapsed >= slept);
    }

    #[tokio::test]
    async fn test_fatal_status_is_not_retried() {
        let (calls, op) = scripted(vec![Ok(RawResponse::new(404, "missing"))]);
        let fetcher = ResilientFetcher::new("test", fast_policy());

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert_eq!(outcome.terminal, Terminal::Fatal);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            outcome.result,
            Err(FetchError::HttpStatus { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_exhausts_attempts() {
        let (calls, op) = scripted(vec![Ok(RawResponse::new(502, ""))]);
        let fetcher = ResilientFetcher::new("test", fast_policy());

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert_eq!(outcome.terminal, Terminal::Exhausted);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            outcome.result,
            Err(FetchError::HttpStatus { status: 502 })
        ));
    }

    #[tokio::test]
    async fn test_transport_errors_are_retried() {
        let (calls, op) = scripted(vec![
            Err(TransportError::Connect("refused".into())),
            Ok(RawResponse::new(200, "ok")),
        ]);
        let fetcher = ResilientFetcher::new("test", fast_policy());

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert!(outcome.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_url_is_fatal() {
        let (calls, op) = scripted(vec![Err(TransportError::InvalidUrl("bad".into()))]);
        let fetcher = ResilientFetcher::new("test", fast_policy());

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert_eq!(outcome.terminal, Terminal::Fatal);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_during_backoff() {
        let (calls, op) = scripted(vec![Ok(RawResponse::new(503, ""))]);
        let policy = RetryPolicy::new(5)
            .with_base_delay(Duration::from_secs(20))
            .with_max_delay(Duration::from_secs(20))
            .with_jitter(0.0)
            .with_overall_timeout(Duration::from_secs(60));
        let fetcher = ResilientFetcher::new("test", policy);
        let cancel = CancelSignal::new();
        cancel.cancel_after(Duration::from_millis(50));

        let outcome = fetcher.execute(&cancel, op).await;

        assert_eq!(outcome.terminal, Terminal::Cancelled);
        assert!(matches!(outcome.result, Err(FetchError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(outcome.elapsed < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let (calls, op) = scripted(vec![Ok(RawResponse::new(200, ""))]);
        let fetcher = ResilientFetcher::new("test", fast_policy());
        let cancel = CancelSignal::new();
        cancel.cancel();

        let outcome = fetcher.execute(&cancel, op).await;

        assert_eq!(outcome.terminal, Terminal::Cancelled);
        assert_eq!(outcome.attempts, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overall_timeout_without_response() {
        let policy = fast_policy().with_overall_timeout(Duration::from_millis(100));
        let fetcher = ResilientFetcher::new("test", policy);

        let outcome = fetcher
            .execute(&CancelSignal::new(), || async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(RawResponse::new(200, ""))
            })
            .await;

        assert_eq!(outcome.terminal, Terminal::TimedOut);
        assert!(matches!(outcome.result, Err(FetchError::Timeout(_))));
        assert!(outcome.elapsed < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_overall_timeout_keeps_last_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let policy = fast_policy().with_overall_timeout(Duration::from_millis(200));
        let fetcher = ResilientFetcher::new("test", policy);

        let outcome = fetcher
            .execute(&CancelSignal::new(), move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Ok(RawResponse::new(503, ""))
                    } else {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok(RawResponse::new(200, ""))
                    }
                }
            })
            .await;

        assert_eq!(outcome.terminal, Terminal::TimedOut);
        assert!(matches!(
            outcome.result,
            Err(FetchError::HttpStatus { status: 503 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_after_hint_extends_delay() {
        let (_, op) = scripted(vec![
            Ok(RawResponse::new(429, "").with_retry_after(Duration::from_millis(80))),
            Ok(RawResponse::new(200, "")),
        ]);
        let policy = fast_policy()
            .with_base_delay(Duration::from_millis(1))
            .with_jitter(0.0);
        let fetcher = ResilientFetcher::new("test", policy);

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.delays, vec![Duration::from_millis(80)]);
    }

    #[tokio::test]
    async fn test_delay_beyond_budget_stops_early() {
        let (calls, op) = scripted(vec![Ok(RawResponse::new(503, ""))]);
        let policy = RetryPolicy::new(3)
            .with_base_delay(Duration::from_secs(20))
            .with_jitter(0.0)
            .with_overall_timeout(Duration::from_secs(1));
        let fetcher = ResilientFetcher::new("test", policy);

        let outcome = fetcher.execute(&CancelSignal::new(), op).await;

        assert_eq!(outcome.terminal, Terminal::TimedOut);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(outcome.elapsed < Duration::from_secs(1));
    }
}
