use std::cell::Cell;
use std::time::{Duration, Instant};

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use tracing::warn;

use super::error::CallError;

/// Bounded exponential backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first one
    pub max_tries: u32,
    /// Total time budget across attempts and sleeps
    pub max_elapsed: Duration,
    /// Sleep after the first failure; doubled after each further failure
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: 3,
            max_elapsed: Duration::from_secs(60),
            initial_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff schedule for one logical call
    pub fn schedule(&self) -> BoundedBackoff {
        BoundedBackoff::new(self)
    }

    /// Run `call` until it succeeds, fails terminally, or the budget is spent.
    /// The last error is returned when giving up.
    pub fn run<T, F>(&self, operation: &str, mut call: F) -> Result<T, CallError>
    where
        F: FnMut() -> Result<T, CallError>,
    {
        let attempt = Cell::new(0u32);
        let result = backoff::retry_notify(
            self.schedule(),
            || {
                attempt.set(attempt.get() + 1);
                call().map_err(|e| {
                    if e.is_retryable() {
                        backoff::Error::transient(e)
                    } else {
                        backoff::Error::permanent(e)
                    }
                })
            },
            |err: CallError, delay: Duration| {
                warn!(
                    "{}: attempt {}/{} failed: {}, retrying in {:?}",
                    operation,
                    attempt.get(),
                    self.max_tries,
                    err,
                    delay
                );
            },
        );

        result.map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => {
                warn!(
                    "{}: giving up after {} attempts: {}",
                    operation,
                    attempt.get(),
                    err
                );
                err
            }
        })
    }
}

/// Exponential backoff that stops after `max_tries` attempts or once the
/// next sleep would overrun the time budget
pub struct BoundedBackoff {
    inner: ExponentialBackoff,
    max_tries: u32,
    max_elapsed: Duration,
    failures: u32,
    started: Instant,
}

impl BoundedBackoff {
    fn new(policy: &RetryPolicy) -> Self {
        let inner = ExponentialBackoffBuilder::new()
            .with_initial_interval(policy.initial_delay)
            .with_multiplier(2.0)
            .with_randomization_factor(0.0)
            .with_max_interval(policy.max_elapsed.max(policy.initial_delay))
            .with_max_elapsed_time(None)
            .build();
        Self {
            inner,
            max_tries: policy.max_tries.max(1),
            max_elapsed: policy.max_elapsed,
            failures: 0,
            started: Instant::now(),
        }
    }
}

impl Backoff for BoundedBackoff {
    fn reset(&mut self) {
        self.inner.reset();
        self.failures = 0;
        self.started = Instant::now();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.failures += 1;
        if self.failures >= self.max_tries {
            return None;
        }
        let delay = self.inner.next_backoff()?;
        if self.started.elapsed() + delay > self.max_elapsed {
            return None;
        }
        Some(delay)
    }
}
