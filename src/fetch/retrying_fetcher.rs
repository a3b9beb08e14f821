//! GET + JSON decode with bounded retries and exponential backoff.

use crate::fetch::error::FetchError;
use crate::fetch::transport::{HttpTransport, Transport};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// How many times to try and how long to wait in between.
///
/// The wait before attempt `n` (for `n >= 2`) is `base_delay * multiplier^(n - 2)`;
/// attempt 1 is never delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// The wait scheduled before `attempt` (1-based).
    ///
    /// # Examples
    ///
    /// ```
    /// use stationwx::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_before(1), Duration::ZERO);
    /// assert_eq!(policy.delay_before(2), Duration::from_millis(1000));
    /// assert_eq!(policy.delay_before(3), Duration::from_millis(2000));
    /// ```
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.saturating_pow(attempt - 2);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Where a failed `attempt` leads: another wait, or the terminal failure.
    fn after_failure(&self, url: &str, attempt: u32, cause: FetchError) -> RetryState {
        if attempt >= self.attempts() {
            RetryState::Failed {
                error: FetchError::RetriesExhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    last: Box::new(cause),
                },
            }
        } else {
            RetryState::Waiting {
                next_attempt: attempt + 1,
                delay: self.delay_before(attempt + 1),
                cause,
            }
        }
    }
}

/// Progress of one [`RetryingFetcher::fetch`] call.
///
/// `Idle -> Attempting -> (Waiting -> Attempting)* -> Succeeded | Failed`
#[derive(Debug, Clone, PartialEq)]
pub enum RetryState {
    Idle,
    Attempting {
        attempt: u32,
    },
    Waiting {
        next_attempt: u32,
        delay: Duration,
        cause: FetchError,
    },
    Succeeded {
        attempts: u32,
        value: Value,
    },
    Failed {
        error: FetchError,
    },
}

/// Fetches JSON documents by URL, retrying transient failures.
///
/// Knows nothing about the shape of what it fetches; callers deserialize the
/// returned [`Value`] themselves.
#[derive(Clone)]
pub struct RetryingFetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl Default for RetryingFetcher {
    fn default() -> Self {
        Self::new(Arc::new(HttpTransport::default()), RetryPolicy::default())
    }
}

impl RetryingFetcher {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url` and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RetriesExhausted`] wrapping the last attempt's failure
    /// once every attempt allowed by the [`RetryPolicy`] has failed.
    pub async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.fetch_observed(url, |_| {}).await
    }

    /// Like [`RetryingFetcher::fetch`], calling `observe` on every state the
    /// machine enters, terminal state included.
    pub async fn fetch_observed(
        &self,
        url: &str,
        mut observe: impl FnMut(&RetryState),
    ) -> Result<Value, FetchError> {
        let mut state = RetryState::Idle;
        loop {
            observe(&state);
            state = match state {
                RetryState::Idle => RetryState::Attempting { attempt: 1 },
                RetryState::Attempting { attempt } => {
                    debug!("GET {} (attempt {}/{})", url, attempt, self.policy.attempts());
                    match self.attempt(url).await {
                        Ok(value) => RetryState::Succeeded {
                            attempts: attempt,
                            value,
                        },
                        Err(cause) => self.policy.after_failure(url, attempt, cause),
                    }
                }
                RetryState::Waiting {
                    next_attempt,
                    delay,
                    cause,
                } => {
                    warn!(
                        "{}; retrying in {:?} (attempt {}/{})",
                        cause,
                        delay,
                        next_attempt,
                        self.policy.attempts()
                    );
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting {
                        attempt: next_attempt,
                    }
                }
                RetryState::Succeeded { attempts, value } => {
                    if attempts > 1 {
                        info!("GET {} succeeded after {} attempts", url, attempts);
                    }
                    return Ok(value);
                }
                RetryState::Failed { error } => {
                    warn!("{}", error);
                    return Err(error);
                }
            };
        }
    }

    async fn attempt(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }
        serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
