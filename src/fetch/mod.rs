mod http;

pub use http::HttpContributionSource;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::contributions::{Contribution, FetchResult};

#[async_trait]
pub trait ContributionSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_contributions(&self) -> Result<Vec<Contribution>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upstream reported an error: {0}")]
    Upstream(String),
}

impl FetchError {
    /// Whether another attempt could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => !e.is_decode() && !e.is_builder(),
            FetchError::Status { status } => *status == 429 || *status >= 500,
            FetchError::Decode(_) => false,
            FetchError::Upstream(_) => true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct FetchExhausted {
    pub attempts: u32,
    #[source]
    pub last: FetchError,
}

impl From<FetchExhausted> for FetchResult {
    fn from(e: FetchExhausted) -> Self {
        FetchResult::failed(e.attempts, e.last.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// Delay after the given (1-based) failed attempt
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(u64::from(attempt)))
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// A contributions source paired with the policy used to retry it
#[derive(Clone)]
pub struct ContributionFetcher {
    source: Arc<dyn ContributionSource>,
    policy: RetryPolicy,
}

impl ContributionFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn ContributionSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch the contributions, retrying transient failures.
    ///
    /// Never fails: exhausting the policy yields [`FetchResult::Failed`].
    #[tracing::instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch_with_retry(&self) -> FetchResult {
        match self.try_fetch().await {
            Ok(contributions) => {
                tracing::info!(count = contributions.len(), "fetched contributions");
                FetchResult::Loaded(contributions)
            }
            Err(e) => {
                tracing::error!(error = %e, "fetching contributions failed");
                e.into()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Contribution>, FetchExhausted> {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            match self.source.fetch_contributions().await {
                Ok(contributions) => return Ok(contributions),
                Err(e) if !e.is_transient() || attempt >= max_attempts => {
                    return Err(FetchExhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "fetch attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
