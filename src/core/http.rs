//! Resilient HTTP GET with bounded retries and exponential backoff.
//!
//! Transport failures (connect errors, timeouts, non-2xx statuses) are retried
//! and, once attempts run out, reported as [`Fetched::Exhausted`] rather than
//! as an error. Only caller mistakes and malformed JSON surface as `Err`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::{Result, StatsError};

pub const TIMEOUT_ENV_VAR: &str = "NHL_STATS_TIMEOUT_SECS";
pub const RETRIES_ENV_VAR: &str = "NHL_STATS_RETRIES";
pub const BACKOFF_ENV_VAR: &str = "NHL_STATS_BACKOFF_MS";

/// Per-call retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            base_backoff: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    /// Defaults overlaid with `NHL_STATS_TIMEOUT_SECS`, `NHL_STATS_RETRIES`
    /// and `NHL_STATS_BACKOFF_MS` when set.
    pub fn from_env() -> Result<Self> {
        let mut policy = Self::default();
        if let Some(secs) = read_env_u64(TIMEOUT_ENV_VAR)? {
            policy.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = read_env_u64(RETRIES_ENV_VAR)? {
            policy.max_attempts = u32::try_from(retries).map_err(|_| StatsError::InvalidRetryPolicy {
                reason: format!("{RETRIES_ENV_VAR}={retries} is out of range"),
            })?;
        }
        if let Some(ms) = read_env_u64(BACKOFF_ENV_VAR)? {
            policy.base_backoff = Duration::from_millis(ms);
        }
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(StatsError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(StatsError::InvalidRetryPolicy {
                reason: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Sleep before 1-indexed `attempt`: zero for the first, then
    /// `base_backoff * 2^(attempt - 2)`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        self.base_backoff.saturating_mul(factor)
    }
}

fn read_env_u64(var: &str) -> Result<Option<u64>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| StatsError::InvalidRetryPolicy {
                reason: format!("{var}='{raw}' is not a non-negative integer"),
            }),
        Err(_) => Ok(None),
    }
}

/// Outcome of a resilient request.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// 2xx with a JSON body.
    Payload(Value),
    /// 2xx with an empty body. Not retried.
    Empty,
    /// Every attempt failed at the transport level.
    Exhausted { attempts: u32, last_error: String },
}

impl Fetched {
    /// Collapse to "data or absent".
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Fetched::Payload(value) => Some(value),
            Fetched::Empty | Fetched::Exhausted { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        !matches!(self, Fetched::Payload(_))
    }
}

/// Build the HTTP client callers pass into [`request`]. Safe to share across tasks.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(Client::builder()
        .user_agent(concat!("nhl-stats/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()?)
}

/// GET `url` as JSON, retrying transport failures per `policy`.
///
/// Backoff sleeps run strictly one after another within a call. A malformed
/// JSON body on a 2xx response is returned as [`StatsError::Decode`] at once.
pub async fn request(client: &Client, url: &str, policy: &RetryPolicy) -> Result<Fetched> {
    policy.validate()?;

    let mut last_error = String::new();
    for attempt in 1..=policy.max_attempts {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            tracing::debug!(url, attempt, ?delay, "backing off before retry");
            tokio::time::sleep(delay).await;
        }

        match fetch_body(client, url, policy.timeout).await {
            Ok(body) if body.is_empty() => {
                tracing::debug!(url, attempt, "empty response body");
                return Ok(Fetched::Empty);
            }
            Ok(body) => {
                let value = serde_json::from_slice::<Value>(&body)?;
                tracing::debug!(url, attempt, bytes = body.len(), "request succeeded");
                return Ok(Fetched::Payload(value));
            }
            Err(e) => {
                tracing::warn!(url, attempt, max_attempts = policy.max_attempts, error = %e, "request attempt failed");
                last_error = e.to_string();
            }
        }
    }

    tracing::warn!(url, attempts = policy.max_attempts, "retries exhausted");
    Ok(Fetched::Exhausted {
        attempts: policy.max_attempts,
        last_error,
    })
}

async fn fetch_body(client: &Client, url: &str, timeout: Duration) -> reqwest::Result<Vec<u8>> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
