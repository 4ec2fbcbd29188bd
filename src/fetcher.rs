//! Config Server Fetcher
//!
//! Performs the authenticated GET against a config server endpoint with a fixed
//! request timeout and a bounded number of retries. The HTTP client is created
//! per call and dropped on every exit path, so no connection outlives a fetch.

use crate::error::BootstrapError;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(1);

/// Timeout, retry and TLS behaviour for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Retries after the first attempt (total attempts = retry_count + 1)
    pub retry_count: u32,
    /// Fixed wait between attempts
    pub retry_wait: Duration,
    /// Verify server certificates. Only turn off for non-production endpoints.
    pub verify_tls: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_wait: DEFAULT_RETRY_WAIT,
            verify_tls: true,
        }
    }
}

impl FetchPolicy {
    pub fn with_tls_verification(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }
}

/// Source of raw config server response bodies.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// GET `url` with `Authorization: <authorization>` and return the body.
    async fn fetch(&self, url: &str, authorization: &str) -> Result<Vec<u8>, BootstrapError>;
}

/// reqwest-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    policy: FetchPolicy,
}

/// Failure of a single attempt.
struct AttemptError {
    cause: String,
    retryable: bool,
}

impl HttpFetcher {
    pub fn new(policy: FetchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    async fn attempt(
        &self,
        client: &Client,
        url: &str,
        authorization: &str,
    ) -> Result<Vec<u8>, AttemptError> {
        let response = client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AttemptError {
                retryable: !(e.is_builder() || e.is_redirect()),
                cause: describe_transport_error(&e),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(AttemptError {
                cause: status.to_string(),
                retryable: is_retryable_status(status),
            });
        }

        let body = response.bytes().await.map_err(|e| AttemptError {
            cause: describe_transport_error(&e),
            retryable: true,
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ConfigFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, authorization: &str) -> Result<Vec<u8>, BootstrapError> {
        let client = build_http_client(&self.policy)?;
        let max_attempts = self.policy.retry_count + 1;
        let mut attempt = 1;

        loop {
            debug!(url = %url, attempt, max_attempts, "Requesting config server");
            match self.attempt(&client, url, authorization).await {
                Ok(body) => {
                    debug!(url = %url, attempt, bytes = body.len(), "Config server responded");
                    return Ok(body);
                }
                Err(err) if err.retryable && attempt < max_attempts => {
                    warn!(
                        url = %url,
                        attempt,
                        max_attempts,
                        cause = %err.cause,
                        wait_ms = self.policy.retry_wait.as_millis() as u64,
                        "Config server request failed, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_wait).await;
                    attempt += 1;
                }
                Err(err) => return Err(BootstrapError::fetch(url, err.cause)),
            }
        }
    }
}

fn build_http_client(policy: &FetchPolicy) -> Result<Client, BootstrapError> {
    Client::builder()
        .timeout(policy.timeout)
        .danger_accept_invalid_certs(!policy.verify_tls)
        .build()
        .map_err(|e| BootstrapError::Client(e.to_string()))
}

/// 429 and 5xx (except 501) are worth another attempt; other errors are final.
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    }
}
