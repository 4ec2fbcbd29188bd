//! Retrieve-then-merge entry point.
//!
//! One call fetches the environment from the config server, decodes it as a
//! whole and merges it into the injected store. Failures leave the store exactly
//! as it was before the call.

use crate::error::BootstrapError;
use crate::fetcher::{ConfigFetcher, FetchPolicy, HttpFetcher};
use crate::merge::{merge_response, MergeReport};
use crate::model::ConfigResponse;
use crate::store::ConfigStore;
use tracing::{error, info, warn};

/// Inputs of one bootstrap call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapRequest {
    /// Full environment URL, e.g. `https://config.local/orders/prod`. Empty means
    /// no config server is configured.
    pub url: String,
    /// Sent verbatim as the `Authorization` header, even when empty.
    pub authorization: String,
    pub policy: FetchPolicy,
}

impl BootstrapRequest {
    pub fn new(url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authorization: authorization.into(),
            policy: FetchPolicy::default(),
        }
    }

    /// Skip certificate verification (non-production endpoints only).
    pub fn disable_tls(mut self, disable: bool) -> Self {
        self.policy.verify_tls = !disable;
        self
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// HTTP fetcher configured with this request's policy.
    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.policy)
    }
}

/// Successful result of a bootstrap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No server URL was given; nothing was fetched.
    NotConfigured,
    Merged(MergeReport),
}

/// Fetch from the config server described by `request` and merge into `store`.
pub async fn bootstrap(
    request: &BootstrapRequest,
    store: &dyn ConfigStore,
) -> Result<Outcome, BootstrapError> {
    let fetcher = request.fetcher();
    bootstrap_with(&fetcher, &request.url, &request.authorization, store).await
}

/// Same as [`bootstrap`] with an explicit fetcher.
pub async fn bootstrap_with(
    fetcher: &dyn ConfigFetcher,
    url: &str,
    authorization: &str,
    store: &dyn ConfigStore,
) -> Result<Outcome, BootstrapError> {
    if url.is_empty() {
        warn!("Config server URL is not set, skipping remote configuration");
        return Ok(Outcome::NotConfigured);
    }

    info!(url = %url, "Using config server");
    let body = fetcher.fetch(url, authorization).await.map_err(|e| {
        error!(error = %e, "Config server fetch failed");
        e
    })?;

    let response = ConfigResponse::from_slice(&body).map_err(|e| {
        error!(url = %url, error = %e, "Config server response rejected");
        e
    })?;

    Ok(Outcome::Merged(merge_response(&response, store)))
}

/// Blocking wrapper for synchronous hosts. Inside a tokio runtime it returns
/// [`BootstrapError::Client`]; use [`bootstrap`] there.
pub fn bootstrap_blocking(
    request: &BootstrapRequest,
    store: &dyn ConfigStore,
) -> Result<Outcome, BootstrapError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(BootstrapError::Client(
            "bootstrap_blocking called inside a tokio runtime; await bootstrap() instead"
                .to_string(),
        ));
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BootstrapError::Client(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(bootstrap(request, store))
}
