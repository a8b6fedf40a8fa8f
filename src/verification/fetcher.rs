//! Wallet address document fetching
//!
//! A payment pointer resolves to a wallet address document served over
//! HTTPS (`{ id, authServer, resourceServer }`). The fetcher trait keeps the
//! verifier testable without a network; the HTTP implementation uses a
//! reqwest client with a bounded timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{VerificationError, WebMonetizationError, WebMonetizationResult};

/// Default bounded wait for a wallet details request
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Wallet address document returned by a wallet provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDetails {
    /// Canonical wallet identifier
    pub id: String,
    /// Authorization server URL
    #[serde(default)]
    pub auth_server: String,
    /// Resource server URL
    #[serde(default)]
    pub resource_server: String,
    /// Final URL the document was fetched from, after redirects
    #[serde(skip)]
    pub resolved_url: String,
}

impl WalletDetails {
    /// Check the document is a usable wallet address document
    ///
    /// The identifier must be present and both servers must be HTTPS URLs.
    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.id.is_empty() {
            return Err(VerificationError::invalid_details("missing wallet id"));
        }
        if !self.auth_server.starts_with("https://") {
            return Err(VerificationError::invalid_details(
                "authServer is not an https URL",
            ));
        }
        if !self.resource_server.starts_with("https://") {
            return Err(VerificationError::invalid_details(
                "resourceServer is not an https URL",
            ));
        }
        Ok(())
    }
}

/// Fetches wallet address documents for normalized pointer URLs
#[async_trait]
pub trait WalletDetailsFetcher: Send + Sync {
    /// Fetch the wallet address document behind a pointer URL
    async fn fetch(&self, pointer_url: &str) -> WebMonetizationResult<WalletDetails>;
}

/// HTTP fetcher backed by a reqwest client with a request timeout
pub struct HttpWalletFetcher {
    client: reqwest::Client,
}

impl HttpWalletFetcher {
    /// Create a fetcher with the default 10 second timeout
    pub fn new() -> WebMonetizationResult<Self> {
        Self::with_timeout(DEFAULT_VERIFY_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> WebMonetizationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                WebMonetizationError::Verification(VerificationError::request_failed(format!(
                    "failed to create HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self { client })
    }

    fn map_error(err: reqwest::Error) -> WebMonetizationError {
        if err.is_timeout() {
            VerificationError::Timeout.into()
        } else {
            VerificationError::request_failed(err.to_string()).into()
        }
    }
}

#[async_trait]
impl WalletDetailsFetcher for HttpWalletFetcher {
    async fn fetch(&self, pointer_url: &str) -> WebMonetizationResult<WalletDetails> {
        debug!(pointer_url, "fetching wallet details");
        let response = self
            .client
            .get(pointer_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            return Err(VerificationError::request_failed(format!(
                "wallet request failed with status {}",
                response.status()
            ))
            .into());
        }

        let resolved_url = response.url().to_string();
        let mut details: WalletDetails = response
            .json()
            .await
            .map_err(|e| VerificationError::invalid_details(e.to_string()))?;
        details.resolved_url = resolved_url;
        Ok(details)
    }
}
