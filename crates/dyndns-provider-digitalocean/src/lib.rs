// # DigitalOcean DNS Provider
//
// This crate provides a DigitalOcean DNS provider implementation for the
// dyndns system.
//
// - Makes one logical API operation per trait call
// - Full error propagation to the reconciler (which owns failure handling)
// - HTTP timeout configured (30 seconds)
// - Specific error handling for HTTP status codes (401/403, 404, 429, 5xx)
// - Record listing follows pagination, so every record of the domain is
//   visible to the reconciler even past one page
// - NO retry, backoff, caching, or background tasks (owned by the loop)
//
// ## Security Requirements
//
// - The API token NEVER appears in logs or Debug output
// - The provider fails fast at construction if the token is empty
//
// ## API Reference
//
// - DigitalOcean API v2: https://docs.digitalocean.com/reference/api/
// - List records: GET `/v2/domains/{domain}/records`
// - Edit record: PUT `/v2/domains/{domain}/records/{record_id}`

use async_trait::async_trait;
use dyndns_core::traits::{DnsProvider, DomainRecord, RecordEdit};
use dyndns_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// DigitalOcean API base URL
const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Records fetched per page when listing
const LIST_PAGE_SIZE: usize = 200;

/// Provider name used in errors and log context
const PROVIDER_NAME: &str = "digitalocean";

/// DigitalOcean DNS provider
///
/// Bearer-token authenticated client for the DigitalOcean API v2.
/// Authentication is supplied once at construction; the provider is
/// stateless and single-shot per call.
pub struct DigitalOceanProvider {
    /// DigitalOcean API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API endpoint, overridable for tests
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DigitalOceanProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DigitalOceanProvider {
    /// Create a provider for the public DigitalOcean API
    ///
    /// # Parameters
    ///
    /// - `api_token`: DigitalOcean personal access token with write scope
    ///
    /// # Security
    ///
    /// The API token will never be logged or displayed in error messages.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, DIGITALOCEAN_API_BASE)
    }

    /// Create a provider against a custom API endpoint
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("DigitalOcean API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_token,
            base_url: base_url.into(),
            client,
        })
    }

    /// Map a non-success response to an error, consuming the body
    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error response".to_string());

        match status.as_u16() {
            401 | 403 => Error::provider(
                PROVIDER_NAME,
                format!(
                    "authentication failed: invalid API token or insufficient permissions (status {status})"
                ),
            ),
            404 => Error::provider(PROVIDER_NAME, format!("not found (status {status}): {body}")),
            429 => Error::provider(
                PROVIDER_NAME,
                format!("rate limit exceeded, retry later (status {status})"),
            ),
            500..=599 => Error::provider(
                PROVIDER_NAME,
                format!("server error (transient, status {status}): {body}"),
            ),
            _ => Error::provider(PROVIDER_NAME, format!("unexpected status {status}: {body}")),
        }
    }
}

/// One page of a record listing
///
/// ```json
/// {
///   "domain_records": [...],
///   "links": { "pages": { "next": "...", "last": "..." } },
///   "meta": { "total": 7 }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct RecordsPage {
    domain_records: Vec<DomainRecord>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    pages: Pages,
}

#[derive(Debug, Default, Deserialize)]
struct Pages {
    next: Option<String>,
}

/// Envelope of a single-record response
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    domain_record: DomainRecord,
}

#[async_trait]
impl DnsProvider for DigitalOceanProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>> {
        let mut records = Vec::new();
        let mut url = format!(
            "{}/domains/{}/records?per_page={}",
            self.base_url, domain, LIST_PAGE_SIZE
        );

        loop {
            tracing::debug!(domain, %url, "listing domain records");

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_token)
                .send()
                .await
                .map_err(|e| Error::http(format!("request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(Self::error_from_response(response).await);
            }

            let page: RecordsPage = response
                .json()
                .await
                .map_err(|e| Error::provider(PROVIDER_NAME, format!("failed to parse response: {e}")))?;

            records.extend(page.domain_records);

            match page.links.pages.next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(records)
    }

    async fn edit_record(
        &self,
        domain: &str,
        record_id: u64,
        edit: &RecordEdit,
    ) -> Result<DomainRecord> {
        let url = format!("{}/domains/{}/records/{}", self.base_url, domain, record_id);
        tracing::debug!(domain, id = record_id, "editing domain record");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .json(edit)
            .send()
            .await
            .map_err(|e| Error::http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let envelope: RecordEnvelope = response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER_NAME, format!("failed to parse response: {e}")))?;

        Ok(envelope.domain_record)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
