// # HTTP IP Resolver
//
// This crate provides an HTTP-based IP resolver for the dyndns system.
//
// ## Architecture
//
// Fetches the caller's public IPv4 address from an external echo service
// (e.g. ipify, icanhazip) that returns the address as a plain-text body.
// One GET per reconciliation cycle, no retry, no caching; the client
// carries a 10 second timeout.

use async_trait::async_trait;
use dyndns_core::traits::IpResolver;
use dyndns_core::{Error, Result};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Default IP echo service. Returns the caller's address as plain text.
pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org";

/// HTTP timeout for echo requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public IP resolver
pub struct HttpIpResolver {
    /// URL of the echo service
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Resolver against the default echo service
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_IP_SERVICE)
    }

    /// Resolver against a custom echo service URL
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<Ipv4Addr> {
        tracing::debug!(url = %self.url, "querying IP echo service");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::http(format!(
                "echo service returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read response: {e}")))?;

        parse_ipv4(&body)
    }
}

/// Parse an echo-service body into an IPv4 address
///
/// The body is expected to be the bare address, possibly surrounded by
/// whitespace. An IPv6 answer is rejected: A records are the only update
/// target.
fn parse_ipv4(body: &str) -> Result<Ipv4Addr> {
    let text = body.trim();
    text.parse::<Ipv4Addr>().map_err(|_| {
        Error::provider("http", format!("echo service returned an unusable address: {text:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_address() {
        assert_eq!(
            parse_ipv4("203.0.113.7").unwrap(),
            Ipv4Addr::new(203, 0, 113, 7)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            parse_ipv4("  203.0.113.7\n").unwrap(),
            Ipv4Addr::new(203, 0, 113, 7)
        );
    }

    #[test]
    fn rejects_ipv6_answers() {
        assert!(parse_ipv4("2001:db8::1").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_ipv4("<html>rate limited</html>").is_err());
        assert!(parse_ipv4("").is_err());
    }
}
