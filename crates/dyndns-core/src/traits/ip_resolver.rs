// # IP Resolver Trait
//
// Defines the interface for discovering the caller's public address.
//
// ## Implementations
//
// - HTTP echo service: `dyndns-ip-http` crate

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for public IP discovery implementations
///
/// One outbound query per call. Implementations perform no retry and no
/// caching; a fresh answer is fetched on every reconciliation cycle, and
/// any transport or parse failure aborts only that cycle. A records are
/// the only update target, so the answer is strictly IPv4.
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Fetch the current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The current public address
    /// - `Err(Error)`: If the lookup failed; the caller treats this as
    ///   fatal to the cycle, not to the process
    async fn resolve(&self) -> Result<Ipv4Addr, crate::Error>;
}
