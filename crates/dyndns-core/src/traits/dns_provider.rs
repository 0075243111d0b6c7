// # DNS Provider Trait
//
// Defines the interface for reading and editing DNS records via provider
// APIs.
//
// ## Implementations
//
// - DigitalOcean: `dyndns-provider-digitalocean` crate
//
// Providers are single-shot API clients: one logical operation per call,
// no retry, no backoff, no caching, no background tasks. Failure handling
// is owned entirely by the reconciliation loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One provider-side DNS record
///
/// Owned entirely by the provider: the core reads records and submits edit
/// requests, it never constructs or deletes one. Unknown provider fields
/// are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Provider-assigned unique identifier
    pub id: u64,

    /// Record type, e.g. "A". Only A records are eligible for updates.
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record name within the domain
    pub name: String,

    /// The stored address
    pub data: String,
}

impl DomainRecord {
    /// Whether this record can hold an IPv4 address
    pub fn is_a_record(&self) -> bool {
        self.record_type == "A"
    }
}

/// Body of an edit request
///
/// Only `data` is ever rewritten; every other record attribute stays as
/// the provider has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdit {
    /// New value for the record's `data` attribute
    pub data: String,
}

/// Trait for DNS provider implementations
///
/// Authentication is supplied once at client construction; the same client
/// is reused across reconciliation cycles by reference, never through a
/// global singleton.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record in `domain`, in the provider's own ordering
    ///
    /// The ordering matters: when several records share a name and type,
    /// the reconciler picks the last match in this sequence.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DomainRecord>)`: All records of the domain
    /// - `Err(Error)`: Transport or API failure
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>, crate::Error>;

    /// Rewrite the `data` of an existing record
    ///
    /// # Parameters
    ///
    /// - `domain`: Domain holding the record
    /// - `record_id`: Provider-assigned identifier of the record
    /// - `edit`: The new record data
    ///
    /// # Returns
    ///
    /// - `Ok(DomainRecord)`: The record as stored after the edit
    /// - `Err(Error)`: Transport or API failure
    async fn edit_record(
        &self,
        domain: &str,
        record_id: u64,
        edit: &RecordEdit,
    ) -> Result<DomainRecord, crate::Error>;

    /// Provider name for log context (e.g. "digitalocean")
    fn provider_name(&self) -> &'static str;
}
