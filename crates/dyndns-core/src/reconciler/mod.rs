//! Record reconciliation
//!
//! One cycle: resolve the public IP, list the domain's records, pick the
//! matching A record, and edit it only on mismatch.
//!
//! ## Cycle flow
//!
//! ```text
//! ┌────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ IpResolver │ ──▶ │  Reconciler  │ ──▶ │ DnsProvider  │
//! └────────────┘     └──────────────┘     └──────────────┘
//!    resolve()        compare & decide     list_records()
//!                                          edit_record()
//! ```
//!
//! Cycles are stateless, independent, and idempotent: nothing carries over
//! between invocations, and running the same cycle twice with an unchanged
//! IP is a no-op both times.

use std::net::Ipv4Addr;

use tracing::info;

use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DomainRecord, IpResolver, RecordEdit};

/// Result of one reconciliation cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The record already held the resolved IP; no edit was issued
    Unchanged {
        /// Identifier of the matched record
        record_id: u64,
        /// The address both sides agree on
        ip: Ipv4Addr,
    },

    /// The record was rewritten to the resolved IP
    Updated {
        /// Identifier of the edited record
        record_id: u64,
        /// Value the record held before the edit
        previous: String,
        /// The address now stored
        ip: Ipv4Addr,
    },
}

/// Drives resolve-compare-update cycles against one resolver/provider pair
///
/// Constructed once at startup and passed by reference into each cycle;
/// the underlying API clients are reused across ticks without any ambient
/// global state.
pub struct Reconciler {
    resolver: Box<dyn IpResolver>,
    provider: Box<dyn DnsProvider>,
}

impl Reconciler {
    /// Create a reconciler from a resolver and a provider
    pub fn new(resolver: Box<dyn IpResolver>, provider: Box<dyn DnsProvider>) -> Self {
        Self { resolver, provider }
    }

    /// Run one reconciliation cycle for `name` under `domain`
    ///
    /// Steps, in order, each a hard dependency on the previous one
    /// succeeding:
    ///
    /// 1. Resolve the current public IP.
    /// 2. List the domain's records.
    /// 3. Select the record matching `name` with type "A".
    /// 4. Edit the record, but only if its data differs from the
    ///    resolved IP.
    ///
    /// Exactly one info line is emitted per successful cycle; errors carry
    /// their step's context (domain, record id, old/new values) and leave
    /// logging to the caller.
    pub async fn reconcile(&self, domain: &str, name: &str) -> Result<ReconcileOutcome> {
        let ip = self
            .resolver
            .resolve()
            .await
            .map_err(|e| Error::resolution(e.to_string()))?;

        let records = self
            .provider
            .list_records(domain)
            .await
            .map_err(|e| Error::record_lookup(domain, e.to_string()))?;

        let record =
            select_record(&records, name).ok_or_else(|| Error::record_not_found(domain, name))?;

        let new_data = ip.to_string();

        if record.data == new_data {
            info!(
                domain,
                id = record.id,
                name,
                data = %record.data,
                "skipping update: no change detected"
            );
            return Ok(ReconcileOutcome::Unchanged {
                record_id: record.id,
                ip,
            });
        }

        let edit = RecordEdit {
            data: new_data.clone(),
        };
        self.provider
            .edit_record(domain, record.id, &edit)
            .await
            .map_err(|e| {
                Error::record_update(domain, record.id, name, &record.data, &new_data, e.to_string())
            })?;

        info!(
            domain,
            id = record.id,
            name,
            from = %record.data,
            to = %new_data,
            "updated domain record"
        );

        Ok(ReconcileOutcome::Updated {
            record_id: record.id,
            previous: record.data.clone(),
            ip,
        })
    }
}

/// Select the record to reconcile: `name` must match and the type must be
/// "A". When several records match, the last one in the provider's
/// ordering wins. That is positional precedence, not a correctness rule;
/// it is kept because existing deployments may rely on it.
fn select_record<'a>(records: &'a [DomainRecord], name: &str) -> Option<&'a DomainRecord> {
    records
        .iter()
        .filter(|r| r.name == name && r.is_a_record())
        .next_back()
}
