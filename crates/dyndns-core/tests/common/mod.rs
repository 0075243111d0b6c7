//! Test doubles and common utilities for contract tests
//!
//! This module provides call-counting doubles for the resolver and
//! provider traits so tests can assert exactly which network operations a
//! cycle performed.

use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{DnsProvider, DomainRecord, IpResolver, RecordEdit};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A resolver that always answers with a fixed address, counting calls
pub struct StaticResolver {
    ip: Ipv4Addr,
    resolve_calls: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            resolve_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Create a StaticResolver that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            ip: other.ip,
            resolve_calls: Arc::clone(&other.resolve_calls),
        }
    }
}

#[async_trait::async_trait]
impl IpResolver for StaticResolver {
    async fn resolve(&self) -> Result<Ipv4Addr> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }
}

/// A resolver whose lookups always fail
pub struct FailingResolver;

#[async_trait::async_trait]
impl IpResolver for FailingResolver {
    async fn resolve(&self) -> Result<Ipv4Addr> {
        Err(Error::http("connection refused"))
    }
}

/// A provider backed by an in-memory record set, counting list/edit calls
pub struct MockProvider {
    records: Arc<Mutex<Vec<DomainRecord>>>,
    list_calls: Arc<AtomicUsize>,
    edit_calls: Arc<AtomicUsize>,
    edits: Arc<Mutex<Vec<(String, u64, RecordEdit)>>>,
    fail_list: bool,
    fail_edit: bool,
}

impl MockProvider {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            list_calls: Arc::new(AtomicUsize::new(0)),
            edit_calls: Arc::new(AtomicUsize::new(0)),
            edits: Arc::new(Mutex::new(Vec::new())),
            fail_list: false,
            fail_edit: false,
        }
    }

    /// A provider whose listing calls always fail
    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::new(Vec::new())
        }
    }

    /// A provider whose edit calls always fail
    pub fn failing_edit(records: Vec<DomainRecord>) -> Self {
        Self {
            fail_edit: true,
            ..Self::new(records)
        }
    }

    /// Get the number of times list_records() was called
    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times edit_record() was called
    pub fn edit_call_count(&self) -> usize {
        self.edit_calls.load(Ordering::SeqCst)
    }

    /// Get the recorded edit calls as (domain, record_id, edit) tuples
    pub fn edits(&self) -> Vec<(String, u64, RecordEdit)> {
        self.edits.lock().unwrap().clone()
    }

    /// Create a MockProvider that shares counters and records with an
    /// existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            list_calls: Arc::clone(&other.list_calls),
            edit_calls: Arc::clone(&other.edit_calls),
            edits: Arc::clone(&other.edits),
            fail_list: other.fail_list,
            fail_edit: other.fail_edit,
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockProvider {
    async fn list_records(&self, _domain: &str) -> Result<Vec<DomainRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_list {
            return Err(Error::provider("mock", "listing unavailable"));
        }

        Ok(self.records.lock().unwrap().clone())
    }

    async fn edit_record(
        &self,
        domain: &str,
        record_id: u64,
        edit: &RecordEdit,
    ) -> Result<DomainRecord> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        self.edits
            .lock()
            .unwrap()
            .push((domain.to_string(), record_id, edit.clone()));

        if self.fail_edit {
            return Err(Error::provider("mock", "edit rejected"));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::provider("mock", format!("no record with id {record_id}")))?;
        record.data = edit.data.clone();

        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Shorthand for an A record
pub fn a_record(id: u64, name: &str, data: &str) -> DomainRecord {
    DomainRecord {
        id,
        record_type: "A".to_string(),
        name: name.to_string(),
        data: data.to_string(),
    }
}
