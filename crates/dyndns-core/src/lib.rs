// # dyndns-core
//
// Core library for the dyndns reconciliation loop.
//
// ## Architecture Overview
//
// This library provides the core functionality for keeping one DNS A
// record pointed at the host's current public IP:
// - **IpResolver**: Trait for discovering the caller's public IPv4 address
// - **DnsProvider**: Trait for listing and editing records via provider APIs
// - **Reconciler**: One resolve-compare-update cycle over a resolver/provider pair
// - **Scheduler**: Cancellable fixed-interval tick loop driving the cycles
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Stateless Cycles**: No state is carried between ticks; every cycle
//    resolves fresh and is idempotent
// 3. **Explicit Clients**: Resolver and provider are constructed once and
//    passed by reference, never held as globals
// 4. **Library-First**: All core functionality can be used as a library

pub mod config;
pub mod error;
pub mod reconciler;
pub mod scheduler;
pub mod traits;

// Re-export core types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use scheduler::Scheduler;
pub use traits::{DnsProvider, DomainRecord, IpResolver, RecordEdit};
