//! steamwatch-poller — drives poll cycles over the configured servers.
//!
//! # Cycle
//!
//! ```text
//! for address in configured order:
//!   StatusSource::fetch(address)        → Observation
//!   decide(StateStore[address], obs)    → Decision
//!   NotificationSink::present(decision) → live handle   (skipped on NoChange)
//!   StateStore::apply(address, obs, handle update)
//! sleep(interval), repeat until shutdown
//! ```
//!
//! Addresses are handled strictly one after another. A slow query or chat
//! call stalls the cycle; nothing is retried within a cycle.

pub mod poller;

pub use poller::{CycleReport, Poller};
