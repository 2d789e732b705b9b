//! steamwatch-state — observed server state for steamwatch.
//!
//! Holds the value types produced by a status query ([`Snapshot`],
//! [`Observation`]) and the per-address memory kept between poll cycles
//! ([`ServerState`], [`StateStore`]).
//!
//! # Ownership
//!
//! The `StateStore` is a plain owned map with no interior locking. It is
//! mutated by exactly one poll loop, one address at a time, so `&mut self`
//! is the only synchronisation it needs.

pub mod store;
pub mod types;

pub use store::StateStore;
pub use types::*;
