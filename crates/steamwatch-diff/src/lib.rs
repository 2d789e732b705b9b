//! steamwatch-diff — the state-diff and notification-decision engine.
//!
//! Compares the previous [`ServerState`](steamwatch_state::ServerState) of a
//! server with a freshly fetched observation and decides whether a
//! notification is warranted.
//!
//! # Rules
//!
//! ```text
//! decide(previous, current)
//!   1. never observed            → NoChange (silent baseline)
//!   2. reachability flipped      → Notify online / offline
//!   3. still unreachable         → NoChange
//!   4. player count changed      → Notify joined / left
//!                                  (NotifyAndClear when it drops to zero)
//!   5. map changed, players > 0  → Notify map change
//!   6. otherwise                 → NoChange
//! ```
//!
//! The first matching rule wins. The engine is pure: it never touches the
//! displayed-message handle, it only says what to show and whether the
//! live message should be cleared afterwards.

pub mod decision;
pub mod engine;

pub use decision::{Decision, Notification, Severity};
pub use engine::decide;
