//! steamwatch-steam — status source backed by the Steam Web API.
//!
//! Queries `IGameServersService/GetServerList` filtered by server address
//! and turns the first matching entry into a
//! [`Snapshot`](steamwatch_state::Snapshot).
//!
//! Every failure (transport, HTTP status, malformed body) and the absence of
//! a matching entry surface to callers of [`StatusSource::fetch`] as
//! [`Observation::Unreachable`](steamwatch_state::Observation::Unreachable).
//! [`SteamStatusSource::query`] keeps the distinction for diagnostics.

pub mod client;
pub mod error;
pub mod response;
pub mod source;

pub use client::{SteamConfig, SteamStatusSource};
pub use error::FetchError;
pub use source::StatusSource;
