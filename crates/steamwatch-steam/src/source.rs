//! The status source seam.

use std::future::Future;

use steamwatch_state::Observation;

/// Fetches the current status of a server by address.
///
/// Implementations never fail: "no such server" and "query failed" are both
/// reported as [`Observation::Unreachable`].
pub trait StatusSource {
    fn fetch(&self, address: &str) -> impl Future<Output = Observation> + Send;
}
