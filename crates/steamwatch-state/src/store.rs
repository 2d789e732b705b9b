//! StateStore — per-address memory of the poll loop.
//!
//! Maps each configured server address to its [`ServerState`]. Entries are
//! created on first lookup and never removed while the process runs. The
//! store is the sole owner of the displayed-message handle; callers report
//! what the notification step did through [`HandleUpdate`].

use std::collections::HashMap;

use tracing::debug;

use crate::types::*;

/// In-memory state store keyed by server address.
#[derive(Debug, Default)]
pub struct StateStore {
    servers: HashMap<Address, ServerState>,
}

impl StateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a "never observed" entry for every address.
    pub fn with_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Address>,
    {
        let servers = addresses
            .into_iter()
            .map(|addr| (addr.into(), ServerState::default()))
            .collect();
        Self { servers }
    }

    /// Get the state for an address, creating a "never observed" entry if absent.
    pub fn get(&mut self, address: &str) -> &ServerState {
        self.servers.entry(address.to_string()).or_default()
    }

    /// Look up the state for an address without creating it.
    pub fn state(&self, address: &str) -> Option<&ServerState> {
        self.servers.get(address)
    }

    /// Record the outcome of one poll for an address.
    ///
    /// The last observation is always replaced. The displayed handle
    /// follows `update`: set, cleared, or left as it was.
    pub fn apply(&mut self, address: &str, observation: Observation, update: HandleUpdate) {
        let state = self.servers.entry(address.to_string()).or_default();
        state.last = Some(observation);
        match update {
            HandleUpdate::Set(handle) => {
                debug!(%address, %handle, "displayed message set");
                state.displayed = Some(handle);
            }
            HandleUpdate::Clear => {
                if state.displayed.take().is_some() {
                    debug!(%address, "displayed message cleared");
                }
            }
            HandleUpdate::Keep => {}
        }
    }

    /// Addresses known to the store, in no particular order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "10.0.0.1:27015";

    fn reachable(players: u32) -> Observation {
        Observation::Reachable(Snapshot {
            address: ADDR.to_string(),
            name: Some("Public".to_string()),
            players,
            max_players: 24,
            map: "de_dust2".to_string(),
            metadata: ServerMetadata::default(),
        })
    }

    #[test]
    fn get_creates_unobserved_entry() {
        let mut store = StateStore::new();
        assert!(store.state(ADDR).is_none());

        assert!(store.get(ADDR).is_unobserved());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn with_addresses_preregisters_all() {
        let store = StateStore::with_addresses(["a:1", "b:2", "c:3"]);
        assert_eq!(store.len(), 3);
        assert!(store.state("b:2").is_some_and(ServerState::is_unobserved));

        let mut addrs: Vec<&str> = store.addresses().collect();
        addrs.sort_unstable();
        assert_eq!(addrs, vec!["a:1", "b:2", "c:3"]);
    }

    #[test]
    fn apply_replaces_last_observation() {
        let mut store = StateStore::with_addresses([ADDR]);

        store.apply(ADDR, Observation::Unreachable, HandleUpdate::Keep);
        assert_eq!(store.get(ADDR).last, Some(Observation::Unreachable));

        store.apply(ADDR, reachable(4), HandleUpdate::Keep);
        assert_eq!(store.get(ADDR).last, Some(reachable(4)));
    }

    #[test]
    fn apply_sets_and_clears_handle() {
        let mut store = StateStore::with_addresses([ADDR]);
        let handle = MessageHandle::new("111");

        store.apply(ADDR, reachable(1), HandleUpdate::Set(handle.clone()));
        assert_eq!(store.get(ADDR).displayed, Some(handle));

        store.apply(ADDR, reachable(0), HandleUpdate::Clear);
        assert!(store.get(ADDR).displayed.is_none());
    }

    #[test]
    fn apply_keep_retains_handle() {
        let mut store = StateStore::with_addresses([ADDR]);
        let handle = MessageHandle::new("222");

        store.apply(ADDR, reachable(2), HandleUpdate::Set(handle.clone()));
        store.apply(ADDR, reachable(3), HandleUpdate::Keep);

        let state = store.get(ADDR);
        assert_eq!(state.displayed, Some(handle));
        assert_eq!(state.last, Some(reachable(3)));
    }

    #[test]
    fn addresses_are_independent() {
        let mut store = StateStore::with_addresses(["a:1", "b:2"]);
        store.apply("a:1", reachable(5), HandleUpdate::Set(MessageHandle::new("9")));

        assert!(store.get("b:2").is_unobserved());
        assert!(store.get("b:2").displayed.is_none());
    }
}
