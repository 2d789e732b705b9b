//! Domain types for observed game-server state.
//!
//! A status query yields an [`Observation`]: either a full [`Snapshot`] of a
//! reachable server or [`Observation::Unreachable`]. The store keeps the last
//! observation per address alongside the handle of any live notification.

use serde::{Deserialize, Serialize};

/// Server address as configured (`ip:port`). Stable key of the store.
pub type Address = String;

// ── Snapshot ──────────────────────────────────────────────────────

/// Observed status of one reachable server at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub address: Address,
    /// Display alias reported by the server, if any.
    pub name: Option<String>,
    pub players: u32,
    pub max_players: u32,
    pub map: String,
    /// Passthrough fields, never used for decisions.
    #[serde(default)]
    pub metadata: ServerMetadata,
}

/// Extra server details carried along with a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerMetadata {
    pub game_port: u16,
    pub steam_id: String,
    pub app_id: u32,
    pub game_dir: String,
    pub version: String,
    pub product: String,
    pub region: i32,
    pub bots: u32,
    pub secure: bool,
    pub dedicated: bool,
    pub os: String,
    /// Game type tags, split from the comma separated list.
    pub tags: Vec<String>,
}

impl Snapshot {
    /// Name to show for this server, if it reports a non-empty one.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

// ── Observation ───────────────────────────────────────────────────

/// Result of one status query for one address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Observation {
    Reachable(Snapshot),
    /// The query returned no entry or failed; no fields are known.
    Unreachable,
}

impl Observation {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Observation::Reachable(_))
    }

    /// The snapshot, if the server was reachable.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Observation::Reachable(snapshot) => Some(snapshot),
            Observation::Unreachable => None,
        }
    }
}

impl From<Option<Snapshot>> for Observation {
    fn from(value: Option<Snapshot>) -> Self {
        value.map_or(Observation::Unreachable, Observation::Reachable)
    }
}

// ── Notification handle ───────────────────────────────────────────

/// Opaque reference to a notification message shown in the chat channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageHandle(String);

impl MessageHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Server state ──────────────────────────────────────────────────

/// Per-address memory kept between poll cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerState {
    /// Last observation, or `None` if the address was never polled.
    pub last: Option<Observation>,
    /// Live notification message, if one is currently displayed.
    pub displayed: Option<MessageHandle>,
}

impl ServerState {
    /// Whether no poll has completed for this address yet.
    pub fn is_unobserved(&self) -> bool {
        self.last.is_none()
    }
}

/// What the notification step did to the displayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleUpdate {
    /// A message is now displayed under this handle.
    Set(MessageHandle),
    /// No message is displayed any more.
    Clear,
    /// Leave the stored handle as it is (no notification, or the sink failed).
    Keep,
}

impl From<Option<MessageHandle>> for HandleUpdate {
    fn from(value: Option<MessageHandle>) -> Self {
        value.map_or(HandleUpdate::Clear, HandleUpdate::Set)
    }
}
