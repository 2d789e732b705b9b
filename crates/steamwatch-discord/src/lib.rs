//! steamwatch-discord — renders decisions as Discord messages.
//!
//! # Architecture
//!
//! ```text
//! NotificationSink (policy)
//!   ├── Notify          → edit live message, or create one
//!   │                     (edit target gone → create)
//!   └── NotifyAndClear  → same, then delete or detach the message
//!         │
//!         ▼
//! MessageChannel (transport: create / edit / delete)
//!   └── DiscordChannel  → REST API v10, bot token auth
//! ```
//!
//! The sink returns the handle of the message that is live afterwards, or
//! `None` once it has been cleared. The poll loop stores that handle.

pub mod channel;
pub mod discord;
pub mod embed;
pub mod error;
pub mod sink;

pub use channel::MessageChannel;
pub use discord::{BotUser, DiscordChannel, DiscordConfig};
pub use error::SinkError;
pub use sink::{ClearPolicy, NotificationSink};
