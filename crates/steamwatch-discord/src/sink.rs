//! Notification sink — maps a decision onto create/edit/delete calls.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use steamwatch_diff::{Decision, Notification};
use steamwatch_state::MessageHandle;

use crate::channel::MessageChannel;
use crate::error::SinkError;

/// What happens to the live message once a server empties out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearPolicy {
    /// Delete the message from the channel.
    #[default]
    Delete,
    /// Leave the message in the channel and stop tracking it.
    Detach,
}

impl FromStr for ClearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(ClearPolicy::Delete),
            "detach" => Ok(ClearPolicy::Detach),
            other => Err(format!("unknown clear policy `{other}` (expected delete or detach)")),
        }
    }
}

impl fmt::Display for ClearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClearPolicy::Delete => "delete",
            ClearPolicy::Detach => "detach",
        })
    }
}

/// Presents decisions through a [`MessageChannel`], keeping at most one
/// live message per server.
#[derive(Debug)]
pub struct NotificationSink<C> {
    channel: C,
    clear_policy: ClearPolicy,
}

impl<C: MessageChannel> NotificationSink<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            clear_policy: ClearPolicy::default(),
        }
    }

    pub fn with_clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.clear_policy = policy;
        self
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Show a decision and return the handle that is live afterwards.
    ///
    /// A failed delete after a successful create or edit still returns the
    /// shown message. On error nothing was shown; callers keep the handle
    /// they had.
    pub async fn present(
        &self,
        decision: &Decision,
        existing: Option<&MessageHandle>,
    ) -> Result<Option<MessageHandle>, SinkError> {
        let (notification, clear) = match decision {
            Decision::NoChange => return Ok(existing.cloned()),
            Decision::Notify(n) => (n, false),
            Decision::NotifyAndClear(n) => (n, true),
        };

        let handle = self.show(notification, existing).await?;
        if !clear {
            return Ok(Some(handle));
        }

        match self.clear_policy {
            ClearPolicy::Detach => {
                debug!(%handle, "live message detached");
                Ok(None)
            }
            ClearPolicy::Delete => match self.channel.delete(&handle).await {
                Ok(()) | Err(SinkError::NotFound) => {
                    debug!(%handle, "live message deleted");
                    Ok(None)
                }
                // The message exists and shows the latest state; keep tracking it.
                Err(e) => {
                    warn!(%handle, error = %e, "failed to delete live message, keeping it");
                    Ok(Some(handle))
                }
            },
        }
    }

    /// Edit the live message in place, or post a new one.
    async fn show(
        &self,
        notification: &Notification,
        existing: Option<&MessageHandle>,
    ) -> Result<MessageHandle, SinkError> {
        if let Some(handle) = existing {
            match self.channel.edit(handle, notification).await {
                Ok(()) => return Ok(handle.clone()),
                Err(SinkError::NotFound) => {
                    warn!(%handle, "live message is gone, posting a new one");
                }
                Err(e) => return Err(e),
            }
        }
        self.channel.create(notification).await
    }
}
