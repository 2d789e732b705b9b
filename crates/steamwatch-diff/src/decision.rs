//! Decision types produced by the diff engine.

use serde::Serialize;

/// Kind of transition a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Server came online.
    Online,
    /// Server went offline.
    Offline,
    PlayerJoined,
    PlayerLeft,
    MapChanged,
}

impl Severity {
    /// RGB colour used when rendering the notification.
    pub fn color(self) -> u32 {
        match self {
            Severity::Online => 0x00ff00,
            Severity::Offline => 0xff0000,
            Severity::PlayerJoined => 0x0000ff,
            Severity::PlayerLeft => 0xff8800,
            Severity::MapChanged => 0x00ffff,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Severity::Online
    }

    pub fn is_negative(self) -> bool {
        self == Severity::Offline
    }
}

/// Content of one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    /// Server alias shown under player and map notices.
    pub footer: Option<String>,
}

/// Verdict of one diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to show.
    NoChange,
    /// Create or update the displayed notification.
    Notify(Notification),
    /// Show the notification, then drop the live message.
    NotifyAndClear(Notification),
}

impl Decision {
    /// The content to show, if any.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Decision::NoChange => None,
            Decision::Notify(n) | Decision::NotifyAndClear(n) => Some(n),
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, Decision::NoChange)
    }

    /// Whether the live message should be dropped after showing this.
    pub fn clears(&self) -> bool {
        matches!(self, Decision::NotifyAndClear(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::NoChange => "no_change",
            Decision::Notify(_) => "notify",
            Decision::NotifyAndClear(_) => "notify_and_clear",
        }
    }
}
