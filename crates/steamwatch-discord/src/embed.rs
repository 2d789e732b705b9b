//! Discord embed payloads.

use serde::{Deserialize, Serialize};

use steamwatch_diff::Notification;

/// Body of a create or edit message request: a single embed.
#[derive(Debug, Serialize)]
pub struct MessagePayload<'a> {
    pub embeds: [Embed<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct Embed<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter<'a> {
    pub text: &'a str,
}

/// The part of a created message we keep.
#[derive(Debug, Deserialize)]
pub struct CreatedMessage {
    pub id: String,
}

impl<'a> From<&'a Notification> for MessagePayload<'a> {
    fn from(n: &'a Notification) -> Self {
        Self {
            embeds: [Embed {
                title: &n.title,
                description: &n.body,
                color: n.severity.color(),
                footer: n.footer.as_deref().map(|text| EmbedFooter { text }),
            }],
        }
    }
}
