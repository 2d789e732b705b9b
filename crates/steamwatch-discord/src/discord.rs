//! Discord REST adapter.
//!
//! Talks to the HTTP API directly with a bot token; posting embeds into a
//! single text channel needs no gateway connection.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use steamwatch_diff::Notification;
use steamwatch_state::MessageHandle;

use crate::channel::MessageChannel;
use crate::embed::{CreatedMessage, MessagePayload};
use crate::error::SinkError;

const USER_AGENT: &str = concat!("DiscordBot (steamwatch, ", env!("CARGO_PKG_VERSION"), ")");

/// Connection settings for the Discord API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    /// Versioned API base URL.
    pub api_url: String,
    pub token: String,
    /// Channel all notifications are posted to.
    pub channel_id: String,
    pub timeout: Duration,
}

impl DiscordConfig {
    pub const DEFAULT_API_URL: &'static str = "https://discord.com/api/v10";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            token: token.into(),
            channel_id: channel_id.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// The bot account behind the token.
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: String,
    pub username: String,
}

/// Message channel backed by a Discord text channel.
#[derive(Debug, Clone)]
pub struct DiscordChannel {
    client: reqwest::Client,
    api_url: String,
    messages_url: String,
}

impl DiscordChannel {
    pub fn new(config: &DiscordConfig) -> Result<Self, SinkError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|_| SinkError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(SinkError::Client)?;

        let api_url = config.api_url.trim_end_matches('/').to_string();
        let messages_url = format!("{api_url}/channels/{}/messages", config.channel_id);
        Ok(Self {
            client,
            api_url,
            messages_url,
        })
    }

    /// Identify the bot; fails when the token is rejected.
    pub async fn current_user(&self) -> Result<BotUser, SinkError> {
        let resp = self
            .client
            .get(format!("{}/users/@me", self.api_url))
            .send()
            .await?;
        let body = check(resp).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn message_url(&self, handle: &MessageHandle) -> String {
        format!("{}/{}", self.messages_url, handle.as_str())
    }
}

impl MessageChannel for DiscordChannel {
    async fn create(&self, notification: &Notification) -> Result<MessageHandle, SinkError> {
        let resp = self
            .client
            .post(&self.messages_url)
            .json(&MessagePayload::from(notification))
            .send()
            .await?;
        let body = check(resp).await?.bytes().await?;
        let created: CreatedMessage = serde_json::from_slice(&body)?;
        debug!(id = %created.id, "message created");
        Ok(MessageHandle::new(created.id))
    }

    async fn edit(&self, handle: &MessageHandle, notification: &Notification) -> Result<(), SinkError> {
        let resp = self
            .client
            .patch(self.message_url(handle))
            .json(&MessagePayload::from(notification))
            .send()
            .await?;
        check(resp).await?;
        debug!(%handle, "message edited");
        Ok(())
    }

    async fn delete(&self, handle: &MessageHandle) -> Result<(), SinkError> {
        let resp = self.client.delete(self.message_url(handle)).send().await?;
        check(resp).await?;
        debug!(%handle, "message deleted");
        Ok(())
    }
}

/// Map non-2xx responses to errors; 404 means the target is gone.
async fn check(resp: Response) -> Result<Response, SinkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(SinkError::NotFound);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SinkError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::HeaderMap as AxumHeaders;
    use axum::response::IntoResponse;
    use axum::routing::{get, patch, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use steamwatch_diff::Severity;

    const TOKEN: &str = "test-token";
    const CHANNEL: &str = "4242";

    #[derive(Clone, Default)]
    struct Mock {
        messages: Arc<Mutex<HashMap<String, Value>>>,
        next_id: Arc<Mutex<u64>>,
    }

    fn authorized(headers: &AxumHeaders) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bot {TOKEN}"))
    }

    async fn me(headers: AxumHeaders) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, "401: Unauthorized").into_response();
        }
        Json(json!({ "id": "1", "username": "watchbot" })).into_response()
    }

    async fn create(
        State(mock): State<Mock>,
        Path(channel): Path<String>,
        headers: AxumHeaders,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        if !authorized(&headers) || channel != CHANNEL {
            return StatusCode::FORBIDDEN.into_response();
        }
        let mut next = mock.next_id.lock().unwrap();
        *next += 1;
        let id = format!("{}", 1000 + *next);
        mock.messages.lock().unwrap().insert(id.clone(), body);
        Json(json!({ "id": id, "channel_id": channel })).into_response()
    }

    async fn edit(
        State(mock): State<Mock>,
        Path((_channel, id)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        match mock.messages.lock().unwrap().get_mut(&id) {
            Some(slot) => {
                *slot = body;
                Json(json!({ "id": id })).into_response()
            }
            None => (StatusCode::NOT_FOUND, "Unknown Message").into_response(),
        }
    }

    async fn remove(
        State(mock): State<Mock>,
        Path((_channel, id)): Path<(String, String)>,
    ) -> StatusCode {
        match mock.messages.lock().unwrap().remove(&id) {
            Some(_) => StatusCode::NO_CONTENT,
            None => StatusCode::NOT_FOUND,
        }
    }

    async fn spawn_mock(mock: Mock) -> String {
        let app = Router::new()
            .route("/users/@me", get(me))
            .route("/channels/{channel}/messages", post(create))
            .route(
                "/channels/{channel}/messages/{id}",
                patch(edit).delete(remove),
            )
            .with_state(mock);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn channel(api_url: String, token: &str) -> DiscordChannel {
        DiscordChannel::new(&DiscordConfig {
            api_url,
            token: token.to_string(),
            channel_id: CHANNEL.to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn notice(title: &str) -> Notification {
        Notification {
            title: title.to_string(),
            body: "Now playing: `de_inferno`".to_string(),
            severity: Severity::MapChanged,
            footer: Some("Dust Public".to_string()),
        }
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = DiscordChannel::new(&DiscordConfig::new("bad\ntoken", CHANNEL)).unwrap_err();
        assert!(matches!(err, SinkError::InvalidToken));
    }

    #[tokio::test]
    async fn current_user_identifies_bot() {
        let url = spawn_mock(Mock::default()).await;

        let user = channel(url.clone(), TOKEN).current_user().await.unwrap();
        assert_eq!(user.username, "watchbot");

        let err = channel(url, "wrong").current_user().await.unwrap_err();
        assert!(matches!(err, SinkError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn create_edit_delete_roundtrip() {
        let mock = Mock::default();
        let chan = channel(spawn_mock(mock.clone()).await, TOKEN);

        let handle = chan.create(&notice("first")).await.unwrap();
        {
            let messages = mock.messages.lock().unwrap();
            let stored = &messages[handle.as_str()];
            assert_eq!(stored["embeds"][0]["title"], "first");
            assert_eq!(stored["embeds"][0]["color"], 0x00ffff);
            assert_eq!(stored["embeds"][0]["footer"]["text"], "Dust Public");
        }

        chan.edit(&handle, &notice("second")).await.unwrap();
        assert_eq!(
            mock.messages.lock().unwrap()[handle.as_str()]["embeds"][0]["title"],
            "second"
        );

        chan.delete(&handle).await.unwrap();
        assert!(mock.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_message_is_not_found() {
        let chan = channel(spawn_mock(Mock::default()).await, TOKEN);
        let gone = MessageHandle::new("999");

        assert!(matches!(
            chan.edit(&gone, &notice("x")).await,
            Err(SinkError::NotFound)
        ));
        assert!(matches!(chan.delete(&gone).await, Err(SinkError::NotFound)));
    }

    #[tokio::test]
    async fn unreachable_api_is_transport_error() {
        let chan = channel("http://127.0.0.1:1".to_string(), TOKEN);
        let err = chan.create(&notice("x")).await.unwrap_err();
        assert!(matches!(err, SinkError::Transport(_)));
    }
}
