//! Telegram Bot API adapter (long polling over HTTPS).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use stockbot_core::ChatUserId;

use super::{ChatTransport, IncomingMessage};
use crate::config::Settings;
use crate::router::{Menu, ParseMode, Reply};

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboard>,
}

#[derive(Debug, Serialize)]
struct ReplyKeyboard {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButton {
    text: &'static str,
}

impl From<Menu> for ReplyKeyboard {
    fn from(menu: Menu) -> Self {
        Self {
            keyboard: menu
                .buttons()
                .iter()
                .map(|row| row.iter().map(|&text| KeyboardButton { text }).collect())
                .collect(),
            resize_keyboard: true,
        }
    }
}

pub struct TelegramTransport {
    client: reqwest::Client,
    /// `{api}/bot{token}`; contains the token, so it is never logged.
    endpoint: String,
    poll_timeout: Duration,
    offset: i64,
}

impl core::fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("endpoint", &"<redacted>")
            .field("poll_timeout", &self.poll_timeout)
            .field("offset", &self.offset)
            .finish()
    }
}

impl TelegramTransport {
    pub fn new(api_base_url: &str, token: &str, poll_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/bot{}", api_base_url.trim_end_matches('/'), token),
            poll_timeout,
            offset: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.api_base_url,
            &settings.bot_token,
            Duration::from_secs(settings.poll_timeout_secs),
        )
    }

    /// Next update id the transport will ask for.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Drop whatever piled up while the bot was offline.
    ///
    /// Returns `true` if a backlog existed.
    pub async fn skip_pending(&mut self) -> anyhow::Result<bool> {
        let request = GetUpdates {
            offset: -1,
            timeout: 0,
            allowed_updates: &["message"],
        };
        let updates: Vec<Update> = self
            .call("getUpdates", &request, REQUEST_GRACE)
            .await
            .context("failed to skip pending updates")?;

        match updates.last() {
            Some(last) => {
                self.offset = last.update_id + 1;
                tracing::info!(offset = self.offset, "skipped pending updates");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> anyhow::Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.endpoint, method))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .with_context(|| format!("telegram {method} request failed"))?;

        let status = response.status();
        let payload: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("telegram {method} returned an unreadable body ({status})"))?;

        if !payload.ok {
            anyhow::bail!(
                "telegram {method} failed ({status}): {}",
                payload.description.unwrap_or_else(|| "no description".to_string())
            );
        }

        payload
            .result
            .with_context(|| format!("telegram {method} returned no result"))
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn poll(&mut self) -> anyhow::Result<Vec<IncomingMessage>> {
        let request = GetUpdates {
            offset: self.offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: &["message"],
        };
        let updates: Vec<Update> = self
            .call("getUpdates", &request, self.poll_timeout + REQUEST_GRACE)
            .await?;

        let mut messages = Vec::with_capacity(updates.len());
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let (Some(from), Some(text)) = (message.from, message.text) else {
                tracing::debug!(update_id = update.update_id, "ignoring non-text update");
                continue;
            };
            messages.push(IncomingMessage {
                chat_id: message.chat.id,
                sender: ChatUserId::new(from.id),
                text,
            });
        }
        Ok(messages)
    }

    async fn send(&self, chat_id: i64, reply: &Reply) -> anyhow::Result<()> {
        let request = SendMessage {
            chat_id,
            text: &reply.text,
            parse_mode: match reply.parse_mode {
                ParseMode::Html => Some("HTML"),
                ParseMode::Plain => None,
            },
            reply_markup: reply.menu.map(ReplyKeyboard::from),
        };

        let _sent: serde_json::Value = self.call("sendMessage", &request, REQUEST_GRACE).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TOKEN: &str = "123:test";

    fn transport(server: &MockServer) -> TelegramTransport {
        TelegramTransport::new(&server.uri(), TOKEN, Duration::from_secs(0))
    }

    #[test]
    fn admin_menu_becomes_keyboard_rows() {
        let keyboard = serde_json::to_value(ReplyKeyboard::from(Menu::Admin)).unwrap();
        assert_eq!(keyboard["resize_keyboard"], json!(true));
        assert_eq!(keyboard["keyboard"].as_array().unwrap().len(), 3);
        assert_eq!(keyboard["keyboard"][0][0]["text"], json!("📋 View stock"));
    }

    #[tokio::test]
    async fn poll_maps_text_messages_and_advances_offset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(body_partial_json(json!({ "offset": 0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [
                    {
                        "update_id": 10,
                        "message": {
                            "message_id": 1,
                            "chat": { "id": 42, "type": "private" },
                            "from": { "id": 7, "is_bot": false, "first_name": "A" },
                            "text": "/start"
                        }
                    },
                    {
                        "update_id": 11,
                        "message": {
                            "message_id": 2,
                            "chat": { "id": 42, "type": "private" },
                            "from": { "id": 7, "is_bot": false, "first_name": "A" },
                            "sticker": {}
                        }
                    },
                    { "update_id": 12, "edited_message": {} }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport = transport(&server);
        let messages = transport.poll().await.unwrap();

        assert_eq!(
            messages,
            vec![IncomingMessage {
                chat_id: 42,
                sender: ChatUserId::new(7),
                text: "/start".to_string(),
            }]
        );
        assert_eq!(transport.offset(), 13);
    }

    #[tokio::test]
    async fn send_attaches_parse_mode_and_keyboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(json!({
                "chat_id": 42,
                "text": "<b>A</b>",
                "parse_mode": "HTML",
                "reply_markup": { "resize_keyboard": true }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": { "message_id": 5 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = Reply::html("<b>A</b>").with_menu(Menu::Guest);
        transport(&server).send(42, &reply).await.unwrap();
    }

    #[tokio::test]
    async fn api_errors_carry_the_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send(1, &Reply::plain("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("chat not found"), "{err:#}");
    }

    #[tokio::test]
    async fn skip_pending_moves_past_backlog() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(body_partial_json(json!({ "offset": -1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [ { "update_id": 99 } ]
            })))
            .mount(&server)
            .await;

        let mut transport = transport(&server);
        assert!(transport.skip_pending().await.unwrap());
        assert_eq!(transport.offset(), 100);
    }
}
