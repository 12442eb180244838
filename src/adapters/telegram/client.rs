//! HTTP client for the Telegram Bot API.
//!
//! Requests go through a shared `governor` rate limiter so bursts of
//! edit jobs stay under the per-bot request budget.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{ApiResponse, EditMessageTextRequest, EditResult, SendMessageRequest, SentMessage};
use crate::domain::models::TelegramConfig;
use crate::domain::ports::{ChatClient, ChatError};

const NOT_MODIFIED_MARKER: &str = "message is not modified";

#[derive(Clone)]
pub struct TelegramChatClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl TelegramChatClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.bot_token.clone(),
            config.requests_per_second,
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ChatError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let token = self.token.as_deref().ok_or(ChatError::MissingToken)?;
        self.limiter.until_ready().await;

        let url = format!("{}/bot{}/{}", self.base_url, token, method);
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) => {
                return Err(ChatError::Api {
                    code: status.as_u16(),
                    description: text,
                })
            }
        };

        if !envelope.ok {
            let description = envelope.description.unwrap_or_default();
            if description.contains(NOT_MODIFIED_MARKER) {
                return Err(ChatError::NotModified);
            }
            tracing::debug!(method, code = status.as_u16(), %description, "bot api call rejected");
            return Err(ChatError::Api {
                code: envelope.error_code.unwrap_or(status.as_u16()),
                description,
            });
        }

        envelope.result.ok_or_else(|| ChatError::Api {
            code: status.as_u16(),
            description: format!("{method} returned no result"),
        })
    }
}

#[async_trait]
impl ChatClient for TelegramChatClient {
    async fn edit_message(&self, chat_id: &str, message_id: i64, text: &str) -> Result<(), ChatError> {
        let body = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
        };
        let _: EditResult = self.call("editMessageText", &body).await?;
        Ok(())
    }

    async fn post_message(&self, chat_id: &str, text: &str) -> Result<i64, ChatError> {
        let body = SendMessageRequest { chat_id, text };
        let sent: SentMessage = self.call("sendMessage", &body).await?;
        Ok(sent.message_id)
    }
}
