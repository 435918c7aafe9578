// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound message delivery through a Bot API `sendMessage` endpoint.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Reply, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Pushes a message to one user.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, user: UserId, reply: &Reply) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    callback_data: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API client.
#[derive(Clone)]
pub struct BotApiSender {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl BotApiSender {
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.bot_api_url, config.bot_token.clone())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

fn build_request(user: UserId, reply: &Reply) -> SendMessageRequest<'_> {
    SendMessageRequest {
        chat_id: user.0,
        text: &reply.text,
        reply_markup: reply.keyboard.as_ref().map(|rows| InlineKeyboardMarkup {
            inline_keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: &button.label,
                            callback_data: &button.action,
                        })
                        .collect()
                })
                .collect(),
        }),
    }
}

#[async_trait]
impl MessageSender for BotApiSender {
    async fn send(&self, user: UserId, reply: &Reply) -> Result<()> {
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&build_request(user, reply))
            .send()
            .await
            // The request URL carries the bot token.
            .map_err(|e| AppError::SendFailure(e.without_url().to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!(user_id = %user, "Bot API rate limit hit (429)");
        }

        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();
        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse {
                description: Some(description),
                ..
            }) => Err(AppError::SendFailure(format!("HTTP {}: {}", status, description))),
            _ => Err(AppError::SendFailure(format!("HTTP {}", status))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Button;

    #[test]
    fn test_build_request_with_keyboard() {
        let reply = Reply::with_keyboard(
            "Time to log your meals",
            vec![vec![Button::new("🍽 Nutrition", "nutrition")]],
        );
        let json = serde_json::to_value(build_request(UserId(42), &reply)).unwrap();

        assert_eq!(json["chat_id"], 42);
        assert_eq!(json["text"], "Time to log your meals");
        assert_eq!(
            json["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
            "nutrition"
        );
    }

    #[test]
    fn test_build_request_without_keyboard() {
        let json = serde_json::to_value(build_request(UserId(1), &Reply::text("hi"))).unwrap();
        assert!(json.get("reply_markup").is_none());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_token() {
        let sender =
            BotApiSender::new("http://127.0.0.1:9", "123456:SECRET_TOKEN".to_string()).unwrap();

        let err = sender
            .send(UserId(1), &Reply::text("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SendFailure(_)));
        assert!(!err.to_string().contains("SECRET_TOKEN"), "{}", err);
    }

    #[test]
    fn test_method_url() {
        let sender = BotApiSender::new("https://api.example.org/", "123:abc".to_string()).unwrap();
        assert_eq!(
            sender.method_url("sendMessage"),
            "https://api.example.org/bot123:abc/sendMessage"
        );
    }
}
