// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text generation client used to refresh menus and workouts.
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. Failures of
//! any kind (connect, HTTP status, malformed body) surface as
//! `AppError::ExternalService` with the raw detail.

use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout; generation can be slow.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Produces free text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Stand-in used when no generator credential is configured.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        Err(AppError::ExternalService(
            "text generation is not configured".to_string(),
        ))
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completion client.
#[derive(Clone)]
pub struct OpenAiGenerator {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: "You are a concise fitness and nutrition assistant.",
                },
                CompletionMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.8,
        };

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            if status.as_u16() == 429 {
                tracing::warn!("Text generation rate limit hit (429)");
            }
            return Err(AppError::ExternalService(format!(
                "HTTP {}: {}",
                status,
                truncate(&body, 300)
            )));
        }

        extract_content(&body)
    }
}

/// Pull the first choice's text out of a completion response body.
fn extract_content(body: &str) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| AppError::ExternalService(format!("malformed response: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(AppError::ExternalService(
            "response contained no text".to_string(),
        ));
    }
    Ok(content)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Build the configured generator, or the disabled one without a key.
pub fn from_config(config: &Config) -> Result<std::sync::Arc<dyn TextGenerator>> {
    match &config.generator_api_key {
        Some(key) => {
            tracing::info!(
                base_url = %config.generator_base_url,
                model = %config.generator_model,
                "Text generation enabled"
            );
            Ok(std::sync::Arc::new(OpenAiGenerator::new(
                &config.generator_base_url,
                key.clone(),
                config.generator_model.clone(),
            )?))
        }
        None => {
            tracing::warn!("GENERATOR_API_KEY not set; content regeneration disabled");
            Ok(std::sync::Arc::new(DisabledGenerator))
        }
    }
}
