//! Minimal OpenAI-compatible client for question generation.
//!
//! We only call chat.completions and always request a strict JSON object.
//! Calls are instrumented and log model name, latency and token usage.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::domain::GenerationRequest;
use crate::engine::MASTERY_THRESHOLD;
use crate::provider::{GenerateQuestion, GenerationError};
use crate::util::fill_template;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Strict-JSON chat completion. Returns the raw message content; the
  /// provider layer decodes and validates it.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_json_raw(
    &self,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<String, GenerationError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: ResponseFormat { r#type: "json_object".into() },
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "economeester-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| GenerationError::TransportFailure(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Err(GenerationError::TransportFailure(format!("HTTP {}: {}", status, msg)));
    }

    let text = res.text().await
      .map_err(|e| GenerationError::TransportFailure(e.to_string()))?;
    let body: ChatCompletionResponse = serde_json::from_str(&text)
      .map_err(|e| GenerationError::InvalidResponse {
        reason: format!("malformed completion envelope: {e}"),
        payload: text.clone(),
      })?;

    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens,
            total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let content = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(content)
  }
}

#[async_trait]
impl GenerateQuestion for OpenAI {
  /// Render the prompt templates for `request` and run one completion.
  #[instrument(level = "info", skip(self, prompts, request),
               fields(model = %self.model, difficulty = %request.suggested_difficulty))]
  async fn generate(
    &self,
    prompts: &Prompts,
    request: &GenerationRequest,
  ) -> Result<String, GenerationError> {
    let progress = request.correct_answers_in_goal.to_string();
    let threshold = MASTERY_THRESHOLD.to_string();
    let level = request.player_level.to_string();
    let difficulty = request.suggested_difficulty.to_string();
    let user = fill_template(&prompts.question_user_template, &[
      ("learning_goal", request.learning_goal.as_str()),
      ("correct_answers_in_goal", progress.as_str()),
      ("mastery_threshold", threshold.as_str()),
      ("player_level", level.as_str()),
      ("suggested_difficulty", difficulty.as_str()),
    ]);

    let start = std::time::Instant::now();
    let result = self.chat_json_raw(&prompts.question_system, &user, 0.95).await;
    let elapsed = start.elapsed();
    match &result {
      Ok(raw) => info!(?elapsed, response_len = raw.len(), "Model response received"),
      Err(e) => info!(?elapsed, error = %e, "Model call failed during question generation"),
    }
    result
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  response_format: ResponseFormat,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an API error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
