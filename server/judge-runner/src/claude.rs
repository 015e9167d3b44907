//! Anthropic messages API backend for the judge seam.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::JudgeError;
use crate::provider::Judge;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

pub struct ClaudeJudge {
  client: reqwest::Client,
  api_key: String,
  model: String,
  max_tokens: u32,
}

impl ClaudeJudge {
  pub fn new(api_key: String, model: String) -> Self {
    Self {
      client: reqwest::Client::new(),
      api_key,
      model,
      max_tokens: 1024,
    }
  }

  /// Build from environment: `ANTHROPIC_API_KEY` (required), `JUDGE_MODEL`
  /// (optional override).
  pub fn from_env() -> Result<Self, JudgeError> {
    let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| JudgeError::MissingApiKey)?;
    let model = std::env::var("JUDGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    Ok(Self::new(api_key, model))
  }
}

#[async_trait]
impl Judge for ClaudeJudge {
  async fn judge(&self, prompt: &str) -> Result<String, JudgeError> {
    // Temperature 0 keeps repeat evaluations of the same diff stable.
    let body = json!({
      "model": self.model,
      "max_tokens": self.max_tokens,
      "temperature": 0.0,
      "messages": [{"role": "user", "content": prompt}],
    });

    debug!("judge request to {} (model {})", API_URL, self.model);

    let response = self
      .client
      .post(API_URL)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", "2023-06-01")
      .header("Content-Type", "application/json")
      .json(&body)
      .send()
      .await?;

    let status = response.status().as_u16();
    if status != 200 {
      let body = response.text().await.unwrap_or_default();
      return Err(JudgeError::Api { status, body });
    }

    let resp: serde_json::Value = response.json().await?;
    let text = resp["content"][0]["text"]
      .as_str()
      .ok_or_else(|| JudgeError::Parse("missing content[0].text".into()))?
      .to_string();

    Ok(text)
  }
}
