//! Structured error types for the judge runner.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgeError {
  #[error("http request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("api error: {status}: {body}")]
  Api { status: u16, body: String },

  #[error("judge call timed out after {seconds}s")]
  Timeout { seconds: u64 },

  #[error("failed to parse judge response: {0}")]
  Parse(String),

  #[error("ANTHROPIC_API_KEY is not set")]
  MissingApiKey,
}
