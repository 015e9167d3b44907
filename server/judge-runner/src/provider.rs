//! The judge seam: anything that can take a prompt and answer with text.

use async_trait::async_trait;

use crate::error::JudgeError;

/// Trait for judge backends. The evaluator only sees this surface, so tests
/// swap in scripted judges without any network.
#[async_trait]
pub trait Judge: Send + Sync {
  /// Send one classification prompt and return the raw response text.
  async fn judge(&self, prompt: &str) -> Result<String, JudgeError>;
}
