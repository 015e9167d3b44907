//! Per-file evaluation: bounded concurrency, per-call timeout, and an
//! infallible fallback so one bad judge call never aborts a PR evaluation.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::warn;
use verdict_engine::types::indicators;
use verdict_engine::{FileChange, FileJudgment, Judgment, PrContext};

use crate::error::JudgeError;
use crate::normalize::parse_judgment;
use crate::prompt::build_prompt;
use crate::provider::Judge;

/// Which polarity a failed evaluation falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolarity {
  AssumeHuman,
  AssumeAi,
}

/// Tunables for the evaluation loop.
#[derive(Debug, Clone)]
pub struct EvalConfig {
  /// Files judged concurrently within one batch.
  pub batch_size: usize,
  /// Pause between batches, to stay under provider rate limits.
  pub batch_pause_ms: u64,
  /// Per-call timeout; a timed-out call falls back like any other failure.
  pub call_timeout_secs: u64,
  pub error_polarity: ErrorPolarity,
}

impl Default for EvalConfig {
  fn default() -> Self {
    Self {
      batch_size: 4,
      batch_pause_ms: 500,
      call_timeout_secs: 30,
      error_polarity: ErrorPolarity::AssumeHuman,
    }
  }
}

pub struct Evaluator {
  judge: Arc<dyn Judge>,
  config: EvalConfig,
}

impl Evaluator {
  pub fn new(judge: Arc<dyn Judge>, config: EvalConfig) -> Self {
    Self { judge, config }
  }

  pub fn with_defaults(judge: Arc<dyn Judge>) -> Self {
    Self::new(judge, EvalConfig::default())
  }

  /// Judge one file. Never returns an error: failures degrade to the
  /// configured fallback polarity at confidence 50, tagged for discovery.
  pub async fn evaluate_file(&self, file: &FileChange, pr: &PrContext) -> Judgment {
    if file.patch.trim().is_empty() {
      return Judgment {
        is_human_like: true,
        confidence: 50,
        reasoning: "empty patch, nothing to judge".to_string(),
        indicators: vec![],
      };
    }

    let prompt = build_prompt(&file.filename, &file.patch, pr);
    let timeout = Duration::from_secs(self.config.call_timeout_secs);

    let raw = match tokio::time::timeout(timeout, self.judge.judge(&prompt)).await {
      Ok(Ok(text)) => text,
      Ok(Err(e)) => {
        warn!("judge call failed for {}: {}", file.filename, e);
        return self.fallback(format!("judge call failed: {}", e));
      }
      Err(_) => {
        let e = JudgeError::Timeout {
          seconds: self.config.call_timeout_secs,
        };
        warn!("judge call failed for {}: {}", file.filename, e);
        return self.fallback(format!("judge call failed: {}", e));
      }
    };

    match parse_judgment(&raw) {
      Some(judgment) => judgment,
      None => {
        warn!("unusable judge response for {}", file.filename);
        self.fallback("judge response could not be parsed".to_string())
      }
    }
  }

  /// Judge every file, batch by batch. Output order matches input order
  /// even though calls within a batch race.
  pub async fn evaluate_files(&self, files: &[FileChange], pr: &PrContext) -> Vec<FileJudgment> {
    let batch_size = self.config.batch_size.max(1);
    let mut indexed: Vec<(usize, FileJudgment)> = Vec::with_capacity(files.len());

    for (batch_index, batch) in files.chunks(batch_size).enumerate() {
      if batch_index > 0 && self.config.batch_pause_ms > 0 {
        tokio::time::sleep(Duration::from_millis(self.config.batch_pause_ms)).await;
      }

      let batch_results: Vec<(usize, FileJudgment)> = stream::iter(batch.iter().enumerate())
        .map(|(i, file)| async move {
          let judgment = self.evaluate_file(file, pr).await;
          (
            batch_index * batch_size + i,
            FileJudgment {
              filename: file.filename.clone(),
              judgment,
            },
          )
        })
        .buffer_unordered(batch_size)
        .collect()
        .await;

      indexed.extend(batch_results);
    }

    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, fj)| fj).collect()
  }

  fn fallback(&self, reason: String) -> Judgment {
    Judgment {
      is_human_like: matches!(self.config.error_polarity, ErrorPolarity::AssumeHuman),
      confidence: 50,
      reasoning: reason,
      indicators: vec![indicators::EVALUATION_ERROR.to_string()],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;

  /// Scripted judge: answers with a fixed body, or fails every call.
  struct StubJudge {
    response: Option<String>,
  }

  #[async_trait]
  impl Judge for StubJudge {
    async fn judge(&self, _prompt: &str) -> Result<String, JudgeError> {
      match &self.response {
        Some(r) => Ok(r.clone()),
        None => Err(JudgeError::Api {
          status: 529,
          body: "overloaded".to_string(),
        }),
      }
    }
  }

  fn change(filename: &str, patch: &str) -> FileChange {
    FileChange {
      filename: filename.to_string(),
      patch: patch.to_string(),
    }
  }

  fn human_judge() -> Arc<dyn Judge> {
    Arc::new(StubJudge {
      response: Some(
        r#"{"is_human_like": true, "confidence": 80, "reasoning": "uneven", "indicators": []}"#
          .to_string(),
      ),
    })
  }

  #[tokio::test]
  async fn empty_patch_skips_the_judge() {
    let evaluator = Evaluator::with_defaults(Arc::new(StubJudge { response: None }));
    let j = evaluator
      .evaluate_file(&change("src/a.rs", "   "), &PrContext::default())
      .await;
    // The failing judge was never called.
    assert!(j.is_human_like);
    assert_eq!(j.confidence, 50);
    assert!(j.indicators.is_empty());
  }

  #[tokio::test]
  async fn judge_failure_falls_back_with_error_tag() {
    let evaluator = Evaluator::with_defaults(Arc::new(StubJudge { response: None }));
    let j = evaluator
      .evaluate_file(&change("src/a.rs", "+ line"), &PrContext::default())
      .await;
    assert!(j.is_human_like);
    assert_eq!(j.confidence, 50);
    assert!(j.indicators.iter().any(|t| t == indicators::EVALUATION_ERROR));
  }

  #[tokio::test]
  async fn assume_ai_polarity_flips_the_fallback() {
    let config = EvalConfig {
      error_polarity: ErrorPolarity::AssumeAi,
      ..EvalConfig::default()
    };
    let evaluator = Evaluator::new(Arc::new(StubJudge { response: None }), config);
    let j = evaluator
      .evaluate_file(&change("src/a.rs", "+ line"), &PrContext::default())
      .await;
    assert!(!j.is_human_like);
    assert_eq!(j.confidence, 50);
  }

  #[tokio::test]
  async fn unparseable_response_falls_back() {
    let evaluator = Evaluator::with_defaults(Arc::new(StubJudge {
      response: Some("I refuse to answer.".to_string()),
    }));
    let j = evaluator
      .evaluate_file(&change("src/a.rs", "+ line"), &PrContext::default())
      .await;
    assert!(j.indicators.iter().any(|t| t == indicators::EVALUATION_ERROR));
  }

  #[tokio::test]
  async fn output_order_matches_input_order() {
    let evaluator = Evaluator::with_defaults(human_judge());
    let files = vec![
      change("src/a.rs", "+ a"),
      change("src/b.rs", "+ b"),
      change("src/c.rs", "+ c"),
      change("src/d.rs", "+ d"),
      change("src/e.rs", "+ e"),
    ];
    let out = evaluator.evaluate_files(&files, &PrContext::default()).await;
    let names: Vec<&str> = out.iter().map(|fj| fj.filename.as_str()).collect();
    assert_eq!(names, vec!["src/a.rs", "src/b.rs", "src/c.rs", "src/d.rs", "src/e.rs"]);
  }

  #[tokio::test]
  async fn zero_batch_size_still_makes_progress() {
    let config = EvalConfig {
      batch_size: 0,
      batch_pause_ms: 0,
      ..EvalConfig::default()
    };
    let evaluator = Evaluator::new(human_judge(), config);
    let out = evaluator
      .evaluate_files(&[change("src/a.rs", "+ a")], &PrContext::default())
      .await;
    assert_eq!(out.len(), 1);
  }
}
