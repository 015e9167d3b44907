//! Verdict Engine — PR authorship classification core (V1).
//!
//! Folds per-file authorship judgments and PR-level metadata signals into a
//! single verdict: was this pull request written by an AI coding agent or a
//! human? Deterministic and rule-based.
//!
//! No AI, no DB, no network; pure computation.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod signals;
pub mod types;

pub use aggregate::aggregate;
pub use config::EngineConfig;
pub use error::EngineError;
pub use signals::{extract_signals, SignalReport};
pub use types::{FileChange, FileJudgment, Input, Judgment, PrContext, Verdict};

/// Run the engine on parsed input with default config (no I/O).
pub fn run(input: &Input) -> Result<Verdict, EngineError> {
  run_with_config(input, &EngineConfig::default())
}

/// Run the engine with an explicit config.
pub fn run_with_config(input: &Input, config: &EngineConfig) -> Result<Verdict, EngineError> {
  validate(input)?;
  let signals = extract_signals(&input.pr_context, config);
  let verdict = aggregate(&input.file_judgments, &signals, config);
  Ok(Verdict {
    verdict,
    file_judgments: input.file_judgments.clone(),
  })
}

fn validate(input: &Input) -> Result<(), EngineError> {
  for fj in &input.file_judgments {
    if fj.filename.is_empty() {
      return Err(EngineError::validation("filename", "must not be empty"));
    }
    if fj.judgment.confidence > 100 {
      return Err(EngineError::validation(
        "confidence",
        "must be in range 0..=100",
      ));
    }
  }
  Ok(())
}
