//! Judge Runner — PR authorship evaluation pipeline.
//!
//! Fans each changed file out to the LLM judge under bounded concurrency,
//! folds the judgments through the verdict engine, and assembles the final
//! evaluation report with its check-run payload.

pub mod claude;
pub mod error;
pub mod evaluator;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod report;

pub use claude::ClaudeJudge;
pub use error::JudgeError;
pub use evaluator::{ErrorPolarity, EvalConfig, Evaluator};
pub use provider::Judge;
pub use report::{assemble_report, evaluation_id, EvaluationReport};

use serde::Deserialize;
use verdict_engine::{aggregate, extract_signals, EngineConfig, FileChange, PrContext};

/// Input: one JSON object from the caller.
#[derive(Debug, Deserialize)]
pub struct PipelineInput {
  pub files: Vec<FileChange>,
  #[serde(default)]
  pub pr_context: PrContext,
}

/// Evaluate a whole PR: judge every file, then fold into one verdict.
pub async fn evaluate_pr(
  evaluator: &Evaluator,
  input: &PipelineInput,
  engine_config: &EngineConfig,
) -> EvaluationReport {
  let file_judgments = evaluator.evaluate_files(&input.files, &input.pr_context).await;
  let signals = extract_signals(&input.pr_context, engine_config);
  let verdict = aggregate(&file_judgments, &signals, engine_config);
  assemble_report(&input.files, verdict, file_judgments)
}
