//! Evaluation report assembly: stable ids and the check-run payload.

use chrono::Utc;
use serde::Serialize;
use verdict_engine::{FileChange, FileJudgment, Judgment};

/// Stable id for one evaluation, derived from the change set alone so the
/// same diff always maps to the same id.
pub fn evaluation_id(files: &[FileChange]) -> String {
  let mut hasher = blake3::Hasher::new();
  for f in files {
    hasher.update(f.filename.as_bytes());
    hasher.update(b"|");
    hasher.update(f.patch.as_bytes());
    hasher.update(b"\n");
  }
  let hex = hasher.finalize().to_hex();
  format!("eval-{}", &hex.as_str()[..16])
}

/// GitHub check-run payload: `success` means AI authorship was detected.
#[derive(Debug, Serialize)]
pub struct CheckRun {
  pub status: String,
  pub conclusion: String,
  pub completed_at: String,
  pub summary: String,
}

/// Final output of one PR evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
  pub evaluation_id: String,
  pub verdict: Judgment,
  pub file_judgments: Vec<FileJudgment>,
  pub check_run: CheckRun,
}

pub fn assemble_report(
  files: &[FileChange],
  verdict: Judgment,
  file_judgments: Vec<FileJudgment>,
) -> EvaluationReport {
  let conclusion = if verdict.is_human_like {
    "failure"
  } else {
    "success"
  };
  let label = if verdict.is_human_like {
    "human-authored"
  } else {
    "AI-authored"
  };
  let summary = format!(
    "{} (confidence {}, {} file(s) evaluated): {}",
    label,
    verdict.confidence,
    file_judgments.len(),
    verdict.reasoning
  );

  EvaluationReport {
    evaluation_id: evaluation_id(files),
    check_run: CheckRun {
      status: "completed".to_string(),
      conclusion: conclusion.to_string(),
      completed_at: Utc::now().to_rfc3339(),
      summary,
    },
    verdict,
    file_judgments,
  }
}
