//! Core types for the verdict engine (JSON contracts + indicator vocabulary).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator vocabulary
// ---------------------------------------------------------------------------

/// Fixed vocabulary of indicator tags. Tags ending in `-signature` mark an
/// explicit AI-tool attribution and force the final verdict regardless of
/// every other signal.
pub mod indicators {
  pub const CLAUDE_CODE_SIGNATURE: &str = "claude-code-signature";
  pub const COPILOT_SIGNATURE: &str = "copilot-signature";
  pub const CURSOR_SIGNATURE: &str = "cursor-signature";
  pub const AIDER_SIGNATURE: &str = "aider-signature";
  pub const NO_PR_DESCRIPTION: &str = "no-pr-description";
  pub const PERFECT_CONVENTIONAL_COMMITS: &str = "perfect-conventional-commits";
  pub const STRUCTURED_PR_DESCRIPTION: &str = "structured-pr-description";
  pub const CHECKBOX_TASK_LIST: &str = "checkbox-task-list";
  pub const TEST_PLAN_SECTION: &str = "test-plan-section";
  pub const TERSE_FIX_TITLE: &str = "terse-fix-title";
  pub const EVALUATION_ERROR: &str = "evaluation-error";

  /// Whether a tag forces the final verdict.
  pub fn is_absolute(tag: &str) -> bool {
    tag.ends_with("-signature")
  }
}

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One changed file in a PR: filename plus unified diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
  pub filename: String,
  pub patch: String,
}

/// PR metadata snapshot, captured once at evaluation start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrContext {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub commit_messages: Vec<String>,
  #[serde(default)]
  pub author: Option<String>,
}

// ---------------------------------------------------------------------------
// Judgments
// ---------------------------------------------------------------------------

/// The atomic classification unit, produced per file and as the aggregate.
///
/// `confidence` is confidence in the stated `is_human_like` value, not a
/// standalone probability: `(true, 90)` and `(false, 10)` are different
/// statements. Polarity flips must recompute confidence, never copy it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
  pub is_human_like: bool,
  pub confidence: u8,
  pub reasoning: String,
  #[serde(default)]
  pub indicators: Vec<String>,
}

/// A per-file judgment as it enters aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileJudgment {
  pub filename: String,
  pub judgment: Judgment,
}

// ---------------------------------------------------------------------------
// Binary contract
// ---------------------------------------------------------------------------

/// Input: one JSON object from the harness.
#[derive(Debug, Deserialize)]
pub struct Input {
  pub file_judgments: Vec<FileJudgment>,
  #[serde(default)]
  pub pr_context: PrContext,
}

/// Output: aggregate verdict plus the per-file judgments it folded.
#[derive(Debug, Serialize)]
pub struct Verdict {
  pub verdict: Judgment,
  pub file_judgments: Vec<FileJudgment>,
}
