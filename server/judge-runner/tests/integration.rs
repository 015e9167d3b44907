//! Integration tests for the judge runner pipeline, driven by scripted
//! judges so no network is involved.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use judge_runner::{evaluate_pr, EvalConfig, Evaluator, Judge, JudgeError, PipelineInput};
use verdict_engine::EngineConfig;

/// Answers per filename substring; any unmatched prompt fails the call.
struct ScriptedJudge {
  responses: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl Judge for ScriptedJudge {
  async fn judge(&self, prompt: &str) -> Result<String, JudgeError> {
    for (needle, response) in &self.responses {
      if prompt.contains(needle) {
        return Ok((*response).to_string());
      }
    }
    Err(JudgeError::Api {
      status: 500,
      body: "no scripted response".to_string(),
    })
  }
}

fn evaluator(responses: HashMap<&'static str, &'static str>) -> Evaluator {
  let config = EvalConfig {
    batch_pause_ms: 0,
    ..EvalConfig::default()
  };
  Evaluator::new(Arc::new(ScriptedJudge { responses }), config)
}

fn input(json: &str) -> PipelineInput {
  serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn end_to_end_ai_pr_concludes_success() {
  let mut responses = HashMap::new();
  responses.insert(
    "src/api.rs",
    r#"{"is_human_like": false, "confidence": 85, "reasoning": "uniform doc comments", "indicators": ["verbose-naming-patterns"]}"#,
  );
  responses.insert(
    "src/db.rs",
    r#"{"is_human_like": false, "confidence": 80, "reasoning": "templated error handling", "indicators": ["verbose-naming-patterns"]}"#,
  );
  responses.insert(
    "src/util.rs",
    r#"{"is_human_like": true, "confidence": 55, "reasoning": "small focused edit", "indicators": []}"#,
  );

  let input = input(
    r###"{
    "files": [
      {"filename": "src/api.rs", "patch": "+ pub fn list() {}"},
      {"filename": "src/db.rs", "patch": "+ pub fn query() {}"},
      {"filename": "src/util.rs", "patch": "+ fn helper() {}"}
    ],
    "pr_context": {
      "title": "feat: add list endpoint",
      "description": "## Summary\nAdds the endpoint.\n\n## Test Plan\n- [x] unit tests",
      "commit_messages": ["feat: add endpoint", "test: cover endpoint", "docs: endpoint notes"]
    }
  }"###,
  );

  let report = evaluate_pr(&evaluator(responses), &input, &EngineConfig::default()).await;

  assert!(!report.verdict.is_human_like);
  assert_eq!(report.file_judgments.len(), 3);
  assert_eq!(report.check_run.status, "completed");
  assert_eq!(report.check_run.conclusion, "success");
  assert!(report.evaluation_id.starts_with("eval-"));
  assert!(report
    .verdict
    .indicators
    .iter()
    .any(|t| t == "perfect-conventional-commits"));
}

#[tokio::test]
async fn end_to_end_human_pr_concludes_failure() {
  let mut responses = HashMap::new();
  responses.insert(
    "src/retry.rs",
    r#"{"is_human_like": true, "confidence": 80, "reasoning": "uneven spacing, local idiom", "indicators": []}"#,
  );

  let input = input(
    r#"{
    "files": [
      {"filename": "src/retry.rs", "patch": "+ // retry once\n+ attempt += 1;"}
    ],
    "pr_context": {
      "title": "Handle flaky uploads",
      "description": "Uploads died on the first reset. Retries once with jitter.",
      "commit_messages": ["retry uploads on reset"]
    }
  }"#,
  );

  let report = evaluate_pr(&evaluator(responses), &input, &EngineConfig::default()).await;

  assert!(report.verdict.is_human_like);
  assert_eq!(report.check_run.conclusion, "failure");
  assert!(report.check_run.summary.contains("human-authored"));
}

#[tokio::test]
async fn claude_signature_in_commits_overrides_human_files() {
  let mut responses = HashMap::new();
  responses.insert(
    "src/gen.rs",
    r#"{"is_human_like": true, "confidence": 95, "reasoning": "reads naturally", "indicators": []}"#,
  );

  let input = input(
    r#"{
    "files": [
      {"filename": "src/gen.rs", "patch": "+ pub fn generate() {}"}
    ],
    "pr_context": {
      "title": "Add generator",
      "description": "Adds the generator module.",
      "commit_messages": ["Add generator\n\nCo-Authored-By: Claude <noreply@anthropic.com>"]
    }
  }"#,
  );

  let report = evaluate_pr(&evaluator(responses), &input, &EngineConfig::default()).await;

  assert!(!report.verdict.is_human_like);
  assert!(report.verdict.confidence >= 90);
  assert_eq!(report.check_run.conclusion, "success");
  assert!(report
    .verdict
    .indicators
    .iter()
    .any(|t| t == "claude-code-signature"));
}

#[tokio::test]
async fn failed_judge_calls_degrade_not_abort() {
  // Only one of two files has a scripted response; the other falls back.
  let mut responses = HashMap::new();
  responses.insert(
    "src/ok.rs",
    r#"{"is_human_like": true, "confidence": 75, "reasoning": "fine", "indicators": []}"#,
  );

  let input = input(
    r#"{
    "files": [
      {"filename": "src/ok.rs", "patch": "+ ok"},
      {"filename": "src/broken.rs", "patch": "+ broken"}
    ],
    "pr_context": {
      "title": "Tweak both modules",
      "description": "Small adjustments found during review."
    }
  }"#,
  );

  let report = evaluate_pr(&evaluator(responses), &input, &EngineConfig::default()).await;

  assert_eq!(report.file_judgments.len(), 2);
  assert!(report
    .verdict
    .indicators
    .iter()
    .any(|t| t == "evaluation-error"));
  assert!(report.verdict.reasoning.contains("evaluation(s) failed"));
}

#[tokio::test]
async fn report_ids_are_stable_across_runs() {
  let responses: HashMap<&'static str, &'static str> = [(
    "src/a.rs",
    r#"{"is_human_like": true, "confidence": 70, "reasoning": "r", "indicators": []}"#,
  )]
  .into_iter()
  .collect();

  let json = r#"{
    "files": [{"filename": "src/a.rs", "patch": "+ a"}],
    "pr_context": {"title": "Adjust thing", "description": "Small change."}
  }"#;

  let r1 = evaluate_pr(&evaluator(responses.clone()), &input(json), &EngineConfig::default()).await;
  let r2 = evaluate_pr(&evaluator(responses), &input(json), &EngineConfig::default()).await;
  assert_eq!(r1.evaluation_id, r2.evaluation_id);
}
