//! Binary entrypoint: read one JSON object from stdin, write one to stdout.
//!
//! Environment:
//! - `ANTHROPIC_API_KEY` (required)
//! - `JUDGE_MODEL` (optional model override)
//! - `JUDGE_ERROR_POLARITY` (`assume-human` | `assume-ai`, default assume-human)
//! - `RUST_LOG` (tracing filter, e.g. `judge_runner=debug`)

use std::io::{self, Read, Write};
use std::sync::Arc;

use judge_runner::{evaluate_pr, ClaudeJudge, ErrorPolarity, EvalConfig, Evaluator, PipelineInput};
use tracing_subscriber::EnvFilter;
use verdict_engine::EngineConfig;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary().await {
    let _ = writeln!(io::stderr(), "judge-runner error: {}", e);
    std::process::exit(1);
  }
}

async fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  // Fail on missing credentials before consuming stdin.
  let judge = ClaudeJudge::from_env()?;

  let mut eval_config = EvalConfig::default();
  if let Ok(polarity) = std::env::var("JUDGE_ERROR_POLARITY") {
    eval_config.error_polarity = match polarity.as_str() {
      "assume-ai" => ErrorPolarity::AssumeAi,
      _ => ErrorPolarity::AssumeHuman,
    };
  }

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: PipelineInput = serde_json::from_str(&raw)?;

  let evaluator = Evaluator::new(Arc::new(judge), eval_config);
  let report = evaluate_pr(&evaluator, &input, &EngineConfig::default()).await;

  let json = serde_json::to_vec(&report)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
