//! PR-metadata signal rules: a data-described rule table evaluated uniformly.
//!
//! Pure and deterministic, no I/O. Adjustments are summed here and clamped
//! to the confidence range only by the aggregator.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::EngineConfig;
use crate::types::{indicators, PrContext};

/// One named rule over PR metadata.
pub struct SignalRule {
  pub tag: &'static str,
  pub adjustment: i32,
  /// Forces the final verdict when fired.
  pub absolute: bool,
  /// Counts toward the structural score used by the non-code special case.
  pub structural: bool,
  pub matches: fn(&PrContext, &EngineConfig) -> bool,
}

/// Result of evaluating every rule against one PR.
#[derive(Debug, Clone, Default)]
pub struct SignalReport {
  pub indicators: Vec<String>,
  /// Net adjustment; negative leans AI, positive leans human.
  pub confidence_adjustment: i32,
  /// Summed magnitude of fired structural rules.
  pub structural_score: i32,
  pub absolute: bool,
}

/// The full rule table, with adjustments resolved from config.
pub fn rules(config: &EngineConfig) -> Vec<SignalRule> {
  vec![
    SignalRule {
      tag: indicators::CLAUDE_CODE_SIGNATURE,
      adjustment: 0,
      absolute: true,
      structural: false,
      matches: has_claude_signature,
    },
    SignalRule {
      tag: indicators::COPILOT_SIGNATURE,
      adjustment: 0,
      absolute: true,
      structural: false,
      matches: has_copilot_signature,
    },
    SignalRule {
      tag: indicators::CURSOR_SIGNATURE,
      adjustment: 0,
      absolute: true,
      structural: false,
      matches: has_cursor_signature,
    },
    SignalRule {
      tag: indicators::AIDER_SIGNATURE,
      adjustment: 0,
      absolute: true,
      structural: false,
      matches: has_aider_signature,
    },
    SignalRule {
      tag: indicators::NO_PR_DESCRIPTION,
      adjustment: config.no_description_adjustment,
      absolute: false,
      structural: false,
      matches: |ctx, _| description_is_empty(ctx),
    },
    SignalRule {
      tag: indicators::PERFECT_CONVENTIONAL_COMMITS,
      adjustment: config.conventional_commits_adjustment,
      absolute: false,
      structural: false,
      matches: all_commits_conventional,
    },
    SignalRule {
      tag: indicators::STRUCTURED_PR_DESCRIPTION,
      adjustment: config.structured_description_adjustment,
      absolute: false,
      structural: true,
      matches: has_structured_description,
    },
    SignalRule {
      tag: indicators::CHECKBOX_TASK_LIST,
      adjustment: config.checkbox_list_adjustment,
      absolute: false,
      structural: true,
      matches: has_checkbox_list,
    },
    SignalRule {
      tag: indicators::TEST_PLAN_SECTION,
      adjustment: config.test_plan_adjustment,
      absolute: false,
      structural: true,
      matches: has_test_plan_section,
    },
    SignalRule {
      tag: indicators::TERSE_FIX_TITLE,
      adjustment: config.terse_fix_adjustment,
      absolute: false,
      structural: false,
      matches: has_terse_fix_title,
    },
  ]
}

/// Evaluate every rule; multiple rules may fire, adjustments sum.
pub fn extract_signals(ctx: &PrContext, config: &EngineConfig) -> SignalReport {
  let mut report = SignalReport::default();
  for rule in rules(config) {
    if (rule.matches)(ctx, config) {
      report.indicators.push(rule.tag.to_string());
      report.confidence_adjustment += rule.adjustment;
      if rule.structural {
        report.structural_score += rule.adjustment.abs();
      }
      report.absolute = report.absolute || rule.absolute;
    }
  }
  report
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// All PR metadata text (description + commit messages), lowercased.
fn metadata_text(ctx: &PrContext) -> String {
  let mut text = String::new();
  if let Some(d) = &ctx.description {
    text.push_str(d);
    text.push('\n');
  }
  for msg in &ctx.commit_messages {
    text.push_str(msg);
    text.push('\n');
  }
  text.to_lowercase()
}

fn description_is_empty(ctx: &PrContext) -> bool {
  ctx
    .description
    .as_deref()
    .map_or(true, |d| d.trim().is_empty())
}

fn has_claude_signature(ctx: &PrContext, _config: &EngineConfig) -> bool {
  let text = metadata_text(ctx);
  text.contains("generated with [claude code]")
    || text.contains("\u{1f916} generated with")
    || text.contains("co-authored-by: claude")
}

fn has_copilot_signature(ctx: &PrContext, _config: &EngineConfig) -> bool {
  metadata_text(ctx).contains("co-authored-by: copilot")
}

fn has_cursor_signature(ctx: &PrContext, _config: &EngineConfig) -> bool {
  let text = metadata_text(ctx);
  text.contains("generated by cursor") || text.contains("co-authored-by: cursor")
}

fn has_aider_signature(ctx: &PrContext, _config: &EngineConfig) -> bool {
  metadata_text(ctx)
    .lines()
    .any(|line| line.trim_start().starts_with("aider:"))
}

static CONVENTIONAL_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(feat|fix|chore|docs|style|refactor|test|build|perf|ci)(\(.+\))?: .+")
    .expect("conventional commit regex is valid")
});

/// Every commit subject matches the conventional grammar, for PRs with
/// more than two commits. One or two conventional subjects are common in
/// human PRs; a perfect longer run is not.
fn all_commits_conventional(ctx: &PrContext, config: &EngineConfig) -> bool {
  if ctx.commit_messages.len() < config.conventional_commit_min_commits {
    return false;
  }
  ctx.commit_messages.iter().all(|msg| {
    let subject = msg.lines().next().unwrap_or("");
    CONVENTIONAL_COMMIT.is_match(subject)
  })
}

fn markdown_header_count(description: &str) -> usize {
  description
    .lines()
    .filter(|line| {
      let trimmed = line.trim_start();
      let hashes = trimmed.chars().take_while(|c| *c == '#').count();
      (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ')
    })
    .count()
}

fn has_structured_description(ctx: &PrContext, _config: &EngineConfig) -> bool {
  ctx
    .description
    .as_deref()
    .map_or(false, |d| markdown_header_count(d) >= 2)
}

fn has_checkbox_list(ctx: &PrContext, _config: &EngineConfig) -> bool {
  ctx.description.as_deref().map_or(false, |d| {
    let lower = d.to_lowercase();
    lower.contains("- [ ]") || lower.contains("- [x]")
  })
}

fn has_test_plan_section(ctx: &PrContext, _config: &EngineConfig) -> bool {
  ctx.description.as_deref().map_or(false, |d| {
    d.lines().any(|line| {
      let trimmed = line.trim_start();
      trimmed.starts_with('#') && trimmed.to_lowercase().contains("test plan")
    })
  })
}

/// Terse fix/update title (four words or fewer) with no description reads
/// like a quick human patch.
fn has_terse_fix_title(ctx: &PrContext, _config: &EngineConfig) -> bool {
  if !description_is_empty(ctx) {
    return false;
  }
  let title = match ctx.title.as_deref() {
    Some(t) => t.trim().to_lowercase(),
    None => return false,
  };
  if title.is_empty() || title.split_whitespace().count() > 4 {
    return false;
  }
  title.starts_with("fix")
    || title.starts_with("update")
    || title.starts_with("bump")
    || title.contains("typo")
}
