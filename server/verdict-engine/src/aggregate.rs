//! Decision aggregation: fold per-file judgments and PR-level signals into
//! one verdict, in strict precedence order.
//!
//! 1. Absolute override (explicit AI-tool attribution, file- or PR-level).
//! 2. Non-code special case (no usable file indicators, strong structure).
//! 3. Majority vote over files with a confidence gate.
//! 4. PR-context correction, which may flip a non-absolute polarity.
//! 5. Reasoning string + deduplicated indicator union.

use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::signals::SignalReport;
use crate::types::{indicators, FileJudgment, Judgment};

/// Fold per-file judgments and PR-level signals into the aggregate verdict.
///
/// Pure and order-independent over `files`; calling twice with the same
/// inputs yields identical output.
pub fn aggregate(
  files: &[FileJudgment],
  signals: &SignalReport,
  config: &EngineConfig,
) -> Judgment {
  let union = indicator_union(files, signals);
  let error_count = files
    .iter()
    .filter(|f| {
      f.judgment
        .indicators
        .iter()
        .any(|t| t == indicators::EVALUATION_ERROR)
    })
    .count();

  // Step 1: absolute override. Checked first and never weakened; the
  // PR-context correction below is unreachable once this fires.
  let file_absolute = files
    .iter()
    .flat_map(|f| f.judgment.indicators.iter())
    .find(|t| indicators::is_absolute(t));
  let pr_absolute = signals
    .indicators
    .iter()
    .find(|t| indicators::is_absolute(t));
  if let Some(tag) = file_absolute.or(pr_absolute) {
    return finish(
      Judgment {
        is_human_like: false,
        confidence: config.override_confidence_floor,
        reasoning: format!("explicit AI-tool attribution ({}) overrides all other signals", tag),
        indicators: union,
      },
      error_count,
    );
  }

  // Step 2: non-code special case. File judgments with no indicators are
  // uninformative (licenses, docs, config churn); source confidence from
  // the PR-level structural score instead of the file average.
  let files_uninformative = files.iter().all(|f| f.judgment.indicators.is_empty());
  if files_uninformative && signals.structural_score >= config.structural_threshold {
    let confidence = (50 + signals.structural_score).clamp(0, 100) as u8;
    return finish(
      Judgment {
        is_human_like: false,
        confidence,
        reasoning: format!(
          "file judgments carried no usable indicators; structural PR signals (score {}) indicate AI authorship",
          signals.structural_score
        ),
        indicators: union,
      },
      error_count,
    );
  }

  // Step 3: majority vote with confidence gate.
  let ai_count = files.iter().filter(|f| !f.judgment.is_human_like).count();
  let human_count = files.len() - ai_count;
  let ai_avg = average_confidence(files, false);
  let human_avg = average_confidence(files, true);

  let ai_wins = ai_count > human_count && ai_avg > i32::from(config.confidence_gate);
  let (polarity_human, raw_confidence, vote_detail) = if ai_wins {
    (
      false,
      ai_avg,
      format!(
        "{} of {} file judgments lean AI with average confidence {}",
        ai_count,
        files.len(),
        ai_avg
      ),
    )
  } else {
    // Default human: tie, human majority, or AI majority under the gate.
    let confidence = if human_count > 0 {
      human_avg
    } else if ai_count > 0 {
      100 - ai_avg
    } else {
      50
    };
    (
      true,
      confidence,
      format!(
        "{} of {} file judgments lean AI (gate {}); defaulting to human",
        ai_count,
        files.len(),
        config.confidence_gate
      ),
    )
  };

  // Step 4: PR-context correction on a single human-ness scale, so a large
  // adjustment can flip a borderline verdict. Confidence is recomputed
  // relative to the final polarity, never copied across a flip.
  let human_score = if polarity_human {
    raw_confidence
  } else {
    100 - raw_confidence
  };
  let adjusted = (human_score + signals.confidence_adjustment).clamp(0, 100);
  let final_human = adjusted >= 50;
  let final_confidence = if final_human {
    adjusted as u8
  } else {
    (100 - adjusted) as u8
  };

  let mut reasoning = vote_detail;
  if signals.confidence_adjustment != 0 {
    reasoning.push_str(&format!(
      "; PR-level signals adjusted confidence by {:+}",
      signals.confidence_adjustment
    ));
  }
  if final_human != polarity_human {
    reasoning.push_str("; PR-context signals flipped the file-level verdict");
  }

  finish(
    Judgment {
      is_human_like: final_human,
      confidence: final_confidence,
      reasoning,
      indicators: union,
    },
    error_count,
  )
}

/// Average confidence of judgments with the given polarity, or 0 if none.
fn average_confidence(files: &[FileJudgment], human: bool) -> i32 {
  let matching: Vec<i32> = files
    .iter()
    .filter(|f| f.judgment.is_human_like == human)
    .map(|f| i32::from(f.judgment.confidence))
    .collect();
  if matching.is_empty() {
    return 0;
  }
  matching.iter().sum::<i32>() / matching.len() as i32
}

/// Union of file-level and PR-level tags, deduplicated and sorted.
fn indicator_union(files: &[FileJudgment], signals: &SignalReport) -> Vec<String> {
  let mut set = BTreeSet::new();
  for f in files {
    for tag in &f.judgment.indicators {
      set.insert(tag.clone());
    }
  }
  for tag in &signals.indicators {
    set.insert(tag.clone());
  }
  set.into_iter().collect()
}

/// Append the evaluation-error note so degraded runs stay discoverable.
fn finish(mut judgment: Judgment, error_count: usize) -> Judgment {
  if error_count > 0 {
    judgment.reasoning.push_str(&format!(
      "; {} file evaluation(s) failed and fell back to defaults",
      error_count
    ));
  }
  judgment
}
