//! Judge response normalization.
//!
//! Models wrap JSON in prose and code fences often enough that every
//! fallback here fires in production: strict parse, then brace extraction,
//! then a plain-text scan. `None` means nothing usable was found and the
//! caller applies its error fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use verdict_engine::Judgment;

#[derive(Debug, Deserialize)]
struct RawJudgment {
  #[serde(alias = "isHumanLike")]
  is_human_like: bool,
  confidence: f64,
  #[serde(default)]
  reasoning: String,
  #[serde(default)]
  indicators: Vec<String>,
}

impl From<RawJudgment> for Judgment {
  fn from(raw: RawJudgment) -> Self {
    Judgment {
      is_human_like: raw.is_human_like,
      confidence: raw.confidence.clamp(0.0, 100.0).round() as u8,
      reasoning: raw.reasoning,
      indicators: raw.indicators,
    }
  }
}

/// Parse a judge response into a judgment, tolerating fences, surrounding
/// prose, and (as a last resort) free-text answers.
pub fn parse_judgment(raw: &str) -> Option<Judgment> {
  let stripped = strip_code_fences(raw);

  if let Ok(parsed) = serde_json::from_str::<RawJudgment>(stripped.trim()) {
    return Some(parsed.into());
  }

  if let Some(inner) = extract_braced(&stripped) {
    if let Ok(parsed) = serde_json::from_str::<RawJudgment>(inner) {
      return Some(parsed.into());
    }
  }

  scan_text(raw)
}

/// Drop a leading ```json / ``` fence pair if present.
fn strip_code_fences(raw: &str) -> String {
  let trimmed = raw.trim();
  if !trimmed.starts_with("```") {
    return trimmed.to_string();
  }
  trimmed
    .lines()
    .filter(|line| !line.trim_start().starts_with("```"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// The substring from the first `{` to the last `}`, if both exist.
fn extract_braced(text: &str) -> Option<&str> {
  let start = text.find('{')?;
  let end = text.rfind('}')?;
  if end > start {
    Some(&text[start..=end])
  } else {
    None
  }
}

static CONFIDENCE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"confidence["']?\s*[:=]\s*(\d{1,3})"#).expect("confidence regex is valid")
});

/// Free-text scan: infer polarity from wording, confidence from any
/// `confidence: N` fragment, defaulting to 50.
fn scan_text(raw: &str) -> Option<Judgment> {
  let lower = raw.to_lowercase();

  let is_human_like = if lower.contains("not human") || lower.contains("ai-generated") || lower.contains("ai generated") {
    false
  } else if lower.contains("human") {
    true
  } else {
    return None;
  };

  let confidence = CONFIDENCE
    .captures(&lower)
    .and_then(|c| c[1].parse::<u8>().ok())
    .map(|v| v.min(100))
    .unwrap_or(50);

  Some(Judgment {
    is_human_like,
    confidence,
    reasoning: "recovered from unstructured judge response".to_string(),
    indicators: vec![],
  })
}
