//! Engine configuration with sane defaults.
//!
//! All tuning values live here so deployments can swap them without code
//! edits. Sign convention for adjustments: negative pushes toward AI
//! authorship, positive toward human.

/// Tunable adjustments and thresholds for signal extraction + aggregation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
  /// Applied when the PR has no description.
  pub no_description_adjustment: i32,
  /// Applied when every commit subject follows the conventional-commit grammar.
  pub conventional_commits_adjustment: i32,
  /// Applied when the description carries two or more markdown section headers.
  pub structured_description_adjustment: i32,
  /// Applied when the description contains a checkbox task list.
  pub checkbox_list_adjustment: i32,
  /// Applied when the description contains a test-plan section.
  pub test_plan_adjustment: i32,
  /// Applied for a terse fix/update title paired with an empty description.
  pub terse_fix_adjustment: i32,
  /// Minimum commit count before the conventional-commit rule fires.
  pub conventional_commit_min_commits: usize,
  /// AI majority must average strictly above this to win the vote.
  pub confidence_gate: u8,
  /// Summed structural-signal magnitude needed for the non-code special case.
  pub structural_threshold: i32,
  /// Minimum confidence reported for an absolute override.
  pub override_confidence_floor: u8,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      no_description_adjustment: -15,
      conventional_commits_adjustment: -20,
      structured_description_adjustment: -10,
      checkbox_list_adjustment: -10,
      test_plan_adjustment: -10,
      terse_fix_adjustment: 15,
      conventional_commit_min_commits: 3,
      confidence_gate: 75,
      structural_threshold: 20,
      override_confidence_floor: 90,
    }
  }
}
