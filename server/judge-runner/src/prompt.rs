//! Prompt assembly for per-file classification.
//!
//! The instruction text is fixed; only the file-kind context note and the
//! diff vary. Classification is by filename alone.

use verdict_engine::PrContext;

/// Coarse file classes that get different judging context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
  BuildArtifact,
  Documentation,
  Configuration,
  CiWorkflow,
  SourceCode,
}

impl FileKind {
  pub fn classify(filename: &str) -> Self {
    let lower = filename.to_lowercase();

    // CI first: workflow files would otherwise match the config extensions.
    if lower.contains(".github/workflows/")
      || lower.ends_with(".gitlab-ci.yml")
      || lower.contains(".circleci/")
      || lower.ends_with("jenkinsfile")
    {
      return Self::CiWorkflow;
    }

    if lower.ends_with("package-lock.json")
      || lower.ends_with("yarn.lock")
      || lower.ends_with("pnpm-lock.yaml")
      || lower.ends_with("cargo.lock")
      || lower.ends_with("go.sum")
      || lower.ends_with(".min.js")
      || lower.ends_with(".map")
      || lower.starts_with("dist/")
      || lower.contains("/dist/")
      || lower.starts_with("build/")
      || lower.contains("/build/")
    {
      return Self::BuildArtifact;
    }

    if lower.ends_with(".md")
      || lower.ends_with(".rst")
      || lower.ends_with(".txt")
      || lower.starts_with("docs/")
      || lower.contains("/docs/")
      || lower.ends_with("license")
    {
      return Self::Documentation;
    }

    if lower.ends_with(".json")
      || lower.ends_with(".yml")
      || lower.ends_with(".yaml")
      || lower.ends_with(".toml")
      || lower.ends_with(".ini")
      || lower.ends_with(".env")
      || lower.ends_with("dockerfile")
    {
      return Self::Configuration;
    }

    Self::SourceCode
  }

  fn context_note(self) -> &'static str {
    match self {
      Self::BuildArtifact => {
        "This file is a generated build artifact or lockfile. Tool-generated \
         content here says nothing about who authored the PR; judge only \
         whether a human plausibly triggered the change."
      }
      Self::Documentation => {
        "This file is documentation. Weigh prose style: templated section \
         scaffolding and uniformly hedged wording lean AI; typos, informal \
         asides, and uneven formatting lean human."
      }
      Self::Configuration => {
        "This file is configuration. Small targeted edits lean human; broad \
         reorderings with normalized formatting lean AI."
      }
      Self::CiWorkflow => {
        "This file is a CI workflow. Copy-pasted boilerplate is common here \
         for both humans and AI tools; require stronger evidence than usual \
         before leaning either way."
      }
      Self::SourceCode => {
        "This file is source code. Consider naming style, comment register, \
         error-handling uniformity, and whether the diff's scope matches a \
         focused human edit."
      }
    }
  }
}

/// Build the classification prompt for one changed file.
pub fn build_prompt(filename: &str, patch: &str, pr: &PrContext) -> String {
  let kind = FileKind::classify(filename);
  let mut prompt = String::new();

  prompt.push_str(
    "You are judging whether one file change in a GitHub pull request was \
     authored by an AI coding agent or by a human developer.\n\n",
  );
  prompt.push_str(kind.context_note());
  prompt.push_str("\n\n");

  if let Some(title) = &pr.title {
    prompt.push_str(&format!("PR title: {}\n", title));
  }
  prompt.push_str(&format!("File: {}\n\nUnified diff:\n{}\n\n", filename, patch));

  prompt.push_str(
    "Respond with a single JSON object and nothing else:\n\
     {\"is_human_like\": <bool>, \"confidence\": <0-100>, \
     \"reasoning\": <string>, \"indicators\": [<string>...]}\n\
     `confidence` is confidence in your stated `is_human_like` value.",
  );

  prompt
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn workflow_files_classify_as_ci_not_config() {
    assert_eq!(
      FileKind::classify(".github/workflows/release.yml"),
      FileKind::CiWorkflow
    );
    assert_eq!(FileKind::classify("config/app.yml"), FileKind::Configuration);
  }

  #[test]
  fn lockfiles_classify_as_build_artifacts() {
    assert_eq!(
      FileKind::classify("package-lock.json"),
      FileKind::BuildArtifact
    );
    assert_eq!(FileKind::classify("sub/dir/Cargo.lock"), FileKind::BuildArtifact);
  }

  #[test]
  fn unknown_extensions_default_to_source_code() {
    assert_eq!(FileKind::classify("src/main.rs"), FileKind::SourceCode);
    assert_eq!(FileKind::classify("scripts/deploy.sh"), FileKind::SourceCode);
  }

  #[test]
  fn prompt_includes_diff_and_title() {
    let pr = PrContext {
      title: Some("Add retry".to_string()),
      ..PrContext::default()
    };
    let prompt = build_prompt("src/retry.rs", "+ fn retry() {}", &pr);
    assert!(prompt.contains("src/retry.rs"));
    assert!(prompt.contains("+ fn retry() {}"));
    assert!(prompt.contains("PR title: Add retry"));
    assert!(prompt.contains("is_human_like"));
  }
}
