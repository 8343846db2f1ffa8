//! Scoring configuration: the plain declaration a testset ships,
//! its YAML loader and validation.

use std::collections::HashSet;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::errors::{codes, ConfigError, Diagnostic};

fn default_group_score() -> u64 {
    100
}

fn default_input_patterns() -> Vec<String> {
    vec!["*".to_string()]
}

/// A named scoring unit: its points are earned only when every test
/// case matching one of its patterns is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtaskGroup {
    /// Group name, cited in diagnostics.
    pub name: String,
    /// Points awarded when the group fully passes.
    #[serde(default = "default_group_score")]
    pub score: u64,
    /// Glob patterns matched against each case's input base name.
    #[serde(default = "default_input_patterns")]
    pub input_patterns: Vec<String>,
}

impl SubtaskGroup {
    pub fn new(name: impl Into<String>, score: u64, input_patterns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            score,
            input_patterns,
        }
    }

    /// Compiles the group's patterns into one matcher.
    pub fn matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.input_patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                group: self.name.clone(),
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ConfigError::InvalidPattern {
            group: self.name.clone(),
            pattern: self.input_patterns.join(" "),
            message: e.to_string(),
        })
    }
}

/// Scoring declaration for one solution of a testset, loaded once
/// before the scoring stage runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Subtask groups in declaration order. Empty means no subtask
    /// scoring.
    #[serde(default)]
    pub subtask_groups: Vec<SubtaskGroup>,
    /// The checker emits a numeric score per case instead of a bare
    /// verdict.
    #[serde(default)]
    pub scoring_judge: bool,
    /// Declared final score of the solution under test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_score: Option<u64>,
}

/// Loads a scoring configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ScoringConfig =
        serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        subtask_groups = config.subtask_groups.len(),
        scoring_judge = config.scoring_judge,
        "loaded scoring config"
    );
    Ok(config)
}

/// Checks a loaded configuration for declarations that would make
/// scoring misleading. Hard failures (unreadable file, bad YAML, bad
/// glob) come from [`load_config`] and [`SubtaskGroup::matcher`]
/// instead.
pub fn validate_config(config: &ScoringConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();
    for group in &config.subtask_groups {
        if group.name.is_empty() {
            diagnostics.push(
                Diagnostic::error(codes::E_CFG_SCHEMA, "subtask group with empty name")
                    .with_source("config"),
            );
        } else if !seen.insert(group.name.as_str()) {
            diagnostics.push(
                Diagnostic::error(
                    codes::E_CFG_SCHEMA,
                    format!("duplicate subtask group '{}'", group.name),
                )
                .with_source("config")
                .with_context(json!({ "group": group.name })),
            );
        }
        if group.input_patterns.is_empty() {
            diagnostics.push(
                Diagnostic::error(
                    codes::E_CFG_SCHEMA,
                    format!("subtask group '{}' matches no test cases", group.name),
                )
                .with_source("config")
                .with_context(json!({ "group": group.name }))
                .with_fix_step("Declare at least one input pattern, or drop the group"),
            );
        }
        if let Err(e) = group.matcher() {
            diagnostics.push(
                Diagnostic::error(codes::E_CFG_SCHEMA, e.to_string())
                    .with_source("config")
                    .with_context(json!({ "group": group.name })),
            );
        }
    }
    let total = config
        .subtask_groups
        .iter()
        .try_fold(0u64, |total, group| total.checked_add(group.score));
    if total.is_none() {
        diagnostics.push(
            Diagnostic::error(
                codes::E_CFG_SCHEMA,
                "declared subtask scores overflow a 64-bit total",
            )
            .with_source("config")
            .with_fix_step("Lower the group scores so their sum is representable"),
        );
    }
    if config.scoring_judge && !config.subtask_groups.is_empty() {
        diagnostics.push(
            Diagnostic::warning(
                codes::W_CFG_UNUSED,
                "scoring_judge has no effect while subtask groups are declared",
            )
            .with_source("config")
            .with_fix_step("Remove scoring_judge, or remove the subtask groups"),
        );
    }
    diagnostics
}
