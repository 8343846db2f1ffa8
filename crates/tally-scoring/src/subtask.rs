//! Subtask scoring: named groups of test cases worth fixed points.
//!
//! A group earns its points only when every case matching one of its
//! patterns is accepted. Cases the runner never reached leave the
//! group's contribution uncertain, so the total is tracked as a
//! [`ScoreRange`] rather than a single number.

use async_trait::async_trait;
use globset::GlobSet;
use serde_json::json;
use tracing::debug;

use tally_core::config::SubtaskGroup;
use tally_core::errors::{codes, ConfigError, Diagnostic, DiagnosticSink};
use tally_core::model::{RunResult, Solution, TestCase, Verdict, UNEXPECTED_SCORE_CASE};
use tally_core::score::ScoreRange;
use tally_core::scoring_api::ScoringStrategy;

struct CompiledGroup {
    name: String,
    score: u64,
    matcher: GlobSet,
}

/// Subtask discipline over the declared groups.
///
/// Groups are evaluated in declaration order and independently: a case
/// matching several groups counts toward each of them in full.
pub struct SubtaskScoring {
    groups: Vec<CompiledGroup>,
    expected_score: Option<u64>,
}

impl SubtaskScoring {
    /// Compiles the group patterns up front; an invalid glob refuses
    /// the whole discipline.
    pub fn new(groups: &[SubtaskGroup], expected_score: Option<u64>) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(groups.len());
        for group in groups {
            compiled.push(CompiledGroup {
                name: group.name.clone(),
                score: group.score,
                matcher: group.matcher()?,
            });
        }
        Ok(Self {
            groups: compiled,
            expected_score,
        })
    }

    /// Folds the per-case verdicts into the plausible score range.
    ///
    /// A group counts toward `max` when none of its matching cases
    /// failed, and toward `min` only when additionally none of them is
    /// still pending. A group whose cases are all pending, or that
    /// matches no case at all, passes vacuously. Totals saturate at
    /// the `u64` limit; [`validate_config`] flags declared scores
    /// whose sum would overflow it.
    ///
    /// [`validate_config`]: tally_core::config::validate_config
    fn score_range(&self, result: &RunResult) -> ScoreRange {
        let mut min = 0u64;
        let mut max = 0u64;
        for group in &self.groups {
            let mut accepted = true;
            let mut unknown = false;
            for (case, verdict) in &result.cases {
                if !group.matcher.is_match(case.base_name()) {
                    continue;
                }
                match verdict {
                    Verdict::NotAvailable => unknown = true,
                    Verdict::Accepted => {}
                    _ => accepted = false,
                }
            }
            if accepted {
                max = max.saturating_add(group.score);
                if !unknown {
                    min = min.saturating_add(group.score);
                }
            }
            debug!(group = %group.name, accepted, unknown, "subtask group evaluated");
        }
        ScoreRange::new(min, max)
    }
}

#[async_trait]
impl ScoringStrategy for SubtaskScoring {
    fn name(&self) -> &'static str {
        "subtask"
    }

    async fn finish(
        &self,
        solution: &Solution,
        result: &mut RunResult,
        sink: &mut DiagnosticSink,
    ) -> anyhow::Result<()> {
        let range = self.score_range(result);
        let detail = format!("{}, score {}", result.detail, range);
        if !range.is_exact() {
            sink.push(
                Diagnostic::warning(
                    codes::W_SCORE_RANGE,
                    format!("score for '{}' is only known as a range", solution.name),
                )
                .with_source("subtask")
                .with_context(json!({
                    "solution": solution.name,
                    "min": range.min(),
                    "max": range.max(),
                }))
                .with_fix_step(
                    "Set the keep_going option so every test case runs and the score is exact",
                ),
            );
        }
        match self.expected_score {
            Some(expected) if !range.contains(expected) => {
                let message = if range.is_exact() {
                    format!("expected score {} does not equal to {}", expected, range.min())
                } else {
                    format!(
                        "expected score x = {} does not satisfy {} <= x <= {}",
                        expected,
                        range.min(),
                        range.max()
                    )
                };
                sink.push(
                    Diagnostic::error(codes::E_SCORE_MISMATCH, message)
                        .with_source("subtask")
                        .with_context(json!({
                            "solution": solution.name,
                            "expected": expected,
                            "min": range.min(),
                            "max": range.max(),
                        })),
                );
                result.finalize(
                    false,
                    detail,
                    Some(TestCase::synthetic(UNEXPECTED_SCORE_CASE)),
                    true,
                );
            }
            _ => result.finalize(true, detail, None, true),
        }
        Ok(())
    }
}
