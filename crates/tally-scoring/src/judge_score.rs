//! Judge-score averaging: a checker that grades each case numerically.
//!
//! The final score is the truncating integer mean of the per-case
//! judge scores. Reading runs in deterministic case order and stops at
//! the first unreadable judge output, which rejects the run outright.
//! A total that will not fit in a `u64` counts as unreadable.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use tally_core::errors::{codes, Diagnostic, DiagnosticSink};
use tally_core::judge::{self, JudgeError};
use tally_core::model::{
    RunResult, Solution, TestCase, JUDGE_ERROR_CASE, UNEXPECTED_SCORE_CASE,
};
use tally_core::scoring_api::ScoringStrategy;

/// Judge-score discipline.
///
/// Only an accepted raw result is scored; a rejection from the runner
/// stands untouched, judge outputs unread.
pub struct JudgeScoring {
    expected_score: Option<u64>,
}

impl JudgeScoring {
    pub fn new(expected_score: Option<u64>) -> Self {
        Self { expected_score }
    }
}

#[async_trait]
impl ScoringStrategy for JudgeScoring {
    fn name(&self) -> &'static str {
        "judge-score"
    }

    async fn finish(
        &self,
        solution: &Solution,
        result: &mut RunResult,
        sink: &mut DiagnosticSink,
    ) -> anyhow::Result<()> {
        if !result.is_accepted() {
            debug!(solution = %solution.name, "raw result already rejected; judge outputs unread");
            return Ok(());
        }
        let mut sum = 0u64;
        let mut failed = false;
        for case in result.cases.keys() {
            let path = judge::judge_output_path(&solution.out_dir, case);
            let score = match judge::read_score(&path) {
                Ok(score) => score,
                Err(err) => {
                    let code = match err {
                        JudgeError::Silent { .. } => codes::E_JUDGE_SILENT,
                        JudgeError::Format { .. } => codes::E_JUDGE_FORMAT,
                    };
                    sink.push(
                        Diagnostic::error(code, err.to_string())
                            .with_source("judge-score")
                            .with_context(json!({
                                "solution": solution.name,
                                "testcase": case.base_name(),
                            })),
                    );
                    failed = true;
                    break;
                }
            };
            sum = match sum.checked_add(score) {
                Some(total) => total,
                None => {
                    sink.push(
                        Diagnostic::error(
                            codes::E_JUDGE_FORMAT,
                            "the judge scores overflow a 64-bit total",
                        )
                        .with_source("judge-score")
                        .with_context(json!({
                            "solution": solution.name,
                            "testcase": case.base_name(),
                        })),
                    );
                    failed = true;
                    break;
                }
            };
        }
        if failed {
            let detail = result.detail.clone();
            result.finalize(false, detail, Some(TestCase::synthetic(JUDGE_ERROR_CASE)), true);
            return Ok(());
        }
        let count = result.cases.len() as u64;
        let score = if count == 0 { 0 } else { sum / count };
        let detail = format!("{}, score {}", result.detail, score);
        match self.expected_score {
            // A declared expectation of zero is treated as no expectation.
            Some(expected) if expected != 0 && expected != score => {
                sink.push(
                    Diagnostic::error(
                        codes::E_SCORE_MISMATCH,
                        format!("expected score {expected} does not equal to {score}"),
                    )
                    .with_source("judge-score")
                    .with_context(json!({
                        "solution": solution.name,
                        "expected": expected,
                        "score": score,
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
