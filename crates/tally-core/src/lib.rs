//! Scoring core for contest testsets.
//!
//! A testset runner executes a solution over its test cases and
//! produces a raw [`RunResult`]: one [`Verdict`] per case plus an
//! overall accept/reject decision. This crate turns that raw result
//! into a scored one. It carries the shared vocabulary (test cases,
//! verdicts, [`ScoreRange`]), the judge output channel for checkers
//! that emit numeric scores, the scoring configuration and its
//! validation, and the [`ScoringStage`] that applies an injected
//! [`ScoringStrategy`] once the run completes.
//!
//! The concrete disciplines (subtask groups, judge-score averaging)
//! live in the `tally-scoring` crate.
//!
//! # Quick start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//!
//! use tally_core::{RunResult, ScoringStage, Solution, TestCase, Verdict};
//! use tokio::sync::oneshot;
//!
//! # async fn example() -> Result<(), tally_core::StageError> {
//! let (tx, rx) = oneshot::channel();
//! let mut cases = BTreeMap::new();
//! cases.insert(TestCase::new("sample-01.in"), Verdict::Accepted);
//! tx.send(RunResult::new(cases, true, "all tests passed")).ok();
//!
//! let stage = ScoringStage::passthrough();
//! let solution = Solution::new("reference", "out/reference");
//! let scored = stage.finish_run(&solution, rx).await?;
//! assert!(scored.result.accepted);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod judge;
pub mod model;
pub mod score;
pub mod scoring_api;

// Re-export the main types
pub use config::{load_config, validate_config, ScoringConfig, SubtaskGroup};
pub use engine::{ScoredRun, ScoringStage, StageError};
pub use errors::{codes, ConfigError, Diagnostic, DiagnosticSink, Severity};
pub use judge::{judge_output_path, read_score, JudgeError, JUDGE_EXT};
pub use model::{
    RunResult, Solution, TestCase, Verdict, JUDGE_ERROR_CASE, UNEXPECTED_SCORE_CASE,
};
pub use score::ScoreRange;
pub use scoring_api::ScoringStrategy;
