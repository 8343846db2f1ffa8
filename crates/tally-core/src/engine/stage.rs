//! Scoring runs after execution, not alongside it: the stage awaits
//! the raw [`RunResult`] over a oneshot handoff from the execution
//! task, applies the configured strategy exactly once, and hands the
//! finalized result plus collected diagnostics to the reporting side.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

use crate::errors::{Diagnostic, DiagnosticSink};
use crate::model::{RunResult, Solution};
use crate::scoring_api::ScoringStrategy;

/// Stage-level failures. Scoring outcomes (rejections, mismatches)
/// are not errors; they land on the result and its diagnostics.
#[derive(Debug, Error)]
pub enum StageError {
    /// The execution task went away before delivering a result, so
    /// there is nothing to score.
    #[error("execution task was cancelled before delivering a result")]
    UpstreamCancelled,

    /// The strategy itself faulted.
    #[error("scoring strategy '{name}' failed")]
    Strategy {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Final output of the scoring stage for one solution.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRun {
    pub result: RunResult,
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

/// One scoring pass over a completed test run.
#[derive(Clone, Default)]
pub struct ScoringStage {
    strategy: Option<Arc<dyn ScoringStrategy>>,
}

impl ScoringStage {
    pub fn new(strategy: Option<Arc<dyn ScoringStrategy>>) -> Self {
        Self { strategy }
    }

    /// A stage with no scoring discipline: the raw result passes
    /// through unchanged.
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Awaits the upstream result and applies the scoring discipline.
    ///
    /// A dropped sender means the run was cancelled; the stage skips
    /// scoring entirely and reports [`StageError::UpstreamCancelled`].
    pub async fn finish_run(
        &self,
        solution: &Solution,
        upstream: oneshot::Receiver<RunResult>,
    ) -> Result<ScoredRun, StageError> {
        let mut result = upstream.await.map_err(|_| StageError::UpstreamCancelled)?;
        let mut sink = DiagnosticSink::new();
        if let Some(strategy) = &self.strategy {
            debug!(
                strategy = strategy.name(),
                solution = %solution.name,
                "applying scoring strategy"
            );
            strategy
                .finish(solution, &mut result, &mut sink)
                .await
                .map_err(|source| StageError::Strategy {
                    name: strategy.name(),
                    source,
                })?;
        }
        Ok(ScoredRun {
            result,
            diagnostics: sink.into_diagnostics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TestCase, Verdict};
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct StampScoring;

    #[async_trait]
    impl ScoringStrategy for StampScoring {
        fn name(&self) -> &'static str {
            "stamp"
        }

        async fn finish(
            &self,
            _solution: &Solution,
            result: &mut RunResult,
            _sink: &mut DiagnosticSink,
        ) -> anyhow::Result<()> {
            let detail = format!("{}, stamped", result.detail);
            result.finalize(true, detail, None, true);
            Ok(())
        }
    }

    struct FaultyScoring;

    #[async_trait]
    impl ScoringStrategy for FaultyScoring {
        fn name(&self) -> &'static str {
            "faulty"
        }

        async fn finish(
            &self,
            _solution: &Solution,
            _result: &mut RunResult,
            _sink: &mut DiagnosticSink,
        ) -> anyhow::Result<()> {
            anyhow::bail!("out of disk")
        }
    }

    fn raw_result() -> RunResult {
        let mut cases = BTreeMap::new();
        cases.insert(TestCase::new("a.in"), Verdict::Accepted);
        RunResult::new(cases, true, "ran")
    }

    #[tokio::test]
    async fn passthrough_leaves_result_untouched() {
        let (tx, rx) = oneshot::channel();
        tx.send(raw_result()).ok();
        let solution = Solution::new("ref", "out/ref");
        let scored = ScoringStage::passthrough()
            .finish_run(&solution, rx)
            .await
            .unwrap();
        assert!(scored.result.accepted);
        assert_eq!(scored.result.detail, "ran");
        assert!(!scored.result.is_finalized());
        assert!(scored.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn strategy_rewrites_the_result() {
        let (tx, rx) = oneshot::channel();
        tx.send(raw_result()).ok();
        let solution = Solution::new("ref", "out/ref");
        let stage = ScoringStage::new(Some(Arc::new(StampScoring)));
        let scored = stage.finish_run(&solution, rx).await.unwrap();
        assert_eq!(scored.result.detail, "ran, stamped");
        assert!(scored.result.is_finalized());
    }

    #[tokio::test]
    async fn dropped_sender_means_cancelled_upstream() {
        let (tx, rx) = oneshot::channel::<RunResult>();
        drop(tx);
        let solution = Solution::new("ref", "out/ref");
        let err = ScoringStage::passthrough()
            .finish_run(&solution, rx)
            .await
            .unwrap_err();
        assert!(matches!(err, StageError::UpstreamCancelled));
    }

    #[tokio::test]
    async fn strategy_fault_surfaces_as_stage_error() {
        let (tx, rx) = oneshot::channel();
        tx.send(raw_result()).ok();
        let solution = Solution::new("ref", "out/ref");
        let stage = ScoringStage::new(Some(Arc::new(FaultyScoring)));
        let err = stage.finish_run(&solution, rx).await.unwrap_err();
        match err {
            StageError::Strategy { name, .. } => assert_eq!(name, "faulty"),
            other => panic!("expected strategy error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stage_can_score_a_result_sent_later() {
        let (tx, rx) = oneshot::channel();
        let solution = Solution::new("ref", "out/ref");
        let stage = ScoringStage::new(Some(Arc::new(StampScoring)));
        let handle = tokio::spawn(async move {
            tokio::task::yield_now().await;
            tx.send(raw_result()).ok();
        });
        let scored = stage.finish_run(&solution, rx).await.unwrap();
        handle.await.unwrap();
        assert_eq!(scored.result.detail, "ran, stamped");
    }
}
