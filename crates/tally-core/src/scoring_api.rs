//! The seam between the run pipeline and a scoring discipline.

use async_trait::async_trait;

use crate::errors::DiagnosticSink;
use crate::model::{RunResult, Solution};

/// A scoring discipline applied to the raw result of a test run.
///
/// Strategies are handed to the stage explicitly; a stage without one
/// leaves the runner's verdict untouched. Implementations rewrite the
/// result through [`RunResult::finalize`] and report problems through
/// the sink rather than failing, reserving `Err` for faults in the
/// discipline itself.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    /// Short stable name, used in logs and stage errors.
    fn name(&self) -> &'static str;

    /// Applies the discipline's final decision and score detail to
    /// `result`.
    async fn finish(
        &self,
        solution: &Solution,
        result: &mut RunResult,
        sink: &mut DiagnosticSink,
    ) -> anyhow::Result<()>;
}
