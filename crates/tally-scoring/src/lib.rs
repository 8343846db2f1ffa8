//! Scoring disciplines for contest testsets.
//!
//! Two implementations of [`tally_core::ScoringStrategy`]:
//! [`SubtaskScoring`] awards fixed points per named group of test
//! cases, and [`JudgeScoring`] averages the numeric score a judge
//! emitted for each case. [`for_config`] picks the discipline a
//! [`ScoringConfig`] declares.
//!
//! # Quick start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//!
//! use tally_core::{RunResult, ScoringConfig, ScoringStage, Solution, SubtaskGroup};
//! use tokio::sync::oneshot;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ScoringConfig {
//!     subtask_groups: vec![SubtaskGroup::new("samples", 40, vec!["sample-*.in".into()])],
//!     scoring_judge: false,
//!     expected_score: Some(40),
//! };
//! let stage = ScoringStage::new(tally_scoring::for_config(&config)?);
//!
//! let (tx, rx) = oneshot::channel::<RunResult>();
//! // ... hand tx to the execution task ...
//! let scored = stage
//!     .finish_run(&Solution::new("main", "out/main"), rx)
//!     .await?;
//! println!("{}", scored.result.detail);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::debug;

use tally_core::config::ScoringConfig;
use tally_core::errors::ConfigError;
use tally_core::scoring_api::ScoringStrategy;

mod judge_score;
mod subtask;

pub use judge_score::JudgeScoring;
pub use subtask::SubtaskScoring;

/// Builds the scoring strategy a configuration declares, if any.
///
/// Declared subtask groups take precedence over the `scoring_judge`
/// flag; with neither, there is nothing to apply and the runner's
/// verdict stands.
pub fn for_config(config: &ScoringConfig) -> Result<Option<Arc<dyn ScoringStrategy>>, ConfigError> {
    if !config.subtask_groups.is_empty() {
        let strategy = SubtaskScoring::new(&config.subtask_groups, config.expected_score)?;
        debug!(groups = config.subtask_groups.len(), "using subtask scoring");
        return Ok(Some(Arc::new(strategy)));
    }
    if config.scoring_judge {
        debug!("using judge scoring");
        return Ok(Some(Arc::new(JudgeScoring::new(config.expected_score))));
    }
    Ok(None)
}
