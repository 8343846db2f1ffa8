//! The scoring stage of the run pipeline.

mod stage;

pub use stage::{ScoredRun, ScoringStage, StageError};
