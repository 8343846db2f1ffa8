//! Score ranges: the set of final scores consistent with the verdicts
//! known so far.

use std::fmt;

use serde::Serialize;

/// Closed integer range `[min, max]` of plausible final scores.
///
/// A partially executed run leaves some verdicts unknown, so the score
/// is only known as a range. Once every relevant verdict is known the
/// range collapses to a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    min: u64,
    max: u64,
}

impl ScoreRange {
    pub fn new(min: u64, max: u64) -> Self {
        debug_assert!(min <= max, "score range endpoints out of order");
        Self { min, max }
    }

    /// A fully determined score.
    pub fn exact(score: u64) -> Self {
        Self {
            min: score,
            max: score,
        }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    /// Whether `score` is a plausible final score.
    pub fn contains(&self, score: u64) -> bool {
        self.min <= score && score <= self.max
    }
}

impl fmt::Display for ScoreRange {
    /// Renders `"42"` for an exact score and `"40 <= x <= 60"` for a
    /// genuine range, matching the detail-string syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} <= x <= {}", self.min, self.max)
        }
    }
}
