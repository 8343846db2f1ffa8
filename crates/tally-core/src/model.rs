//! Core data model shared by the scoring disciplines: test cases,
//! verdicts, the candidate solution under test and the mutable run
//! result that scoring rewrites in place.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Synthetic test case cited when a computed score contradicts the
/// declared expectation.
pub const UNEXPECTED_SCORE_CASE: &str = "unexpected_score";

/// Synthetic test case cited when a judge output file is missing or
/// malformed.
pub const JUDGE_ERROR_CASE: &str = "judge_error";

/// One input of a testset, identified by the path of its input file.
///
/// Ordering follows the path so that maps keyed by test case iterate
/// deterministically regardless of execution order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCase {
    /// Path of the input file. Pattern matching uses the base name only.
    pub infile: PathBuf,
}

impl TestCase {
    pub fn new(infile: impl Into<PathBuf>) -> Self {
        Self {
            infile: infile.into(),
        }
    }

    /// A case that exists only as evidence for a decision, not backed
    /// by an input file.
    pub fn synthetic(name: &str) -> Self {
        Self {
            infile: PathBuf::from(name),
        }
    }

    /// File name component used for subtask pattern matching.
    pub fn base_name(&self) -> &str {
        self.infile
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.infile.display())
    }
}

/// Outcome of one executed (or skipped) test case.
///
/// `NotAvailable` marks a case the runner never reached, which happens
/// when an earlier failure stops the run short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotAvailable,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    RuntimeError,
    Error,
}

impl Verdict {
    /// Short judge code used in logs and detail strings.
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::NotAvailable => "NA",
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer => "WA",
            Verdict::TimeLimitExceeded => "TLE",
            Verdict::RuntimeError => "RE",
            Verdict::Error => "ERR",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Candidate program whose run is being scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Name used to attribute diagnostics, usually the solution
    /// directory name.
    pub name: String,
    /// Directory the runner wrote per-case outputs into. Judge output
    /// files live here.
    pub out_dir: PathBuf,
}

impl Solution {
    pub fn new(name: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            out_dir: out_dir.into(),
        }
    }
}

/// Aggregate outcome of running one solution over a testset.
///
/// Produced raw by the execution harness, then rewritten in place by a
/// scoring discipline via [`RunResult::finalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Verdict per test case, in deterministic case order.
    pub cases: BTreeMap<TestCase, Verdict>,
    /// Overall accept/reject decision.
    pub accepted: bool,
    /// Human-readable outcome; scoring appends score information.
    pub detail: String,
    /// Case cited as evidence for a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notable_testcase: Option<TestCase>,
    #[serde(skip)]
    finalized: bool,
}

impl RunResult {
    /// A raw, not yet finalized result as the execution harness
    /// produces it.
    pub fn new(
        cases: BTreeMap<TestCase, Verdict>,
        accepted: bool,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            cases,
            accepted,
            detail: detail.into(),
            notable_testcase: None,
            finalized: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Rewrites the accept/reject decision, detail and cited case.
    ///
    /// The first call always applies. Once a result is finalized,
    /// later calls apply only with `allow_override`; without it the
    /// earlier decision stands.
    pub fn finalize(
        &mut self,
        accepted: bool,
        detail: impl Into<String>,
        notable_testcase: Option<TestCase>,
        allow_override: bool,
    ) {
        if self.finalized && !allow_override {
            debug!(
                detail = %self.detail,
                "finalize without override on a finalized result; keeping earlier decision"
            );
            return;
        }
        self.accepted = accepted;
        self.detail = detail.into();
        self.notable_testcase = notable_testcase;
        self.finalized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        let case = TestCase::new("tests/data/sample-01.in");
        assert_eq!(case.base_name(), "sample-01.in");
    }

    #[test]
    fn synthetic_case_keeps_its_name() {
        let case = TestCase::synthetic(UNEXPECTED_SCORE_CASE);
        assert_eq!(case.base_name(), "unexpected_score");
    }

    #[test]
    fn verdict_codes_are_stable() {
        assert_eq!(Verdict::NotAvailable.code(), "NA");
        assert_eq!(Verdict::Accepted.code(), "AC");
        assert_eq!(Verdict::WrongAnswer.code(), "WA");
        assert_eq!(Verdict::TimeLimitExceeded.code(), "TLE");
        assert_eq!(Verdict::RuntimeError.code(), "RE");
        assert_eq!(Verdict::Error.code(), "ERR");
    }

    #[test]
    fn verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::TimeLimitExceeded).unwrap();
        assert_eq!(json, "\"time_limit_exceeded\"");
    }

    #[test]
    fn first_finalize_always_applies() {
        let mut result = RunResult::new(BTreeMap::new(), true, "ran");
        result.finalize(false, "rejected", Some(TestCase::new("a.in")), false);
        assert!(!result.accepted);
        assert_eq!(result.detail, "rejected");
        assert!(result.is_finalized());
    }

    #[test]
    fn finalize_without_override_keeps_earlier_decision() {
        let mut result = RunResult::new(BTreeMap::new(), true, "ran");
        result.finalize(true, "first", None, false);
        result.finalize(false, "second", None, false);
        assert!(result.accepted);
        assert_eq!(result.detail, "first");
    }

    #[test]
    fn finalize_with_override_rewrites_decision() {
        let mut result = RunResult::new(BTreeMap::new(), true, "ran");
        result.finalize(true, "first", None, false);
        result.finalize(false, "second", Some(TestCase::synthetic(JUDGE_ERROR_CASE)), true);
        assert!(!result.accepted);
        assert_eq!(result.detail, "second");
        assert_eq!(
            result.notable_testcase,
            Some(TestCase::synthetic(JUDGE_ERROR_CASE))
        );
    }

    #[test]
    fn cases_iterate_in_path_order() {
        let mut cases = BTreeMap::new();
        cases.insert(TestCase::new("b.in"), Verdict::Accepted);
        cases.insert(TestCase::new("a.in"), Verdict::WrongAnswer);
        cases.insert(TestCase::new("c.in"), Verdict::Accepted);
        let result = RunResult::new(cases, false, "ran");
        let names: Vec<_> = result.cases.keys().map(TestCase::base_name).collect();
        assert_eq!(names, vec!["a.in", "b.in", "c.in"]);
    }
}
