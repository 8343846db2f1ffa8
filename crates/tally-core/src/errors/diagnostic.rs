//! User-facing diagnostics collected while scoring a run.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Diagnostic severity. Errors reject or block the run under test;
/// warnings only qualify its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One reportable problem, attributed to a solution and carrying
/// enough context to act on without re-running the testset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable machine-readable code from [`codes`].
    pub code: String,
    pub severity: Severity,
    /// Component that raised the diagnostic.
    pub source: String,
    /// Human-readable description.
    pub message: String,
    /// Structured context (solution name, expected score, bounds).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub context: serde_json::Value,
    /// Suggested remediation, one step per entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix_steps: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            source: "scoring".to_string(),
            message: message.into(),
            context: serde_json::Value::Null,
            fix_steps: Vec::new(),
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    pub fn with_fix_step(mut self, step: impl Into<String>) -> Self {
        self.fix_steps.push(step.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Collects diagnostics in emission order and mirrors each one to the
/// tracing log as it arrives.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!(
                code = %diagnostic.code,
                source = %diagnostic.source,
                "{}",
                diagnostic.message
            ),
            Severity::Error => error!(
                code = %diagnostic.code,
                source = %diagnostic.source,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Stable diagnostic codes.
pub mod codes {
    // Errors
    /// The judge produced no output for a test case.
    pub const E_JUDGE_SILENT: &str = "E_JUDGE_SILENT";
    /// The judge output does not encode a score.
    pub const E_JUDGE_FORMAT: &str = "E_JUDGE_FORMAT";
    /// The computed score contradicts the declared expectation.
    pub const E_SCORE_MISMATCH: &str = "E_SCORE_MISMATCH";
    /// The scoring configuration is malformed.
    pub const E_CFG_SCHEMA: &str = "E_CFG_SCHEMA";

    // Warnings
    /// The score is only known as a range.
    pub const W_SCORE_RANGE: &str = "W_SCORE_RANGE";
    /// A configuration setting is declared but has no effect.
    pub const W_CFG_UNUSED: &str = "W_CFG_UNUSED";
}
