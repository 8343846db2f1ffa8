//! Judge output channel: locating and parsing the per-case score a
//! scoring judge leaves behind.
//!
//! After checking a test case the judge writes one file next to the
//! solution's outputs, named after the input file with a `.judge`
//! extension. The file holds either a bare non-negative integer or the
//! tagged form `IMOJUDGE<<<N>>>` embedded anywhere in free text.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::model::TestCase;

/// Extension of per-case judge output files.
pub const JUDGE_EXT: &str = "judge";

lazy_static! {
    /// Tagged score marker, e.g. `IMOJUDGE<<<42>>>`. The captured
    /// digits are the score.
    static ref TAGGED_SCORE: Regex = Regex::new(r"IMOJUDGE<<<(\d+)>>>").unwrap();
}

/// Failure to obtain a score from a judge output file.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The file is missing, unreadable or empty: the judge said
    /// nothing at all about this case.
    #[error("the judge is silent: {path}")]
    Silent { path: PathBuf },

    /// The file has content, but the content does not encode a score.
    #[error("the judge result does not indicate a score: {content:?}")]
    Format { path: PathBuf, content: String },
}

/// Path of the judge output file for `case` under the solution's
/// output directory: the input's base name with its extension replaced
/// by [`JUDGE_EXT`].
pub fn judge_output_path(out_dir: &Path, case: &TestCase) -> PathBuf {
    let stem = case
        .infile
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    out_dir.join(format!("{stem}.{JUDGE_EXT}"))
}

/// Reads and parses one judge output file.
///
/// A missing, unreadable or empty file is [`JudgeError::Silent`].
/// Content that is neither a run of digits nor a tagged score, or a
/// score too large to represent, is [`JudgeError::Format`]. The bytes
/// are decoded leniently, so a tagged score still counts with binary
/// noise around it, and undecodable content is a Format error rather
/// than silence.
pub fn read_score(path: &Path) -> Result<u64, JudgeError> {
    let bytes = std::fs::read(path).map_err(|_| JudgeError::Silent {
        path: path.to_path_buf(),
    })?;
    if bytes.is_empty() {
        return Err(JudgeError::Silent {
            path: path.to_path_buf(),
        });
    }
    let content = String::from_utf8_lossy(&bytes);
    parse_score(&content).ok_or_else(|| JudgeError::Format {
        path: path.to_path_buf(),
        content: content.trim().to_string(),
    })
}

/// Extracts the score from judge output content, if it encodes one.
pub fn parse_score(content: &str) -> Option<u64> {
    let trimmed = content.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    TAGGED_SCORE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_digits_parse() {
        assert_eq!(parse_score("42"), Some(42));
        assert_eq!(parse_score("  42\n"), Some(42));
        assert_eq!(parse_score("0"), Some(0));
    }

    #[test]
    fn tagged_score_parses_inside_free_text() {
        assert_eq!(parse_score("IMOJUDGE<<<70>>>"), Some(70));
        assert_eq!(
            parse_score("checker log line\npartial credit IMOJUDGE<<<7>>> awarded\n"),
            Some(7)
        );
    }

    #[test]
    fn first_tagged_score_wins() {
        assert_eq!(parse_score("IMOJUDGE<<<1>>> IMOJUDGE<<<2>>>"), Some(1));
    }

    #[test]
    fn non_score_content_is_rejected() {
        assert_eq!(parse_score("accepted"), None);
        assert_eq!(parse_score("-5"), None);
        assert_eq!(parse_score("4.5"), None);
        assert_eq!(parse_score("IMOJUDGE<<<>>>"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("   \n  "), None);
    }

    #[test]
    fn scores_beyond_u64_are_rejected() {
        assert_eq!(parse_score("99999999999999999999999999"), None);
        assert_eq!(parse_score("IMOJUDGE<<<99999999999999999999999999>>>"), None);
    }

    #[test]
    fn judge_path_replaces_input_extension() {
        let case = TestCase::new("data/sample-01.in");
        let path = judge_output_path(Path::new("out/sol"), &case);
        assert_eq!(path, Path::new("out/sol").join("sample-01.judge"));
    }

    #[test]
    fn missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_score(&dir.path().join("absent.judge")).unwrap_err();
        assert!(matches!(err, JudgeError::Silent { .. }));
    }

    #[test]
    fn empty_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.judge");
        std::fs::write(&path, "").unwrap();
        let err = read_score(&path).unwrap_err();
        assert!(matches!(err, JudgeError::Silent { .. }));
    }

    #[test]
    fn whitespace_only_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.judge");
        std::fs::write(&path, "  \n\t\n").unwrap();
        let err = read_score(&path).unwrap_err();
        assert!(matches!(err, JudgeError::Format { .. }));
    }

    #[test]
    fn undecodable_content_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.judge");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x93]).unwrap();
        let err = read_score(&path).unwrap_err();
        assert!(matches!(err, JudgeError::Format { .. }));
    }

    #[test]
    fn tagged_score_survives_binary_noise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noisy.judge");
        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(b" IMOJUDGE<<<9>>>\n");
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(read_score(&path).unwrap(), 9);
    }

    #[test]
    fn format_error_carries_trimmed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.judge");
        std::fs::write(&path, "  not a score \n").unwrap();
        match read_score(&path).unwrap_err() {
            JudgeError::Format { content, .. } => assert_eq!(content, "not a score"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn readable_file_yields_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.judge");
        std::fs::write(&path, "55\n").unwrap();
        assert_eq!(read_score(&path).unwrap(), 55);
    }
}
