//! Recovery of a JSON value from loosely formatted model output.
//!
//! Attempts run in order and the first candidate found is the only one parsed:
//! 1. the first fenced code block (```` ``` ```` or ```` ```json ````) whose trimmed
//!    body is a `{...}` or `[...]` span; each block ends at its own closing fence
//! 2. the span from the first `{` to the last `}` of the whole text
//!
//! Fenced top-level scalars (```` ```json\n42\n``` ````) are not recovered.
//!
//! The candidate then has `//` line comments removed before parsing. Both the
//! span take and the comment pass are plain text operations: braces inside prose
//! can widen the span, and a `//` inside a string value truncates that line.

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{PlannerError, Result};

/// Where the parsed candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    FencedBlock,
    BraceSpan,
}

/// A successfully recovered value together with the exact text that was parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub value: Value,
    pub candidate: String,
    pub source: CandidateSource,
}

fn fenced_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```(?i:json)?[ \t]*\r?\n?(.*?)```")
            .expect("fenced block pattern compiles")
    })
}

fn line_comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)//.*$").expect("line comment pattern compiles"))
}

/// Trimmed body of the first fenced block that wraps a JSON object or array.
pub(crate) fn find_fenced_block(text: &str) -> Option<&str> {
    fenced_block_pattern()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|body| body.as_str().trim())
        .find(|body| {
            (body.starts_with('{') && body.ends_with('}'))
                || (body.starts_with('[') && body.ends_with(']'))
        })
}

/// First `{` through last `}`, inclusive. Not a balanced scan.
pub(crate) fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Drops everything from the first `//` to the end of each line.
pub(crate) fn strip_line_comments(candidate: &str) -> Cow<'_, str> {
    line_comment_pattern().replace_all(candidate, "")
}

/// Recover one JSON value from `text`.
///
/// Returns [`PlannerError::NoJsonFound`] when neither a fenced block nor a `{ }`
/// pair exists, and [`PlannerError::MalformedJson`] when the isolated candidate
/// still fails to parse. Never falls back to an empty object.
pub fn extract_json(text: &str) -> Result<Extraction> {
    if text.trim().is_empty() {
        return Err(PlannerError::NoJsonFound);
    }

    let (raw, source) = match find_fenced_block(text) {
        Some(block) => (block, CandidateSource::FencedBlock),
        None => (
            brace_span(text).ok_or(PlannerError::NoJsonFound)?,
            CandidateSource::BraceSpan,
        ),
    };

    let candidate = strip_line_comments(raw).into_owned();
    debug!(
        target: "tripplanner::extract",
        source = ?source,
        candidate_len = candidate.len(),
        "isolated JSON candidate"
    );

    match serde_json::from_str::<Value>(&candidate) {
        Ok(value) => Ok(Extraction {
            value,
            candidate,
            source,
        }),
        Err(err) => Err(PlannerError::MalformedJson {
            message: err.to_string(),
            candidate,
        }),
    }
}
