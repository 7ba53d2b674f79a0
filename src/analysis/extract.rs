//! Field extraction from generated responses
//!
//! The generated text is expected to contain two labelled sections,
//! `Key Discussions:` and `Summary:`, in either order. Each section runs from
//! its marker to the end of the text, or up to the other marker when that
//! comes later in the text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::outcome::{AnalysisError, ExtractedFields};
use crate::llm::{DISCUSSIONS_MARKER, SUMMARY_MARKER};

static DISCUSSIONS_RE: Lazy<Regex> = Lazy::new(|| marker_regex(DISCUSSIONS_MARKER));

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| marker_regex(SUMMARY_MARKER));

// Trailing `*` covers markdown bold such as `**Summary:**`.
fn marker_regex(marker: &str) -> Regex {
    Regex::new(&format!(r"{}\**", regex::escape(marker))).expect("static regex compile")
}

/// Turns raw generated text into [`ExtractedFields`].
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, response: &str) -> Result<ExtractedFields, AnalysisError>;
}

/// Marker-based extractor for the plain-text response format.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerExtractor;

impl ResponseExtractor for MarkerExtractor {
    fn extract(&self, response: &str) -> Result<ExtractedFields, AnalysisError> {
        extract_fields(response)
    }
}

/// Extract both fields, failing on empty text or a missing section.
pub fn extract_fields(response: &str) -> Result<ExtractedFields, AnalysisError> {
    if response.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let discussion_points = section(response, &DISCUSSIONS_RE, &SUMMARY_RE);
    let summary_intent = section(response, &SUMMARY_RE, &DISCUSSIONS_RE);

    match (discussion_points, summary_intent) {
        (Some(discussion_points), Some(summary_intent)) => Ok(ExtractedFields {
            discussion_points: discussion_points.to_string(),
            summary_intent: summary_intent.to_string(),
        }),
        _ => Err(AnalysisError::Parse {
            raw_response: response.to_string(),
        }),
    }
}

/// Non-empty content following the first `marker`, cut before `other`.
fn section<'a>(text: &'a str, marker: &Regex, other: &Regex) -> Option<&'a str> {
    let rest = &text[marker.find(text)?.end()..];

    let end = match other.find(rest) {
        Some(m) => {
            // Text before the other marker on its own line belongs to this
            // section; bold markup and whitespace there do not.
            let before = &rest[..m.start()];
            let line_start = before.rfind('\n').map_or(0, |i| i + 1);
            let lead = before[line_start..]
                .trim_end_matches(|c: char| c == '*' || c.is_whitespace());
            line_start + lead.len()
        }
        None => rest.len(),
    };

    let content = strip_bullet(rest[..end].trim());
    (!content.is_empty()).then_some(content)
}

fn strip_bullet(s: &str) -> &str {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('*' | '-'), Some(c)) if c.is_whitespace() => s[1..].trim_start(),
        _ => s,
    }
}
