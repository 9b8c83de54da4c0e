/*!
 * Answer matching for quiz prompts.
 *
 * A stored headword splits into a required segment and an optional trailing
 * bracketed fragment: `"chat (familier)"` requires "chat" and tolerates
 * "familier"; `"se méfier [de]"` requires "se méfier" and tolerates "de".
 * An answer matches when the required segment is present; including or
 * omitting the optional fragment never changes the outcome.
 *
 * A headword that does not fit this shape is corrupt data, not a wrong
 * answer: parsing reports `MatcherError::MalformedTerm` and `matches` falls
 * back to exact case-insensitive, whitespace-trimmed equality. The fallback
 * never produces a pattern that matches everything.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::models::TermRecord;
use crate::errors::MatcherError;

/// Headword shape: a run of letters (including accented Latin) with internal
/// hyphens, apostrophes or spaces, ending in a letter, optionally followed by
/// one space-separated bracket, paren or brace group.
static HEADWORD_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\p{L}(?:[\p{L} '’\-]*\p{L})?)(?:\s+[(\[{]\s*(.+?)\s*[)\]}])?$")
        .expect("headword shape regex must compile")
});

/// A parsed headword: the segment an answer must contain, and the fragment
/// it may contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPattern {
    required: String,
    optional: Option<String>,
}

impl TermPattern {
    /// Parse a stored headword into required and optional segments
    pub fn parse(headword: &str) -> Result<Self, MatcherError> {
        let trimmed = headword.trim();
        let captures = HEADWORD_SHAPE
            .captures(trimmed)
            .ok_or_else(|| MatcherError::MalformedTerm(headword.to_string()))?;

        let required = captures
            .get(1)
            .map(|m| m.as_str().to_lowercase())
            .ok_or_else(|| MatcherError::MalformedTerm(headword.to_string()))?;
        let optional = captures.get(2).map(|m| m.as_str().to_lowercase());

        Ok(Self { required, optional })
    }

    /// The segment an answer must contain
    pub fn required(&self) -> &str {
        &self.required
    }

    /// The fragment an answer may contain
    pub fn optional(&self) -> Option<&str> {
        self.optional.as_deref()
    }

    /// Check a free-text answer against this pattern
    ///
    /// The answer is trimmed and lowercased; it must consist of the required
    /// segment, optionally followed by the optional fragment with or without
    /// its brackets.
    pub fn is_match(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();

        let Some(rest) = answer.strip_prefix(&self.required) else {
            return false;
        };
        if rest.trim().is_empty() {
            return true;
        }

        // Anything past the required segment must be the optional fragment
        let Some(optional) = &self.optional else {
            return false;
        };
        if !rest.starts_with(char::is_whitespace) {
            // "chaton" must not match required "chat"
            return false;
        }

        let fragment = rest
            .trim()
            .trim_start_matches(['(', '[', '{'])
            .trim_end_matches([')', ']', '}'])
            .trim();

        fragment == optional
    }
}

/// Check an answer against one candidate term
///
/// Malformed headwords are reported as a warning (distinct from a wrong
/// answer) and compared by exact case-insensitive trimmed equality.
pub fn matches(answer: &str, candidate: &TermRecord) -> bool {
    match TermPattern::parse(&candidate.headword) {
        Ok(pattern) => pattern.is_match(answer),
        Err(err) => {
            warn!("{}; falling back to exact comparison", err);
            candidate.headword.trim().to_lowercase() == answer.trim().to_lowercase()
        }
    }
}

/// Check an answer against every candidate term
///
/// An empty candidate list never matches; callers skip such prompts before
/// asking.
pub fn matches_any(answer: &str, candidates: &[TermRecord]) -> bool {
    candidates.iter().any(|candidate| matches(answer, candidate))
}
