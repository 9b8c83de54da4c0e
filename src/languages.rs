use anyhow::{Result, anyhow};
use isolang::Language;

/// Language pair utilities
///
/// Quiz and ingestion sessions work on a directed pair of ISO 639-1 language
/// codes. The configuration lists seed pairs in one direction; menus offer
/// both directions of every seed pair.
/// A directed language pair: quiz prompts are drawn from `from`, answers are
/// checked against translations in `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Source language code (ISO 639-1)
    pub from: String,
    /// Target language code (ISO 639-1)
    pub to: String,
}

impl LanguagePair {
    /// Create a pair from two validated codes
    pub fn new(from: &str, to: &str) -> Result<Self> {
        let from = normalize_language_code(from)?;
        let to = normalize_language_code(to)?;
        if from == to {
            return Err(anyhow!("Language pair must use two different languages: {}", from));
        }
        Ok(Self { from, to })
    }

    /// The reversed direction of this pair
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Menu label, e.g. "translate English to French"
    pub fn label(&self) -> String {
        let from = language_name(&self.from).unwrap_or_else(|_| self.from.clone());
        let to = language_name(&self.to).unwrap_or_else(|_| self.to.clone());
        format!("translate {} to {}", from, to)
    }
}

/// Validate and normalize an ISO 639-1 language code to lowercase
pub fn normalize_language_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(normalized);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// English display name for a language code, capitalized for menu output
pub fn language_name(code: &str) -> Result<String> {
    let normalized = normalize_language_code(code)?;
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Expand directed seed pairs into both directions, preserving order and
/// dropping exact duplicates
pub fn expand_pairs(seed_pairs: &[LanguagePair]) -> Vec<LanguagePair> {
    let mut expanded: Vec<LanguagePair> = Vec::with_capacity(seed_pairs.len() * 2);
    for pair in seed_pairs {
        for candidate in [pair.clone(), pair.reversed()] {
            if !expanded.contains(&candidate) {
                expanded.push(candidate);
            }
        }
    }
    expanded
}
