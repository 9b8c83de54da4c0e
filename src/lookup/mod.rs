/*!
 * Dictionary-lookup collaborator.
 *
 * This module contains the provider trait and wire types for external
 * dictionary services that return candidate translations for a word, plus:
 * - `wordreference`: HTTP client for a WordReference-style JSON endpoint
 * - `mock`: canned provider for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::LookupError;

/// Common trait for dictionary-lookup providers
///
/// A provider answers "which words in `to_language` translate `word` from
/// `from_language`?" with zero or more candidate translations. An empty
/// response means "no results" and is not an error.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Look up candidate translations for a word
    async fn lookup(
        &self,
        word: &str,
        from_language: &str,
        to_language: &str,
    ) -> Result<LookupResponse, LookupError>;
}

/// Top-level lookup payload: groups of translations, principal group first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Translation groups; the first group's entries are the usable candidates
    #[serde(default)]
    pub translations: Vec<TranslationGroup>,
}

impl LookupResponse {
    /// The usable candidate list: the first group's entries, or empty
    pub fn into_candidates(mut self) -> Vec<CandidateTranslation> {
        if self.translations.is_empty() {
            return Vec::new();
        }
        self.translations.swap_remove(0).translations
    }
}

/// One group of related translations for a word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationGroup {
    /// Candidate translations in this group
    #[serde(default)]
    pub translations: Vec<CandidateTranslation>,
}

/// A single candidate translation as returned by the service
///
/// `to` may hold several comma-separated synonyms; ingestion splits them into
/// individual terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTranslation {
    /// Source-language word
    pub from: String,
    /// Target-language word(s), possibly comma-separated
    pub to: String,
    /// Disambiguating gloss on the source side
    #[serde(default)]
    pub from_sense: String,
    /// Disambiguating gloss on the target side
    #[serde(default)]
    pub to_sense: String,
    /// Part-of-speech tag on the source side
    #[serde(default)]
    pub from_type: String,
    /// Part-of-speech tag on the target side
    #[serde(default)]
    pub to_type: String,
}

pub mod mock;
pub mod wordreference;

pub use wordreference::WordReference;
