/*!
 * Mock dictionary provider for testing.
 *
 * Supports canned per-word responses, an always-empty mode, and an
 * always-failing mode for exercising error paths.
 */

use std::collections::HashMap;

use async_trait::async_trait;

use super::{CandidateTranslation, DictionaryProvider, LookupResponse, TranslationGroup};
use crate::errors::LookupError;

/// Behavior mode for the mock dictionary
enum MockBehavior {
    /// Serve canned responses; unknown words yield an empty response
    Canned(HashMap<String, LookupResponse>),
    /// Always fail with a connection error
    Failing,
}

/// Mock dictionary provider
pub struct MockDictionary {
    behavior: MockBehavior,
}

impl MockDictionary {
    /// Create a mock with no entries; every lookup returns "no results"
    pub fn empty() -> Self {
        Self {
            behavior: MockBehavior::Canned(HashMap::new()),
        }
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Failing,
        }
    }

    /// Add a canned single-group response for a word
    ///
    /// Each `(to, to_sense, to_type)` entry becomes one candidate translating
    /// `word`.
    pub fn with_entry(mut self, word: &str, candidates: &[(&str, &str, &str)]) -> Self {
        if let MockBehavior::Canned(responses) = &mut self.behavior {
            let group = TranslationGroup {
                translations: candidates
                    .iter()
                    .map(|(to, to_sense, to_type)| CandidateTranslation {
                        from: word.to_string(),
                        to: to.to_string(),
                        to_sense: to_sense.to_string(),
                        to_type: to_type.to_string(),
                        ..Default::default()
                    })
                    .collect(),
            };
            responses.insert(
                word.to_string(),
                LookupResponse {
                    translations: vec![group],
                },
            );
        }
        self
    }
}

#[async_trait]
impl DictionaryProvider for MockDictionary {
    async fn lookup(
        &self,
        word: &str,
        _from_language: &str,
        _to_language: &str,
    ) -> Result<LookupResponse, LookupError> {
        match &self.behavior {
            MockBehavior::Canned(responses) => {
                Ok(responses.get(word).cloned().unwrap_or_default())
            }
            MockBehavior::Failing => Err(LookupError::ConnectionError(
                "mock dictionary is down".to_string(),
            )),
        }
    }
}
