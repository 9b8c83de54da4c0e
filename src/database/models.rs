/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single word or phrase entry in one language
///
/// The headword may carry an optional trailing bracketed fragment, e.g.
/// `"chat (familier)"` or `"se méfier [de]"`; the answer matcher treats that
/// fragment as non-mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    /// Unique term identifier (UUID), assigned on creation, immutable
    pub id: String,
    /// The literal word or phrase
    pub headword: String,
    /// Language code (ISO 639-1)
    pub language: String,
    /// Free-text disambiguating gloss, may be empty
    pub sense: String,
    /// Part-of-speech tag, may be empty
    pub part: String,
    /// Count of consecutive correct quiz answers
    pub streak: i64,
    /// Archived terms are excluded from quiz selection but not deleted
    pub archived: bool,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl TermRecord {
    /// Create a new term record with a fresh id and zeroed quiz state
    pub fn new(headword: String, language: String, sense: String, part: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            headword,
            language,
            sense,
            part,
            streak: 0,
            archived: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The quiz prompt line: headword plus part-of-speech and sense when present
    pub fn prompt_line(&self) -> String {
        let mut line = self.headword.clone();
        if !self.part.is_empty() {
            line.push_str(&format!(" [{}]", self.part));
        }
        if !self.sense.is_empty() {
            line.push(' ');
            line.push_str(&self.sense);
        }
        line
    }
}

/// An undirected association between two terms in different languages
///
/// Stored as an ordered pair in the ingestion direction; either side may be
/// the lookup key when resolving translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationLink {
    /// Unique link identifier (UUID)
    pub id: String,
    /// Term id on the ingestion source side
    pub from_id: String,
    /// Term id on the ingestion target side
    pub to_id: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl TranslationLink {
    /// Create a new link record between two existing terms
    pub fn new(from_id: String, to_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_id,
            to_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The endpoint on the other side of `term_id`, if this link touches it
    pub fn other_endpoint(&self, term_id: &str) -> Option<&str> {
        if self.from_id == term_id {
            Some(&self.to_id)
        } else if self.to_id == term_id {
            Some(&self.from_id)
        } else {
            None
        }
    }
}
