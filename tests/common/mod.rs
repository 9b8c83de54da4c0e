/*!
 * Common test utilities for the wordflash test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use wordflash::database::models::TermRecord;
use wordflash::database::repository::Repository;

/// Upsert a bare term (no sense, no part) and return the persisted record
pub async fn seed_term(repo: &Repository, headword: &str, language: &str) -> Result<TermRecord> {
    let record = TermRecord::new(
        headword.to_string(),
        language.to_string(),
        String::new(),
        String::new(),
    );
    repo.upsert_term(&record).await
}

/// Upsert a linked word pair and return both persisted records
pub async fn seed_pair(
    repo: &Repository,
    from_word: &str,
    from_language: &str,
    to_word: &str,
    to_language: &str,
) -> Result<(TermRecord, TermRecord)> {
    let from = seed_term(repo, from_word, from_language).await?;
    let to = seed_term(repo, to_word, to_language).await?;
    repo.upsert_link(&from.id, &to.id).await?;
    Ok((from, to))
}
