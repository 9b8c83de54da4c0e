/*!
 * Ingestion pipeline: turning words and dictionary candidates into terms
 * and translation links.
 *
 * Two entry paths share the same primitives:
 * - manual: one source word, one target word, one link
 * - lookup-assisted: candidates from the dictionary provider, accepted or
 *   rejected one by one; comma-separated target synonyms become individual
 *   terms, each linked to the same source term
 *
 * All writes are sequential and awaited; a failed write for one word is
 * recorded in the per-batch report and the remaining words still proceed.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use crate::database::models::TermRecord;
use crate::database::repository::Repository;
use crate::languages::{LanguagePair, language_name};
use crate::lookup::{CandidateTranslation, DictionaryProvider};
use crate::prompt::Prompter;

/// Ingestion outcome for one batch of accepted translations
///
/// Failures are collected per word so each one stays individually
/// observable; an error on one word never aborts the rest.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Terms created or refreshed
    pub terms: usize,
    /// Links newly created
    pub links: usize,
    /// Per-word failures, in encounter order
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    /// True when every write succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A single failed write during ingestion
#[derive(Debug)]
pub struct IngestFailure {
    /// The word whose write failed
    pub word: String,
    /// Why it failed
    pub reason: String,
}

/// Strip scraped artifacts from a word and trim surrounding whitespace
///
/// Dictionary markup occasionally leaks directional arrows into the word
/// text.
pub fn normalize_word(raw: &str) -> String {
    raw.replace(['⇒', '→'], "").trim().to_string()
}

/// Ingestion pipeline over one repository, dictionary and prompt session
pub struct IngestPipeline<'a> {
    repo: &'a Repository,
    dictionary: &'a dyn DictionaryProvider,
    prompter: &'a mut dyn Prompter,
}

impl<'a> IngestPipeline<'a> {
    /// Create a pipeline borrowing the session's collaborators
    pub fn new(
        repo: &'a Repository,
        dictionary: &'a dyn DictionaryProvider,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            repo,
            dictionary,
            prompter,
        }
    }

    /// Normalize and upsert one term, returning the persisted record
    ///
    /// New terms start with `streak = 0, archived = false`; re-ingesting an
    /// existing `(headword, language, sense, part)` preserves its quiz state.
    pub async fn upsert_term(
        &self,
        word: &str,
        language: &str,
        sense: &str,
        part: &str,
    ) -> Result<TermRecord> {
        let headword = normalize_word(word);
        if headword.is_empty() {
            return Err(anyhow!("Cannot add an empty word"));
        }

        let record = TermRecord::new(
            headword,
            language.to_string(),
            sense.trim().to_string(),
            part.trim().to_string(),
        );

        self.repo
            .upsert_term(&record)
            .await
            .with_context(|| format!("Failed to persist term {:?}", record.headword))
    }

    /// Link two terms, skipping silently when either endpoint is absent
    ///
    /// An upstream lookup or write failure leaves an endpoint id empty; the
    /// deliberate no-op keeps such failures from corrupting the link graph.
    /// Returns true when a new link row was created.
    pub async fn link_terms(
        &self,
        from_id: Option<&str>,
        to_id: Option<&str>,
    ) -> Result<bool> {
        let (Some(from_id), Some(to_id)) = (from_id, to_id) else {
            debug!("Skipping link with missing endpoint");
            return Ok(false);
        };

        self.repo
            .upsert_link(from_id, to_id)
            .await
            .context("Failed to persist translation link")
    }

    /// Manual-entry path: one source word, one target word, one link
    pub async fn add_manual(&mut self, pair: &LanguagePair) -> Result<()> {
        let from_name = language_name(&pair.from).unwrap_or_else(|_| pair.from.clone());
        let to_name = language_name(&pair.to).unwrap_or_else(|_| pair.to.clone());

        let from_word = self
            .prompter
            .ask(&format!("What {} word do you want to add?", from_name))
            .await?;
        let from_term = self.upsert_term(&from_word, &pair.from, "", "").await?;

        let to_word = self
            .prompter
            .ask(&format!(
                "What's the {} translation of {}?",
                to_name, from_term.headword
            ))
            .await?;
        let to_term = self.upsert_term(&to_word, &pair.to, "", "").await?;

        self.link_terms(Some(&from_term.id), Some(&to_term.id))
            .await?;

        self.prompter.say(&format!(
            "Added {} = {}.",
            from_term.headword, to_term.headword
        ));
        Ok(())
    }

    /// Lookup-assisted path: search, accept candidates one by one, ingest
    ///
    /// A provider failure or an empty result reports "No results found." and
    /// returns an empty report; the caller stays in its menu.
    pub async fn add_from_lookup(&mut self, pair: &LanguagePair) -> Result<IngestReport> {
        let word = self.prompter.ask("What word are you searching for?").await?;
        let word = normalize_word(&word);

        let candidates = match self.dictionary.lookup(&word, &pair.from, &pair.to).await {
            Ok(response) => response.into_candidates(),
            Err(err) => {
                warn!("Dictionary lookup for {:?} failed: {}", word, err);
                Vec::new()
            }
        };

        if candidates.is_empty() {
            self.prompter.say("No results found.");
            return Ok(IngestReport::default());
        }

        let accepted = self.choose_candidates(candidates).await?;
        let report = self.ingest_accepted(pair, &accepted).await;

        self.prompter.say(&format!(
            "Saved {} term(s) and {} link(s).",
            report.terms, report.links
        ));
        for failure in &report.failures {
            self.prompter
                .say(&format!("Could not save {}: {}", failure.word, failure.reason));
        }

        Ok(report)
    }

    /// Offer each candidate for acceptance (default yes)
    async fn choose_candidates(
        &mut self,
        candidates: Vec<CandidateTranslation>,
    ) -> Result<Vec<CandidateTranslation>> {
        let mut accepted = Vec::new();

        for candidate in candidates {
            let mut label = candidate.to.trim().to_string();
            let sense = candidate.to_sense.trim();
            if !sense.is_empty() {
                label.push(' ');
                label.push_str(sense);
            }

            if self
                .prompter
                .confirm(&format!("Use this translation: {}?", label), true)
                .await?
            {
                accepted.push(candidate);
            }
        }

        Ok(accepted)
    }

    /// Persist accepted candidates with sequential awaited writes
    ///
    /// Each target word is written and linked before the next one starts, so
    /// the source id is always resolved before its links. Failures go into
    /// the report; the batch continues.
    async fn ingest_accepted(
        &mut self,
        pair: &LanguagePair,
        accepted: &[CandidateTranslation],
    ) -> IngestReport {
        let mut report = IngestReport::default();

        for candidate in accepted {
            let from_id = match self
                .upsert_term(
                    &candidate.from,
                    &pair.from,
                    &candidate.from_sense,
                    &candidate.from_type,
                )
                .await
            {
                Ok(term) => {
                    report.terms += 1;
                    Some(term.id)
                }
                Err(err) => {
                    warn!("Failed to save source word {:?}: {:#}", candidate.from, err);
                    report.failures.push(IngestFailure {
                        word: candidate.from.clone(),
                        reason: err.to_string(),
                    });
                    None
                }
            };

            // A translation may list several comma-separated synonyms; each
            // becomes its own term linked to the same source term.
            for raw_word in candidate.to.split(',') {
                let to_word = normalize_word(raw_word);
                if to_word.is_empty() {
                    continue;
                }

                let to_id = match self
                    .upsert_term(&to_word, &pair.to, &candidate.to_sense, &candidate.to_type)
                    .await
                {
                    Ok(term) => {
                        report.terms += 1;
                        Some(term.id)
                    }
                    Err(err) => {
                        warn!("Failed to save translation {:?}: {:#}", to_word, err);
                        report.failures.push(IngestFailure {
                            word: to_word.clone(),
                            reason: err.to_string(),
                        });
                        None
                    }
                };

                match self.link_terms(from_id.as_deref(), to_id.as_deref()).await {
                    Ok(true) => report.links += 1,
                    Ok(false) => {}
                    Err(err) => {
                        warn!("Failed to link {:?}: {:#}", to_word, err);
                        report.failures.push(IngestFailure {
                            word: to_word,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        report
    }
}
