/*!
 * Quiz engine: a state machine over randomly drawn term batches.
 *
 * One session walks SelectBatch → PresentTerm → AwaitAnswer → Evaluate →
 * (Continue | SuggestArchive) per term, then EndOfBatch → SuggestRepeat →
 * SelectBatch or Terminate. The loop is explicit; batches are plain queues
 * consumed front-to-back with no reshuffling after selection, and repeat
 * rounds iterate instead of recursing so a long evening of quizzing cannot
 * grow the call stack.
 *
 * Persistence failures on a single term are reported and the session moves
 * on; only a failure to select a batch at all ends the session early.
 */

use std::collections::VecDeque;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::database::models::TermRecord;
use crate::database::repository::Repository;
use crate::languages::LanguagePair;
use crate::matcher;
use crate::prompt::Prompter;

/// Terms drawn per batch unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// A streak hitting a multiple of this suggests archiving the term
pub const DEFAULT_STREAK_INTERVAL: i64 = 5;

/// Quiz session states
enum State {
    /// Draw a fresh randomized batch
    SelectBatch,
    /// Pop the next term off the batch, or finish the batch
    NextTerm,
    /// Fetch translations for a term and decide whether it can be quizzed
    PresentTerm(TermRecord),
    /// Show the prompt and wait for an answer
    AwaitAnswer(TermRecord, Vec<TermRecord>),
    /// Score the answer and update streak state
    Evaluate(TermRecord, Vec<TermRecord>, String),
    /// Offer to retire a well-known term
    SuggestArchive(TermRecord),
    /// Batch exhausted
    EndOfBatch,
    /// Offer another round
    SuggestRepeat,
    /// Session over
    Terminate,
}

/// Counters for one quiz session, across all repeat rounds
#[derive(Debug, Default, Clone)]
pub struct SessionSummary {
    /// Prompts answered
    pub asked: usize,
    /// Correct answers
    pub correct: usize,
    /// Wrong answers
    pub wrong: usize,
    /// Terms skipped for lack of translations in the target language
    pub skipped: usize,
    /// Terms archived on suggestion
    pub archived: usize,
    /// Per-term persistence failures, individually recorded
    pub errors: Vec<String>,
}

/// Quiz engine over one repository, prompt session and language pair
pub struct QuizEngine<'a> {
    repo: &'a Repository,
    prompter: &'a mut dyn Prompter,
    pair: LanguagePair,
    batch_size: usize,
    streak_interval: i64,
}

impl<'a> QuizEngine<'a> {
    /// Create an engine borrowing the session's collaborators
    pub fn new(repo: &'a Repository, prompter: &'a mut dyn Prompter, pair: LanguagePair) -> Self {
        Self {
            repo,
            prompter,
            pair,
            batch_size: DEFAULT_BATCH_SIZE,
            streak_interval: DEFAULT_STREAK_INTERVAL,
        }
    }

    /// Override the number of terms drawn per batch
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Override the streak interval that triggers archive suggestions
    pub fn with_streak_interval(mut self, streak_interval: i64) -> Self {
        self.streak_interval = streak_interval;
        self
    }

    /// Record a per-term persistence failure without ending the session
    fn note_error(summary: &mut SessionSummary, what: &str, err: anyhow::Error) {
        warn!("{}: {:#}", what, err);
        summary.errors.push(format!("{}: {}", what, err));
    }

    /// Run the session until the user declines another round
    pub async fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut batch: VecDeque<TermRecord> = VecDeque::new();
        let mut state = State::SelectBatch;

        loop {
            state = match state {
                State::SelectBatch => {
                    let terms = self
                        .repo
                        .fetch_quiz_batch(&self.pair.from, self.batch_size)
                        .await
                        .context("Failed to select a quiz batch")?;
                    debug!("Drew a batch of {} terms", terms.len());

                    batch = terms.into();
                    if batch.is_empty() {
                        State::SuggestRepeat
                    } else {
                        State::NextTerm
                    }
                }

                State::NextTerm => match batch.pop_front() {
                    Some(term) => State::PresentTerm(term),
                    None => State::EndOfBatch,
                },

                State::PresentTerm(term) => {
                    match self.repo.fetch_translations(&term.id, &self.pair.to).await {
                        Ok(translations) if translations.is_empty() => {
                            // An orphan term cannot be quizzed; skip without
                            // a prompt or any streak change.
                            debug!(
                                "Skipping {:?}: no translations into '{}'",
                                term.headword, self.pair.to
                            );
                            summary.skipped += 1;
                            State::NextTerm
                        }
                        Ok(translations) => State::AwaitAnswer(term, translations),
                        Err(err) => {
                            Self::note_error(
                                &mut summary,
                                &format!("Could not load translations for {:?}", term.headword),
                                err,
                            );
                            State::NextTerm
                        }
                    }
                }

                State::AwaitAnswer(term, translations) => {
                    let answer = self.prompter.ask(&term.prompt_line()).await?;
                    State::Evaluate(term, translations, answer)
                }

                State::Evaluate(mut term, translations, answer) => {
                    summary.asked += 1;

                    if matcher::matches_any(&answer, &translations) {
                        term.streak += 1;
                        summary.correct += 1;
                        self.prompter.say(&format!(
                            "Correct! {} in a row for this word!",
                            term.streak
                        ));

                        // The suggestion fires only when a correct answer
                        // lands the streak on the interval, never on a value
                        // carried in from an earlier session.
                        if term.streak % self.streak_interval == 0 {
                            State::SuggestArchive(term)
                        } else {
                            if let Err(err) = self.repo.update_streak(&term.id, term.streak).await {
                                Self::note_error(
                                    &mut summary,
                                    &format!("Could not save streak for {:?}", term.headword),
                                    err,
                                );
                            }
                            State::NextTerm
                        }
                    } else {
                        term.streak = 0;
                        summary.wrong += 1;
                        let expected: Vec<&str> =
                            translations.iter().map(|t| t.headword.as_str()).collect();
                        self.prompter.say(&format!(
                            "Wrong :-( Correct answers: {}",
                            expected.join(", ")
                        ));

                        if let Err(err) = self.repo.update_streak(&term.id, 0).await {
                            Self::note_error(
                                &mut summary,
                                &format!("Could not reset streak for {:?}", term.headword),
                                err,
                            );
                        }
                        State::NextTerm
                    }
                }

                State::SuggestArchive(term) => {
                    let retire = self
                        .prompter
                        .confirm(
                            &format!(
                                "You've correctly translated {} {} times in a row! \
                                 Would you like to remove it from future quizzes? \
                                 (You can always undo this.)",
                                term.headword, term.streak
                            ),
                            true,
                        )
                        .await?;

                    if retire {
                        match self.repo.archive(&term.id).await {
                            Ok(()) => summary.archived += 1,
                            Err(err) => Self::note_error(
                                &mut summary,
                                &format!("Could not archive {:?}", term.headword),
                                err,
                            ),
                        }
                    } else if let Err(err) = self.repo.update_streak(&term.id, term.streak).await {
                        // Declining keeps the streak; it is not reset.
                        Self::note_error(
                            &mut summary,
                            &format!("Could not save streak for {:?}", term.headword),
                            err,
                        );
                    }
                    State::NextTerm
                }

                State::EndOfBatch => State::SuggestRepeat,

                State::SuggestRepeat => {
                    if self.prompter.confirm("No more words. Repeat?", true).await? {
                        State::SelectBatch
                    } else {
                        State::Terminate
                    }
                }

                State::Terminate => break,
            };
        }

        info!(
            "Quiz session over: {} asked, {} correct, {} wrong, {} skipped, {} archived, {} errors",
            summary.asked,
            summary.correct,
            summary.wrong,
            summary.skipped,
            summary.archived,
            summary.errors.len()
        );
        Ok(summary)
    }
}
