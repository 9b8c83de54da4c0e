use anyhow::{Context, Result};
use log::{info, warn};

use crate::app_config::Config;
use crate::database::connection::DatabaseConnection;
use crate::database::repository::Repository;
use crate::ingest::IngestPipeline;
use crate::languages::{LanguagePair, expand_pairs};
use crate::lookup::DictionaryProvider;
use crate::prompt::Prompter;
use crate::quiz_engine::{QuizEngine, SessionSummary};

// @module: Application controller wiring menus, quiz sessions and ingestion

/// How to pick words during an `add` session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMethod {
    /// Query the dictionary-lookup service for candidates
    Lookup,
    /// Type both sides of the pair by hand
    Manual,
}

/// After one added word: keep going, change pair, or stop
enum RepeatChoice {
    Again,
    MainMenu,
    Done,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Term repository over the session database
    repo: Repository,
}

impl Controller {
    /// Create a controller, opening the database configured (or the default
    /// per-user location)
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match &config.database.path {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };

        Ok(Self {
            config,
            repo: Repository::new(db),
        })
    }

    /// Create a controller over an in-memory database (for testing)
    pub fn new_in_memory(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            repo: Repository::new_in_memory()?,
        })
    }

    /// The repository backing this controller
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Resolve the working language pair: CLI flags when given, otherwise an
    /// interactive menu over the configured pairs (both directions)
    async fn resolve_pair(
        &self,
        prompter: &mut dyn Prompter,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<LanguagePair> {
        if let (Some(source), Some(target)) = (source, target) {
            return LanguagePair::new(source, target);
        }

        let pairs = expand_pairs(&self.config.seed_pairs()?);

        let mut menu = String::from("What would you like to work on?\n");
        for (i, pair) in pairs.iter().enumerate() {
            menu.push_str(&format!("{}: {}\n", i + 1, pair.label()));
        }
        menu.push_str("Enter a number:");

        loop {
            let answer = prompter.ask(&menu).await?;
            if let Some(pair) = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| pairs.get(i))
            {
                return Ok(pair.clone());
            }
            prompter.say("Please pick one of the listed numbers.");
        }
    }

    /// Run quiz sessions until the user declines another round
    pub async fn run_quiz(
        &self,
        prompter: &mut dyn Prompter,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<SessionSummary> {
        let pair = self.resolve_pair(prompter, source, target).await?;
        info!("Starting quiz: {}", pair.label());

        let summary = QuizEngine::new(&self.repo, prompter, pair)
            .with_batch_size(self.config.quiz.batch_size)
            .with_streak_interval(self.config.quiz.streak_interval)
            .run()
            .await?;

        if !summary.errors.is_empty() {
            warn!(
                "{} term update(s) failed during the session",
                summary.errors.len()
            );
        }
        Ok(summary)
    }

    /// Run the add-words menu until the user is done
    pub async fn run_add(
        &self,
        prompter: &mut dyn Prompter,
        dictionary: &dyn DictionaryProvider,
        source: Option<&str>,
        target: Option<&str>,
        method: Option<IngestMethod>,
    ) -> Result<()> {
        loop {
            let pair = self.resolve_pair(prompter, source, target).await?;
            let chosen_method = match method {
                Some(method) => method,
                None => Self::choose_method(prompter).await?,
            };

            loop {
                let mut pipeline = IngestPipeline::new(&self.repo, dictionary, prompter);
                let result = match chosen_method {
                    IngestMethod::Lookup => {
                        pipeline.add_from_lookup(&pair).await.map(|_report| ())
                    }
                    IngestMethod::Manual => pipeline.add_manual(&pair).await,
                };

                // A failed word should not end the session; report and offer
                // to continue.
                if let Err(err) = result {
                    warn!("Adding a word failed: {:#}", err);
                    prompter.say(&format!("That didn't work: {}", err));
                }

                match Self::ask_repeat(prompter).await? {
                    RepeatChoice::Again => continue,
                    RepeatChoice::MainMenu => break,
                    RepeatChoice::Done => return Ok(()),
                }
            }
        }
    }

    /// Print database statistics
    pub async fn run_stats(&self, prompter: &mut dyn Prompter) -> Result<()> {
        let stats = self
            .repo
            .connection()
            .stats()
            .context("Failed to read database statistics")?;
        prompter.say(&stats.to_string());
        Ok(())
    }

    /// Ask which ingestion method to use (lookup is the default)
    async fn choose_method(prompter: &mut dyn Prompter) -> Result<IngestMethod> {
        loop {
            let answer = prompter
                .ask("Use (1) dictionary lookup or (2) enter manually?")
                .await?;
            match answer.trim() {
                "" | "1" => return Ok(IngestMethod::Lookup),
                "2" => return Ok(IngestMethod::Manual),
                _ => continue,
            }
        }
    }

    /// Ask whether to add another word, change pair, or stop
    async fn ask_repeat(prompter: &mut dyn Prompter) -> Result<RepeatChoice> {
        let answer = prompter
            .ask("Add another word?\n(1) Yes\n(2) No\n(3) Main menu")
            .await?;
        match answer.trim() {
            "1" | "" => Ok(RepeatChoice::Again),
            "3" => Ok(RepeatChoice::MainMenu),
            _ => Ok(RepeatChoice::Done),
        }
    }
}
