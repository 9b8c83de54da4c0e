/*!
 * Interactive line-prompt boundary.
 *
 * The quiz engine and ingestion pipeline never touch stdin/stdout directly;
 * they are handed a `Prompter` by the controller. This replaces the ambient
 * readline singleton the tool grew up with: the I/O handle is owned by one
 * session object and threaded through explicitly.
 */

use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-based prompt/response boundary
///
/// All yes/no prompts accept the default on empty input.
#[async_trait]
pub trait Prompter: Send {
    /// Present a question and suspend for a single free-text answer
    async fn ask(&mut self, question: &str) -> Result<String>;

    /// Present a yes/no question; empty input yields `default_yes`
    async fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool> {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{} {}", question, suffix)).await?;
        Ok(interpret_yes_no(&answer, default_yes))
    }

    /// Print a line of output
    fn say(&mut self, line: &str);
}

/// Interpret a yes/no reply; empty or unrecognized input keeps the default
fn interpret_yes_no(answer: &str, default_yes: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default_yes,
    }
}

/// Console prompter over tokio stdin/stdout
pub struct ConsolePrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsolePrompter {
    /// Create a prompter reading from this process's stdin
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn ask(&mut self, question: &str) -> Result<String> {
        println!("{}", question);

        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(anyhow!("Input closed while waiting for an answer")),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Scripted prompter for tests
///
/// Answers are taken from content rules first (first rule whose needle occurs
/// in the question wins), then from a front-to-back queue. Every question and
/// output line is recorded in the transcript.
pub struct ScriptedPrompter {
    rules: Vec<(String, String)>,
    queue: VecDeque<String>,
    /// Everything asked and said, in order
    pub transcript: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter answering from a fixed queue
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: Vec::new(),
            queue: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Add a content rule: questions containing `needle` get `answer`
    pub fn with_rule(mut self, needle: &str, answer: &str) -> Self {
        self.rules.push((needle.to_string(), answer.to_string()));
        self
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, question: &str) -> Result<String> {
        self.transcript.push(format!("? {}", question));

        if let Some((_, answer)) = self
            .rules
            .iter()
            .find(|(needle, _)| question.contains(needle.as_str()))
        {
            return Ok(answer.clone());
        }

        self.queue
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer left for: {}", question))
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }
}
