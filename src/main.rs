// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{Controller, IngestMethod};
use crate::lookup::WordReference;
use crate::prompt::ConsolePrompter;

mod app_config;
mod app_controller;
mod database;
mod errors;
mod ingest;
mod languages;
mod lookup;
mod matcher;
mod prompt;
mod quiz_engine;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run quiz sessions over the stored vocabulary
    Quiz(QuizArgs),

    /// Add word pairs, via dictionary lookup or manual entry
    Add(AddArgs),

    /// Show database statistics
    Stats,

    /// Generate shell completions for wordflash
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct QuizArgs {
    /// Source language code to be quizzed on (e.g., 'en')
    #[arg(short, long, requires = "target_language")]
    source_language: Option<String>,

    /// Target language code to answer in (e.g., 'fr')
    #[arg(short, long, requires = "source_language")]
    target_language: Option<String>,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Source language code (e.g., 'en')
    #[arg(short, long, requires = "target_language")]
    source_language: Option<String>,

    /// Target language code (e.g., 'fr')
    #[arg(short, long, requires = "source_language")]
    target_language: Option<String>,

    /// Skip the method menu and use dictionary lookup
    #[arg(long, conflicts_with = "manual")]
    lookup: bool,

    /// Skip the method menu and enter words manually
    #[arg(long)]
    manual: bool,
}

/// wordflash - vocabulary trainer for the terminal
///
/// Builds a personal vocabulary database of word pairs and quizzes you on
/// them, retiring words you keep getting right.
#[derive(Parser, Debug)]
#[command(name = "wordflash")]
#[command(version)]
#[command(about = "Streak-based vocabulary trainer")]
#[command(long_about = "wordflash keeps a personal vocabulary database of word pairs and quizzes
you on them. Answer a word correctly often enough in a row and wordflash
offers to retire it from future quizzes.

EXAMPLES:
    wordflash quiz                         # Pick a language pair, then drill
    wordflash quiz -s en -t fr             # Quiz English words, answer in French
    wordflash add                          # Add words via dictionary lookup
    wordflash add --manual -s en -t es     # Type word pairs by hand
    wordflash stats                        # Show database statistics
    wordflash completions bash > wf.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Database file path (overrides the configured location)
    #[arg(short, long, global = true)]
    db_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        Ok(config)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // updated after the config is loaded.
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Completions need no config or database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "wordflash", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration and apply CLI overrides
    let mut config = load_or_create_config(&cli.config_path)?;

    if let Some(db_path) = &cli.db_path {
        config.database.path = Some(db_path.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create controller and session I/O
    let controller = Controller::with_config(config.clone())?;
    let mut prompter = ConsolePrompter::new();

    match cli.command {
        Commands::Quiz(args) => {
            controller
                .run_quiz(
                    &mut prompter,
                    args.source_language.as_deref(),
                    args.target_language.as_deref(),
                )
                .await?;
        }
        Commands::Add(args) => {
            let dictionary =
                WordReference::new(&config.lookup.endpoint, config.lookup.timeout_secs)
                    .map_err(|e| anyhow::anyhow!("Failed to build lookup client: {}", e))?;

            let method = if args.lookup {
                Some(IngestMethod::Lookup)
            } else if args.manual {
                Some(IngestMethod::Manual)
            } else {
                None
            };

            controller
                .run_add(
                    &mut prompter,
                    &dictionary,
                    args.source_language.as_deref(),
                    args.target_language.as_deref(),
                    method,
                )
                .await?;
        }
        Commands::Stats => {
            controller.run_stats(&mut prompter).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
