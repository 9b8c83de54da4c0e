/*!
 * # wordflash - vocabulary trainer for the terminal
 *
 * A Rust library for building and drilling a personal vocabulary database.
 *
 * ## Features
 *
 * - Word pairs across configurable language pairs
 * - Dictionary-assisted or manual ingestion of translations
 * - Streak-based quizzing: a run of correct answers suggests retiring a term
 * - Answer matching that tolerates optional bracketed fragments
 *   (`"chat (familier)"` accepts "chat" and "chat familier")
 * - SQLite persistence with soft archival
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence:
 *   - `database::connection`: Connection handling and statistics
 *   - `database::schema`: Tables and migrations
 *   - `database::repository`: Typed term and link operations
 * - `matcher`: Answer matching against stored headwords
 * - `quiz_engine`: Quiz session state machine
 * - `ingest`: Ingestion pipeline for new words and links
 * - `lookup`: Dictionary-lookup providers:
 *   - `lookup::wordreference`: WordReference-style HTTP client
 *   - `lookup::mock`: Canned provider for tests
 * - `prompt`: Interactive line-prompt boundary
 * - `languages`: Language pair utilities
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod ingest;
pub mod languages;
pub mod lookup;
pub mod matcher;
pub mod prompt;
pub mod quiz_engine;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use database::models::{TermRecord, TranslationLink};
pub use database::repository::Repository;
pub use errors::{AppError, LookupError, MatcherError, StoreError};
pub use languages::LanguagePair;
pub use matcher::TermPattern;
pub use quiz_engine::{QuizEngine, SessionSummary};
