/*!
 * Error types for the wordflash application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a dictionary-lookup service
#[derive(Error, Debug)]
pub enum LookupError {
    /// Error when making a lookup request fails
    #[error("Lookup request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a lookup response fails
    #[error("Failed to parse lookup response: {0}")]
    ParseError(String),

    /// Error returned by the service itself
    #[error("Lookup service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors raised by the answer matcher
///
/// A malformed headword is corrupt data, not a wrong answer; callers report it
/// distinctly and fall back to exact case-insensitive comparison.
#[derive(Error, Debug)]
pub enum MatcherError {
    /// The stored headword does not fit the required/optional segment shape
    #[error("headword {0:?} does not fit the expected word shape")]
    MalformedTerm(String),
}

/// Errors that can occur during record-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A query against the store failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A write to the store failed
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// Error from the dictionary lookup collaborator
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Error from the answer matcher
    #[error("Matcher error: {0}")]
    Matcher(#[from] MatcherError),

    /// Error from the record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
