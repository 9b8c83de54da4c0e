/*!
 * Database module for persistent storage of terms and translation links.
 *
 * This module provides SQLite-based persistence for:
 * - Vocabulary terms with per-term quiz state (streak, archived)
 * - Undirected translation links between terms
 */

// Allow dead code and unused imports - database types are for library consumers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
