/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all term and translation-link
 * operations, abstracting away the SQL details and providing type-safe access.
 *
 * Quiz selection and translation resolution semantics:
 * - `fetch_quiz_batch` draws a freshly randomized, limited batch of
 *   non-archived terms for one language on every call.
 * - `fetch_translations` treats links as undirected: a term may sit on either
 *   side of a link, and the other endpoint is resolved and filtered by the
 *   target language.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::{OptionalExtension, Row, params};

use super::connection::DatabaseConnection;
use super::models::{TermRecord, TranslationLink};

/// Columns selected for every term query, in `map_term_row` order
const TERM_COLUMNS: &str =
    "id, headword, language, sense, part, streak, archived, created_at, updated_at";

/// Repository for term and translation-link operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Map a term row in `TERM_COLUMNS` order
    fn map_term_row(row: &Row) -> rusqlite::Result<TermRecord> {
        Ok(TermRecord {
            id: row.get(0)?,
            headword: row.get(1)?,
            language: row.get(2)?,
            sense: row.get(3)?,
            part: row.get(4)?,
            streak: row.get(5)?,
            archived: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    // =========================================================================
    // Quiz Operations
    // =========================================================================

    /// Fetch up to `limit` non-archived terms for a language in random order
    ///
    /// The ordering is re-randomized on every call; a pool smaller than
    /// `limit` yields a short batch, an empty pool an empty one.
    pub async fn fetch_quiz_batch(&self, language: &str, limit: usize) -> Result<Vec<TermRecord>> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    r#"
                    SELECT {TERM_COLUMNS}
                    FROM terms
                    WHERE language = ?1 AND archived = 0
                    ORDER BY RANDOM()
                    LIMIT ?2
                    "#,
                ))?;

                let terms: Vec<TermRecord> = stmt
                    .query_map(params![language, limit as i64], Self::map_term_row)?
                    .collect::<rusqlite::Result<_>>()?;

                debug!("Selected quiz batch of {} terms for '{}'", terms.len(), language);
                Ok(terms)
            })
            .await
    }

    /// Fetch every term linked to `term_id` (from either link direction)
    /// whose language is `target_language`
    ///
    /// Links are collected first and resolved to their other endpoints, then
    /// the endpoint terms are fetched restricted to the target language. A
    /// term participating in zero links yields an empty sequence; duplicate
    /// links collapse to one endpoint.
    pub async fn fetch_translations(
        &self,
        term_id: &str,
        target_language: &str,
    ) -> Result<Vec<TermRecord>> {
        let term_id = term_id.to_string();
        let target_language = target_language.to_string();

        self.db
            .execute_async(move |conn| {
                let mut link_stmt = conn.prepare(
                    r#"
                    SELECT id, from_id, to_id, created_at
                    FROM translation_links
                    WHERE from_id = ?1 OR to_id = ?1
                    "#,
                )?;

                let links: Vec<TranslationLink> = link_stmt
                    .query_map([&term_id], |row| {
                        Ok(TranslationLink {
                            id: row.get(0)?,
                            from_id: row.get(1)?,
                            to_id: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    })?
                    .collect::<rusqlite::Result<_>>()?;

                let mut endpoint_ids: Vec<String> = links
                    .iter()
                    .filter_map(|link| link.other_endpoint(&term_id))
                    .map(str::to_string)
                    .collect();
                endpoint_ids.sort();
                endpoint_ids.dedup();

                if endpoint_ids.is_empty() {
                    return Ok(Vec::new());
                }

                let placeholders = vec!["?"; endpoint_ids.len()].join(", ");
                let mut term_stmt = conn.prepare(&format!(
                    "SELECT {TERM_COLUMNS} FROM terms WHERE language = ? AND id IN ({placeholders})",
                ))?;

                let mut bindings: Vec<String> = Vec::with_capacity(endpoint_ids.len() + 1);
                bindings.push(target_language);
                bindings.extend(endpoint_ids);

                let terms: Vec<TermRecord> = term_stmt
                    .query_map(rusqlite::params_from_iter(bindings), Self::map_term_row)?
                    .collect::<rusqlite::Result<_>>()?;

                Ok(terms)
            })
            .await
    }

    /// Persist a new streak value; does not alter the archived flag
    pub async fn update_streak(&self, term_id: &str, streak: i64) -> Result<()> {
        let term_id = term_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let updated = conn.execute(
                    "UPDATE terms SET streak = ?1, updated_at = ?2 WHERE id = ?3",
                    params![streak, now, term_id],
                )?;

                if updated == 0 {
                    return Err(anyhow::anyhow!("No term with id {} to update", term_id));
                }
                Ok(())
            })
            .await
    }

    /// Archive a term: sets `archived = true` and resets the streak to zero
    /// in a single statement, so no reader can observe one without the other
    pub async fn archive(&self, term_id: &str) -> Result<()> {
        let term_id = term_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let updated = conn.execute(
                    "UPDATE terms SET archived = 1, streak = 0, updated_at = ?1 WHERE id = ?2",
                    params![now, term_id],
                )?;

                if updated == 0 {
                    return Err(anyhow::anyhow!("No term with id {} to archive", term_id));
                }
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Ingestion Operations
    // =========================================================================

    /// Insert a term, or return the existing one matching the natural key
    /// `(headword, language, sense, part)`
    ///
    /// On conflict only `updated_at` is touched; streak and archived state of
    /// an existing term survive re-ingestion. The persisted record (with its
    /// stable id) is returned either way.
    pub async fn upsert_term(&self, record: &TermRecord) -> Result<TermRecord> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                let term = conn
                    .query_row(
                        &format!(
                            r#"
                            INSERT INTO terms (id, headword, language, sense, part, streak,
                                               archived, created_at, updated_at)
                            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                            ON CONFLICT(headword, language, sense, part)
                            DO UPDATE SET updated_at = excluded.updated_at
                            RETURNING {TERM_COLUMNS}
                            "#,
                        ),
                        params![
                            record.id,
                            record.headword,
                            record.language,
                            record.sense,
                            record.part,
                            record.streak,
                            record.archived,
                            record.created_at,
                            record.updated_at,
                        ],
                        Self::map_term_row,
                    )
                    .context("Term upsert returned no row")?;

                Ok(term)
            })
            .await
    }

    /// Upsert a translation link between two existing terms
    ///
    /// Re-linking the same ordered pair is a no-op; links are never duplicated
    /// for one direction. Returns true if a new link row was created.
    pub async fn upsert_link(&self, from_id: &str, to_id: &str) -> Result<bool> {
        let link = TranslationLink::new(from_id.to_string(), to_id.to_string());

        self.db
            .execute_async(move |conn| {
                let inserted = conn.execute(
                    r#"
                    INSERT INTO translation_links (id, from_id, to_id, created_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(from_id, to_id) DO NOTHING
                    "#,
                    params![link.id, link.from_id, link.to_id, link.created_at],
                )?;

                Ok(inserted > 0)
            })
            .await
    }

    /// Get a term by id
    pub async fn get_term(&self, term_id: &str) -> Result<Option<TermRecord>> {
        let term_id = term_id.to_string();

        self.db
            .execute_async(move |conn| {
                let term = conn
                    .query_row(
                        &format!("SELECT {TERM_COLUMNS} FROM terms WHERE id = ?1"),
                        [&term_id],
                        Self::map_term_row,
                    )
                    .optional()?;

                Ok(term)
            })
            .await
    }

    /// Count the non-archived terms available for quizzing in a language
    pub async fn quiz_pool_size(&self, language: &str) -> Result<i64> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM terms WHERE language = ?1 AND archived = 0",
                    [&language],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await
    }
}
