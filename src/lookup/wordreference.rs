/*!
 * WordReference-style dictionary lookup client.
 *
 * Talks to a JSON endpoint shaped like the community WordReference API:
 * `GET {base}/{from}{to}/{word}` returning the nested translation-group
 * payload in `lookup::LookupResponse`.
 */

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{DictionaryProvider, LookupResponse};
use crate::errors::LookupError;

/// Default number of retry attempts for transient failures
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base backoff in milliseconds between retries
const BACKOFF_BASE_MS: u64 = 500;

/// WordReference lookup client
pub struct WordReference {
    /// Base URL of the lookup endpoint
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
}

impl WordReference {
    /// Create a new client for the given endpoint with a request timeout
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, LookupError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| LookupError::RequestFailed(format!("Invalid endpoint URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LookupError::ConnectionError(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the retry count
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Build the lookup URL for one word and language direction
    fn lookup_url(&self, word: &str, from: &str, to: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::RequestFailed("Endpoint cannot be a base URL".to_string()))?
            .push(&format!("{}{}", from, to))
            .push(word);
        Ok(url)
    }

    /// Perform one request without retry handling
    async fn lookup_once(&self, url: Url) -> Result<LookupResponse, LookupError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                LookupError::ConnectionError(e.to_string())
            } else {
                LookupError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<LookupResponse>()
            .await
            .map_err(|e| LookupError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DictionaryProvider for WordReference {
    async fn lookup(
        &self,
        word: &str,
        from_language: &str,
        to_language: &str,
    ) -> Result<LookupResponse, LookupError> {
        let url = self.lookup_url(word, from_language, to_language)?;
        debug!("Dictionary lookup: {}", url);

        let mut attempt = 0;
        loop {
            match self.lookup_once(url.clone()).await {
                Ok(response) => return Ok(response),
                // Retry only transient connection problems
                Err(LookupError::ConnectionError(message)) if attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = BACKOFF_BASE_MS * u64::from(attempt);
                    warn!(
                        "Lookup attempt {} failed ({}), retrying in {} ms",
                        attempt, message, backoff
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
