use anyhow::{Context, Result};
use std::time::Duration;

use crate::error::{FetchError, LookupKind};
use crate::models::word::{self, WordEntry};
use crate::utils::strip_end;

/// Public Datamuse API base URL
pub const DATAMUSE_API_URL: &str = "https://api.datamuse.com";

/// Client for the Datamuse word lookup endpoints
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    client: reqwest::Client,
    api_url: String,
}

impl DatamuseClient {
    /// Create a client against `api_url` whose requests give up after `timeout`
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            client,
            api_url: strip_end(api_url, '/'),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Words that complete `prefix`, most relevant first
    pub async fn complete(&self, prefix: &str) -> Result<Vec<String>, FetchError> {
        self.lookup(LookupKind::Completion, "sug", "s", prefix).await
    }

    /// Words that sound like `prefix`. Not anchored to the prefix.
    pub async fn sounds_like(&self, prefix: &str) -> Result<Vec<String>, FetchError> {
        self.lookup(LookupKind::SoundsLike, "words", "sl", prefix).await
    }

    async fn lookup(
        &self,
        kind: LookupKind,
        path: &str,
        param: &str,
        prefix: &str,
    ) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/{}", self.api_url, path);

        log::debug!("Fetching {} lookup: {}?{}={}", kind, url, param, prefix);

        let response = self
            .client
            .get(&url)
            .query(&[(param, prefix)])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(kind, e))?;

        let entries: Vec<WordEntry> =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode { kind, source })?;

        log::debug!("{} lookup for {:?} returned {} words", kind, prefix, entries.len());

        Ok(word::words(entries))
    }
}
