use std::fs;
use std::time::Duration;

use lpm_constants::{MAX_ATTEMPTS, USER_AGENT};
use lpm_error::{LpmError, Result};
use lpm_utils::SourceLocation;

use crate::catalog::Catalog;

/// Fetches and parses a package index from a URL or a local file.
pub struct IndexFetcher {
    client: reqwest::Client,
    max_attempts: u32,
    backoff: Duration,
}

impl IndexFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_retry(MAX_ATTEMPTS, Duration::from_millis(1000))
    }

    #[must_use]
    pub fn with_retry(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(45))
                .connect_timeout(Duration::from_secs(20))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn fetch(&self, location: &str) -> Result<Catalog> {
        match SourceLocation::parse(location) {
            SourceLocation::Local(path) => {
                let text = fs::read_to_string(&path).map_err(|e| {
                    LpmError::Sync(format!("cannot read {}: {e}", path.display()))
                })?;
                parse_document(location, &text)
            }
            SourceLocation::Remote(url) => {
                if tokio::runtime::Handle::try_current().is_ok() {
                    return Err(LpmError::Sync(
                        "IndexFetcher::fetch called from async context".to_string(),
                    ));
                }
                let rt = tokio::runtime::Runtime::new().map_err(|e| {
                    LpmError::Sync(format!("Failed to create async runtime: {e}"))
                })?;
                let text = rt.block_on(self.fetch_text(&url))?;
                parse_document(&url, &text)
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        std::cmp::min(self.backoff * attempt, self.backoff * 5)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let resp = match self
                .client
                .get(url)
                .header("Accept", "application/json")
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < self.max_attempts && (e.is_connect() || e.is_timeout()) {
                        tokio::time::sleep(self.delay(attempts)).await;
                        continue;
                    }
                    return Err(LpmError::Sync(if e.is_timeout() {
                        format!("request to {url} timed out after {attempts} attempts")
                    } else if e.is_connect() {
                        format!("connection to {url} failed: {e}")
                    } else {
                        format!("network error for {url}: {e}")
                    }));
                }
            };

            let resp = match resp.error_for_status() {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < self.max_attempts
                        && matches!(
                            e.status(),
                            Some(
                                reqwest::StatusCode::TOO_MANY_REQUESTS
                                    | reqwest::StatusCode::INTERNAL_SERVER_ERROR
                                    | reqwest::StatusCode::SERVICE_UNAVAILABLE
                            )
                        )
                    {
                        tokio::time::sleep(self.delay(attempts)).await;
                        continue;
                    }
                    return Err(LpmError::Sync(format!("HTTP error for {url}: {e}")));
                }
            };

            return resp
                .text()
                .await
                .map_err(|e| LpmError::Sync(format!("failed to read response from {url}: {e}")));
        }
    }
}

impl Default for IndexFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_document(source: &str, text: &str) -> Result<Catalog> {
    Catalog::parse(text).map_err(|e| {
        LpmError::Sync(format!(
            "malformed index from {source} (length: {}): {e}",
            text.len()
        ))
    })
}
