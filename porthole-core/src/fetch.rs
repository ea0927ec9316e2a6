//! Remote file fetching.
//!
//! One concern: get a URL onto the local disk. A destination that already
//! exists is reused untouched, so callers stay idempotent and an operator can
//! pin a hand-edited copy by simply putting the file in place.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::FetchError;

/// Outcome of a [`Fetcher::fetch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination was downloaded fresh.
    Downloaded,
    /// The destination already existed; the network was not touched.
    Reused,
}

/// HTTP fetcher with a fixed per-request timeout. Cloning shares the
/// underlying client.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher whose requests abort after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("porthole/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Download `url` to `dest`, or reuse `dest` if it already exists.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchOutcome, FetchError> {
        if dest.exists() {
            debug!(path = %dest.display(), "reusing existing local copy");
            return Ok(FetchOutcome::Reused);
        }
        self.download(url, dest).await?;
        Ok(FetchOutcome::Downloaded)
    }

    /// Download `url` to `dest` unconditionally, replacing any existing file.
    pub async fn refetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        self.download(url, dest).await
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        debug!(url, path = %dest.display(), "downloading");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::Write {
                    path: dest.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(dest, &body)
            .await
            .map_err(|source| FetchError::Write {
                path: dest.to_path_buf(),
                source,
            })?;

        debug!(path = %dest.display(), bytes = body.len(), "download complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Reserve a port by binding and dropping a listener, so the URL below
    // refuses connections instead of reaching anything real.
    fn refused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/endpoints.json")
    }

    #[tokio::test]
    async fn existing_destination_is_reused_without_network() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("endpoints.json");
        std::fs::write(&dest, "{\"partitions\": []}").unwrap();

        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let outcome = fetcher.fetch(&refused_url(), &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Reused);
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "{\"partitions\": []}"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("endpoints.json");

        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&refused_url(), &dest).await.unwrap_err();

        assert!(matches!(err, FetchError::Request { .. }), "got {err:?}");
        assert!(!dest.exists(), "no file should appear on failure");
    }
}
