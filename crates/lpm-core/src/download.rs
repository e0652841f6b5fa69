use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lpm_constants::USER_AGENT;
use lpm_error::{LpmError, Result};
use lpm_registry::CatalogEntry;
use lpm_utils::{SourceLocation, ensure_dir_exists, staging_path};

/// A package file ready to be unpacked.
#[derive(Debug)]
pub struct Artifact {
    pub path: PathBuf,
    /// The file lives in the temp folder and belongs to this install.
    downloaded: bool,
}

impl Artifact {
    pub fn discard(self) {
        if self.downloaded {
            let _ = fs::remove_file(&self.path);
        }
    }
}

pub struct DownloadClient {
    client: reqwest::Client,
}

impl DownloadClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .connect_timeout(Duration::from_secs(20))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Local sources are used in place; remote ones are downloaded into `temp`.
    pub fn fetch(&self, entry: &CatalogEntry, temp: &Path, debug: bool) -> Result<Artifact> {
        match SourceLocation::parse(&entry.url) {
            SourceLocation::Local(path) => {
                if !path.is_file() {
                    return Err(LpmError::Download(
                        entry.name.clone(),
                        format!("{} does not exist", path.display()),
                    ));
                }
                lpm_logger::debug(&format!("Using local artifact {}", path.display()), debug);
                Ok(Artifact {
                    path,
                    downloaded: false,
                })
            }
            SourceLocation::Remote(url) => {
                ensure_dir_exists(temp)
                    .map_err(|e| LpmError::Download(entry.name.clone(), e.to_string()))?;
                let dest = temp.join(format!("{}-{}.download", entry.name, entry.version));
                self.download_sync(entry, &url, &dest, debug)?;
                Ok(Artifact {
                    path: dest,
                    downloaded: true,
                })
            }
        }
    }

    fn download_sync(&self, entry: &CatalogEntry, url: &str, dest: &Path, debug: bool) -> Result<()> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(LpmError::Download(
                entry.name.clone(),
                "download_sync called from async context".to_string(),
            ));
        }

        let rt = tokio::runtime::Runtime::new().map_err(|e| {
            LpmError::Download(
                entry.name.clone(),
                format!("Failed to create async runtime: {e}"),
            )
        })?;

        let bytes = rt.block_on(self.download(entry, url, debug))?;

        // Written beside the destination first so a failed write leaves nothing behind.
        let tmp = staging_path(dest);
        fs::write(&tmp, &bytes)
            .and_then(|()| fs::rename(&tmp, dest))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                LpmError::Download(entry.name.clone(), format!("cannot save download: {e}"))
            })
    }

    async fn download(&self, entry: &CatalogEntry, url: &str, debug: bool) -> Result<Vec<u8>> {
        if !debug {
            lpm_logger::status(&format!("Downloading {}@{}...", entry.name, entry.version));
        }

        let resp = self.client.get(url).send().await.map_err(|e| {
            lpm_logger::debug(
                &format!("Network request failed for {}: {e}", entry.name),
                debug,
            );
            LpmError::Download(entry.name.clone(), e.to_string())
        })?;

        if !resp.status().is_success() {
            return Err(LpmError::Download(
                entry.name.clone(),
                format!("HTTP {} for {url}", resp.status()),
            ));
        }

        let bytes = resp.bytes().await.map_err(|e| {
            lpm_logger::debug(
                &format!("Failed to read response bytes for {}: {e}", entry.name),
                debug,
            );
            LpmError::Download(entry.name.clone(), e.to_string())
        })?;

        lpm_logger::debug(
            &format!(
                "Downloaded {}@{} ({} bytes)",
                entry.name,
                entry.version,
                bytes.len()
            ),
            debug,
        );
        Ok(bytes.to_vec())
    }
}

impl Default for DownloadClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;

    fn entry(url: String) -> CatalogEntry {
        CatalogEntry {
            name: "hello".to_string(),
            version: "1.0".to_string(),
            url,
            description: None,
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn test_remote_download_lands_in_temp() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/hello.lpkg");
            then.status(200).body("payload-bytes");
        });
        let temp = tempfile::tempdir().unwrap();

        let artifact = DownloadClient::new()
            .fetch(&entry(server.url("/hello.lpkg")), temp.path(), false)
            .unwrap();

        assert!(artifact.path.starts_with(temp.path()));
        assert_eq!(fs::read(&artifact.path).unwrap(), b"payload-bytes");
        let path = artifact.path.clone();
        artifact.discard();
        assert!(!path.exists());
    }

    #[test]
    fn test_http_error_is_download_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/gone.lpkg");
            then.status(404);
        });
        let temp = tempfile::tempdir().unwrap();

        let err = DownloadClient::new()
            .fetch(&entry(server.url("/gone.lpkg")), temp.path(), false)
            .unwrap_err();

        assert!(matches!(err, LpmError::Download(..)));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_local_artifact_is_not_discarded() {
        let temp = tempfile::tempdir().unwrap();
        let local = temp.path().join("hello-1.0.lpkg");
        fs::write(&local, "x").unwrap();

        let artifact = DownloadClient::new()
            .fetch(&entry(local.display().to_string()), temp.path(), false)
            .unwrap();
        artifact.discard();

        assert!(local.exists());
    }

    #[test]
    fn test_missing_local_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let err = DownloadClient::new()
            .fetch(&entry("/nope/hello.lpkg".to_string()), temp.path(), false)
            .unwrap_err();
        assert!(matches!(err, LpmError::Download(..)));
    }
}
