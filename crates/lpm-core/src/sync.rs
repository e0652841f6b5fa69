use lpm_error::Result;
use lpm_registry::{IndexCache, IndexFetcher};
use lpm_settings::Context;

pub struct SyncManager<'a> {
    ctx: &'a Context,
    fetcher: IndexFetcher,
}

impl<'a> SyncManager<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self::with_fetcher(ctx, IndexFetcher::new())
    }

    pub fn with_fetcher(ctx: &'a Context, fetcher: IndexFetcher) -> Self {
        Self { ctx, fetcher }
    }

    /// Fetches the configured index and replaces the local index cache.
    /// On failure the previous cache is left exactly as it was.
    pub fn reload(&self) -> Result<usize> {
        let location = self.ctx.config.repository();
        lpm_logger::status(&format!("Synchronizing package index from {location}..."));

        let catalog = self.fetcher.fetch(location)?;
        let count = catalog.len();

        let path = self.ctx.folders.index_file();
        // A corrupt cache is about to be overwritten anyway.
        let mut cache = IndexCache::open(&path).unwrap_or_else(|_| IndexCache::empty(&path));
        cache.replace(catalog)?;

        lpm_logger::debug(
            &format!("Wrote {count} index entries to {}", path.display()),
            self.ctx.debug(),
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Sandbox, catalog_entry};
    use httpmock::MockServer;
    use lpm_error::LpmError;
    use std::fs;
    use std::time::Duration;

    fn fetcher() -> IndexFetcher {
        IndexFetcher::with_retry(1, Duration::from_millis(1))
    }

    #[test]
    fn test_reload_replaces_index() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/index.json");
            then.status(200).body(
                r#"{"packages":[{"name":"hello","version":"2.0","url":"https://example.com/h.lpkg"}]}"#,
            );
        });
        let mut sandbox = Sandbox::new();
        sandbox.write_index(&[catalog_entry("stale", "1.0", sandbox.path())]);
        sandbox.ctx.config.repository_url = Some(server.url("/index.json"));

        let count = SyncManager::with_fetcher(&sandbox.ctx, fetcher())
            .reload()
            .unwrap();

        assert_eq!(count, 1);
        let cache = IndexCache::open(&sandbox.ctx.folders.index_file()).unwrap();
        assert!(cache.get("stale").is_none());
        assert_eq!(cache.get("hello").unwrap().version, "2.0");
    }

    #[test]
    fn test_failed_reload_keeps_previous_index() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/index.json");
            then.status(500);
        });
        let mut sandbox = Sandbox::new();
        sandbox.write_index(&[catalog_entry("hello", "1.0", sandbox.path())]);
        let before = fs::read(sandbox.ctx.folders.index_file()).unwrap();
        sandbox.ctx.config.repository_url = Some(server.url("/index.json"));

        let err = SyncManager::with_fetcher(&sandbox.ctx, fetcher())
            .reload()
            .unwrap_err();

        assert!(matches!(err, LpmError::Sync(_)));
        assert_eq!(fs::read(sandbox.ctx.folders.index_file()).unwrap(), before);
    }

    #[test]
    fn test_malformed_index_keeps_previous_index() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/index.json");
            then.status(200).body("<html>oops</html>");
        });
        let mut sandbox = Sandbox::new();
        sandbox.write_index(&[catalog_entry("hello", "1.0", sandbox.path())]);
        let before = fs::read(sandbox.ctx.folders.index_file()).unwrap();
        sandbox.ctx.config.repository_url = Some(server.url("/index.json"));

        assert!(
            SyncManager::with_fetcher(&sandbox.ctx, fetcher())
                .reload()
                .is_err()
        );
        assert_eq!(fs::read(sandbox.ctx.folders.index_file()).unwrap(), before);
    }

    #[test]
    fn test_reload_repairs_corrupt_cache() {
        let mut sandbox = Sandbox::new();
        fs::write(sandbox.ctx.folders.index_file(), "corrupt").unwrap();
        let mirror = sandbox.path().join("mirror.json");
        fs::write(
            &mirror,
            r#"[{"name":"hello","version":"1.0","url":"./hello.lpkg"}]"#,
        )
        .unwrap();
        sandbox.ctx.config.repository_url = Some(mirror.display().to_string());

        SyncManager::with_fetcher(&sandbox.ctx, fetcher())
            .reload()
            .unwrap();

        let cache = IndexCache::open(&sandbox.ctx.folders.index_file()).unwrap();
        assert!(cache.get("hello").is_some());
    }
}
