use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lpm_error::{LpmError, Result};
use lpm_utils::write_atomic;

use crate::catalog::{Catalog, CatalogEntry};

/// Last synchronized catalog, backed by the index file in the config folder.
#[derive(Debug)]
pub struct IndexCache {
    path: PathBuf,
    catalog: Catalog,
}

impl IndexCache {
    /// Opens the cache. A missing index file yields an empty catalog.
    pub fn open(path: &Path) -> Result<Self> {
        let catalog = match fs::read_to_string(path) {
            Ok(content) => Catalog::parse(&content).map_err(|e| {
                LpmError::Sync(format!(
                    "index cache {} is corrupt ({e}), run 'lpm reload'",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Catalog::default(),
            Err(e) => {
                return Err(LpmError::Sync(format!(
                    "cannot read index cache {}: {e}",
                    path.display()
                )));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            catalog,
        })
    }

    /// An empty cache that will be written to `path` on the first replace.
    #[must_use]
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            catalog: Catalog::default(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.catalog.get(name)
    }

    /// Swaps in a new catalog. The file is replaced atomically first, so a
    /// failed write leaves both the file and the in-memory catalog untouched.
    pub fn replace(&mut self, catalog: Catalog) -> Result<()> {
        let content = catalog
            .to_json()
            .map_err(|e| LpmError::Sync(e.to_string()))?;
        write_atomic(&self.path, content.as_bytes()).map_err(|e| {
            LpmError::Sync(format!(
                "cannot write index cache {}: {e}",
                self.path.display()
            ))
        })?;
        self.catalog = catalog;
        Ok(())
    }
}
