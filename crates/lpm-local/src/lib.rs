use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lpm_error::{LpmError, Result};
use lpm_utils::write_atomic;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub version: String,
    /// Paths written under the root folder, relative to it.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub integrity: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct RegistryFile {
    packages: BTreeMap<String, RegistryEntry>,
}

/// Record of installed packages, persisted in full after every mutation.
#[derive(Debug)]
pub struct LocalRegistry {
    path: PathBuf,
    state: RegistryFile,
}

impl LocalRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let state = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                LpmError::Registry(format!("cannot parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => RegistryFile::default(),
            Err(e) => {
                return Err(LpmError::Registry(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            state,
        })
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.state)
            .map_err(|e| LpmError::Registry(e.to_string()))?;
        write_atomic(&self.path, content.as_bytes()).map_err(|e| {
            LpmError::Registry(format!("cannot write {}: {e}", self.path.display()))
        })
    }

    #[must_use]
    pub fn list_installed(&self) -> BTreeSet<String> {
        self.state.packages.keys().cloned().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &RegistryEntry)> {
        self.state.packages.iter()
    }

    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.state.packages.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.state.packages.get(name)
    }

    #[must_use]
    pub fn installed_version(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.version.as_str())
    }

    pub fn record_installed(
        &mut self,
        name: &str,
        version: &str,
        files: Vec<String>,
        integrity: String,
    ) -> Result<()> {
        self.state.packages.insert(
            name.to_string(),
            RegistryEntry {
                version: version.to_string(),
                files,
                integrity,
            },
        );
        self.save()
    }

    /// Forgets `name`. Returns the entry that was removed, if any.
    pub fn remove(&mut self, name: &str) -> Result<Option<RegistryEntry>> {
        let removed = self.state.packages.remove(name);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_in(dir: &Path) -> LocalRegistry {
        LocalRegistry::load(&dir.join("installed.json")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_in(dir.path());
        assert!(registry.list_installed().is_empty());
        assert!(!registry.is_installed("lpm"));
    }

    #[test]
    fn test_record_persists_and_upserts() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry_in(dir.path());

        registry
            .record_installed("hello", "1.0", vec!["bin/hello".into()], String::new())
            .unwrap();
        registry
            .record_installed("hello", "1.1", vec!["bin/hello".into()], "abc".into())
            .unwrap();

        let reloaded = registry_in(dir.path());
        assert_eq!(reloaded.installed_version("hello"), Some("1.1"));
        assert_eq!(reloaded.list_installed().len(), 1);
        assert_eq!(reloaded.get("hello").unwrap().integrity, "abc");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry_in(dir.path());
        registry
            .record_installed("hello", "1.0", Vec::new(), String::new())
            .unwrap();

        assert!(registry.remove("hello").unwrap().is_some());
        assert!(registry.remove("hello").unwrap().is_none());
        assert!(registry.remove("never-installed").unwrap().is_none());
        assert!(registry_in(dir.path()).list_installed().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_registry_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("installed.json"), "[1, 2").unwrap();
        let err = LocalRegistry::load(&dir.path().join("installed.json")).unwrap_err();
        assert!(matches!(err, LpmError::Registry(_)));
    }
}
