use std::io;
use std::path::{Path, PathBuf};

use lpm_constants::{CONFIG_FILE, INDEX_FILE, INSTALLED_FILE};
use lpm_utils::ensure_dir_exists;

/// The three folder roles every engine works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    /// Holds the config file, the package index and the installed registry.
    pub config: PathBuf,
    /// Download and build staging.
    pub temp: PathBuf,
    /// Install destination tree.
    pub root: PathBuf,
}

impl Folders {
    /// Derives the layout from the host's save and download paths.
    #[must_use]
    pub fn from_host(save_path: &Path, download_path: &Path) -> Self {
        Self {
            config: save_path.join("var").join("lpm"),
            temp: download_path.join("apkg"),
            root: save_path.to_path_buf(),
        }
    }

    pub fn create_all(&self) -> io::Result<()> {
        ensure_dir_exists(&self.config)?;
        ensure_dir_exists(&self.temp)?;
        ensure_dir_exists(&self.root)?;
        Ok(())
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.config.join(INDEX_FILE)
    }

    #[must_use]
    pub fn installed_file(&self) -> PathBuf {
        self.config.join(INSTALLED_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_layout() {
        let folders = Folders::from_host(Path::new("/save"), Path::new("/dl"));
        assert_eq!(folders.config, PathBuf::from("/save/var/lpm"));
        assert_eq!(folders.temp, PathBuf::from("/dl/apkg"));
        assert_eq!(folders.root, PathBuf::from("/save"));
        assert_eq!(folders.index_file(), PathBuf::from("/save/var/lpm/index.json"));
    }

    #[test]
    fn test_create_all() {
        let dir = tempfile::tempdir().unwrap();
        let folders = Folders::from_host(&dir.path().join("save"), &dir.path().join("dl"));
        folders.create_all().unwrap();
        assert!(folders.config.is_dir());
        assert!(folders.temp.is_dir());
        assert!(folders.root.is_dir());
    }
}
