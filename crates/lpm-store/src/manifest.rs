use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use lpm_constants::MANIFEST_FILE;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl PackageManifest {
    /// Reads `manifest.json` from a package folder.
    pub fn read(package_dir: &Path) -> io::Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            io::Error::new(e.kind(), format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content).map_err(|e| {
            io::Error::new(e.kind(), format!("invalid {}: {e}", path.display()))
        })
    }

    pub fn from_json(content: &str) -> io::Result<Self> {
        let manifest: Self = serde_json::from_str(content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> io::Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("package name is empty"));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || self.name.starts_with('.')
        {
            return Err(invalid(&format!(
                "package name '{}' contains invalid characters",
                self.name
            )));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("package version is empty"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &Path, json: &str) {
        fs::write(dir.join(MANIFEST_FILE), json).unwrap();
    }

    #[test]
    fn test_reads_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{"name":"hello","version":"1.0","dependencies":["lpm"]}"#,
        );
        let manifest = PackageManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.name, "hello");
        assert_eq!(manifest.dependencies, vec!["lpm".to_string()]);
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name":"../evil","version":"1.0"}"#);
        assert!(PackageManifest::read(dir.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_version() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name":"hello","version":" "}"#);
        assert!(PackageManifest::read(dir.path()).is_err());
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageManifest::read(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
