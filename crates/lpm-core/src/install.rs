use std::collections::HashSet;
use std::path::Path;

use lpm_constants::PAYLOAD_DIR;
use lpm_error::{LpmError, Result};
use lpm_local::LocalRegistry;
use lpm_registry::{CatalogEntry, IndexCache};
use lpm_settings::Context;
use lpm_store::{
    apply_payload, file_digest, list_payload, read_artifact_manifest, remove_files, unpack_artifact,
};
use lpm_utils::version_greater;

use crate::download::DownloadClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { version: String },
    Upgraded { from: String, to: String },
    UpToDate { version: String },
}

impl InstallOutcome {
    /// Whether the filesystem or registry was touched.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::UpToDate { .. })
    }
}

pub struct InstallManager<'a> {
    ctx: &'a Context,
    downloader: DownloadClient,
}

impl<'a> InstallManager<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            downloader: DownloadClient::new(),
        }
    }

    /// Installs `name` from the index, or upgrades it if the index has a
    /// higher version than the one installed.
    pub fn install(&self, name: &str) -> Result<InstallOutcome> {
        let index = IndexCache::open(&self.ctx.folders.index_file())?;
        let entry = index
            .get(name)
            .cloned()
            .ok_or_else(|| LpmError::NotFound(name.to_string()))?;

        let mut registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;
        self.install_entry(&entry, &mut registry)
    }

    /// Installs a package file directly, going through the same steps as an
    /// index install with the file as the source location.
    pub fn install_local(&self, artifact: &Path) -> Result<InstallOutcome> {
        let manifest = read_artifact_manifest(artifact).map_err(|e| {
            LpmError::InstallApply(artifact.display().to_string(), e.to_string())
        })?;
        let source = artifact
            .canonicalize()
            .unwrap_or_else(|_| artifact.to_path_buf());

        let entry = CatalogEntry {
            name: manifest.name,
            version: manifest.version,
            url: source.display().to_string(),
            description: manifest.description,
            dependencies: manifest.dependencies,
        };

        let mut registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;
        self.install_entry(&entry, &mut registry)
    }

    pub(crate) fn install_entry(
        &self,
        entry: &CatalogEntry,
        registry: &mut LocalRegistry,
    ) -> Result<InstallOutcome> {
        let debug = self.ctx.debug();
        let previous = registry.get(&entry.name).cloned();

        if let Some(prev) = &previous {
            if !version_greater(&entry.version, &prev.version) {
                lpm_logger::debug(
                    &format!(
                        "{} {} is installed, index has {}",
                        entry.name, prev.version, entry.version
                    ),
                    debug,
                );
                return Ok(InstallOutcome::UpToDate {
                    version: prev.version.clone(),
                });
            }
        }

        for dep in missing_dependencies(entry, registry) {
            lpm_logger::warn(&format!(
                "{} depends on '{dep}', which is not installed",
                entry.name
            ));
        }

        let artifact = self
            .downloader
            .fetch(entry, &self.ctx.folders.temp, debug)?;
        let applied = self.apply(entry, &artifact.path, registry);
        let integrity = match file_digest(&artifact.path) {
            Ok(digest) => digest,
            Err(e) => {
                lpm_logger::warn(&format!(
                    "cannot compute digest of {}: {e}",
                    artifact.path.display()
                ));
                String::new()
            }
        };
        artifact.discard();
        let files = applied?;

        // Files are in place; only now does the registry learn about them.
        registry.record_installed(&entry.name, &entry.version, files.clone(), integrity)?;

        // Stale files go last: a failure here leaves unregistered files
        // behind, never registered ones missing.
        if let Some(prev) = &previous {
            let current: HashSet<&String> = files.iter().collect();
            let stale: Vec<String> = prev
                .files
                .iter()
                .filter(|f| !current.contains(f))
                .cloned()
                .collect();
            for (rel, e) in remove_files(&self.ctx.folders.root, &stale) {
                lpm_logger::warn(&format!(
                    "could not remove old file {rel} of {}: {e}",
                    entry.name
                ));
            }
        }

        Ok(match previous {
            Some(prev) => InstallOutcome::Upgraded {
                from: prev.version,
                to: entry.version.clone(),
            },
            None => InstallOutcome::Installed {
                version: entry.version.clone(),
            },
        })
    }

    fn apply(
        &self,
        entry: &CatalogEntry,
        artifact: &Path,
        registry: &LocalRegistry,
    ) -> Result<Vec<String>> {
        let fail = |reason: String| LpmError::InstallApply(entry.name.clone(), reason);
        let debug = self.ctx.debug();

        lpm_logger::status(&format!("Installing {}@{}...", entry.name, entry.version));

        let staging = tempfile::Builder::new()
            .prefix("lpm-install-")
            .tempdir_in(&self.ctx.folders.temp)
            .map_err(|e| fail(format!("cannot create staging folder: {e}")))?;
        let unpacked = staging.path().join("package");

        let manifest = unpack_artifact(artifact, &unpacked)
            .map_err(|e| fail(format!("cannot unpack {}: {e}", artifact.display())))?;
        if manifest.name != entry.name {
            return Err(fail(format!(
                "artifact contains package '{}'",
                manifest.name
            )));
        }
        if manifest.version != entry.version {
            lpm_logger::warn(&format!(
                "index lists {} {} but the package says {}",
                entry.name, entry.version, manifest.version
            ));
        }

        let payload = unpacked.join(PAYLOAD_DIR);
        if !payload.is_dir() {
            return Err(fail(format!("artifact has no '{PAYLOAD_DIR}' directory")));
        }

        let incoming = list_payload(&payload)
            .map_err(|e| fail(format!("cannot read payload: {e}")))?;
        if let Some((rel, owner)) = first_conflict(entry, &incoming, registry) {
            return Err(fail(format!("{rel} belongs to installed package '{owner}'")));
        }

        let files = apply_payload(
            &payload,
            &self.ctx.folders.root,
            &staging.path().join("backup"),
        )
        .map_err(|e| fail(e.to_string()))?;

        lpm_logger::debug(
            &format!("Wrote {} files for {}", files.len(), entry.name),
            debug,
        );
        Ok(files)
    }
}

/// A payload file already recorded for a different installed package.
fn first_conflict<'r>(
    entry: &CatalogEntry,
    incoming: &[String],
    registry: &'r LocalRegistry,
) -> Option<(String, &'r str)> {
    let incoming: HashSet<&String> = incoming.iter().collect();
    registry
        .entries()
        .filter(|(name, _)| **name != entry.name)
        .find_map(|(name, installed)| {
            installed
                .files
                .iter()
                .find(|f| incoming.contains(f))
                .map(|f| (f.clone(), name.as_str()))
        })
}

fn missing_dependencies<'e>(entry: &'e CatalogEntry, registry: &LocalRegistry) -> Vec<&'e str> {
    entry
        .dependencies
        .iter()
        .map(String::as_str)
        .filter(|dep| *dep != entry.name && !registry.is_installed(dep))
        .collect()
}
