use std::fs;
use std::path::{Path, PathBuf};

use lpm_constants::{MANIFEST_FILE, PAYLOAD_DIR};
use lpm_local::LocalRegistry;
use lpm_registry::{Catalog, CatalogEntry, IndexCache};
use lpm_settings::{Config, Context, Folders};

pub struct Sandbox {
    dir: tempfile::TempDir,
    pub ctx: Context,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let folders = Folders::from_host(&dir.path().join("save"), &dir.path().join("downloads"));
        folders.create_all().unwrap();
        let config = Config {
            debug_mode: true,
            ..Config::default()
        };
        Self {
            dir,
            ctx: Context::new(config, folders),
        }
    }

    /// Packs a package with the given payload files and returns the artifact path.
    pub fn build_package(&self, name: &str, version: &str, files: &[(&str, &str)]) -> PathBuf {
        let src = self.dir.path().join("sources").join(format!("{name}-{version}"));
        for (rel, content) in files {
            let path = src.join(PAYLOAD_DIR).join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        fs::create_dir_all(src.join(PAYLOAD_DIR)).unwrap();
        fs::write(
            src.join(MANIFEST_FILE),
            format!(r#"{{"name":"{name}","version":"{version}"}}"#),
        )
        .unwrap();

        lpm_store::pack_folder(&src, &self.dir.path().join("artifacts"))
            .unwrap()
            .path
    }

    pub fn write_index(&self, entries: &[CatalogEntry]) {
        IndexCache::empty(&self.ctx.folders.index_file())
            .replace(Catalog::from_entries(entries.iter().cloned()))
            .unwrap();
    }

    pub fn registry(&self) -> LocalRegistry {
        LocalRegistry::load(&self.ctx.folders.installed_file()).unwrap()
    }

    pub fn read_root(&self, rel: &str) -> String {
        fs::read_to_string(self.ctx.folders.root.join(rel)).unwrap()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn catalog_entry(name: &str, version: &str, artifact: &Path) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        version: version.to_string(),
        url: artifact.display().to_string(),
        description: None,
        dependencies: Vec::new(),
    }
}
