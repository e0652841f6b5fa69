use lpm_error::Result;
use lpm_local::LocalRegistry;
use lpm_registry::{CatalogEntry, IndexCache};
use lpm_settings::Context;
use lpm_utils::version_greater;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct AvailablePackage {
    pub entry: CatalogEntry,
    pub installed: Option<String>,
}

impl AvailablePackage {
    #[must_use]
    pub fn upgradable(&self) -> bool {
        self.installed
            .as_deref()
            .is_some_and(|local| version_greater(&self.entry.version, local))
    }
}

pub struct ListManager<'a> {
    ctx: &'a Context,
}

impl<'a> ListManager<'a> {
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Installed packages, sorted by name.
    pub fn installed(&self) -> Result<Vec<InstalledPackage>> {
        let registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;
        Ok(registry
            .entries()
            .map(|(name, entry)| InstalledPackage {
                name: name.clone(),
                version: entry.version.clone(),
            })
            .collect())
    }

    /// Index entries in index order, with the locally installed version.
    pub fn available(&self) -> Result<Vec<AvailablePackage>> {
        let index = IndexCache::open(&self.ctx.folders.index_file())?;
        let registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;

        Ok(index
            .catalog()
            .iter()
            .map(|entry| AvailablePackage {
                entry: entry.clone(),
                installed: registry.installed_version(&entry.name).map(String::from),
            })
            .collect())
    }
}
