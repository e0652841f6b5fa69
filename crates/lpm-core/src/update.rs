use lpm_error::{LpmError, Result};
use lpm_local::LocalRegistry;
use lpm_registry::IndexCache;
use lpm_settings::Context;

use crate::install::{InstallManager, InstallOutcome};

#[derive(Debug)]
pub enum UpdateStatus {
    Done(InstallOutcome),
    NotInIndex,
    Failed(LpmError),
}

#[derive(Debug)]
pub struct PackageUpdate {
    pub name: String,
    pub status: UpdateStatus,
}

pub struct UpdateManager<'a> {
    installer: InstallManager<'a>,
    ctx: &'a Context,
}

impl<'a> UpdateManager<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            installer: InstallManager::new(ctx),
            ctx,
        }
    }

    /// Runs an install for every installed package. One failing package does
    /// not stop the others.
    pub fn update_all(&self) -> Result<Vec<PackageUpdate>> {
        let index = IndexCache::open(&self.ctx.folders.index_file())?;
        let mut registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;
        let mut results = Vec::new();

        for name in registry.list_installed() {
            let status = match index.get(&name) {
                None => {
                    lpm_logger::warn(&format!("{name} is not in the package index, skipping"));
                    UpdateStatus::NotInIndex
                }
                Some(entry) => match self.installer.install_entry(entry, &mut registry) {
                    Ok(outcome) => UpdateStatus::Done(outcome),
                    Err(e) => {
                        lpm_logger::warn(&format!("failed to update {name}: {e}"));
                        UpdateStatus::Failed(e)
                    }
                },
            };
            results.push(PackageUpdate { name, status });
        }

        Ok(results)
    }
}
