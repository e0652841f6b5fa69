pub mod bootstrap;
pub mod build;
pub mod download;
pub mod install;
pub mod list;
pub mod remove;
pub mod search;
pub mod sync;
pub mod update;

#[cfg(test)]
mod testutil;

pub use bootstrap::{BootstrapReport, bootstrap};
pub use build::BuildManager;
pub use install::{InstallManager, InstallOutcome};
pub use list::{AvailablePackage, InstalledPackage, ListManager};
pub use lpm_settings::Context;
pub use remove::{RemoveManager, RemoveOutcome};
pub use search::SearchManager;
pub use sync::SyncManager;
pub use update::{PackageUpdate, UpdateManager, UpdateStatus};

use std::path::{Path, PathBuf};

use lpm_registry::CatalogEntry;

pub fn reload(ctx: &Context) -> anyhow::Result<usize> {
    SyncManager::new(ctx).reload().map_err(|e| anyhow::anyhow!(e))
}

pub fn install(ctx: &Context, name: &str) -> anyhow::Result<InstallOutcome> {
    InstallManager::new(ctx)
        .install(name)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn install_local(ctx: &Context, artifact: &Path) -> anyhow::Result<InstallOutcome> {
    InstallManager::new(ctx)
        .install_local(artifact)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn remove(ctx: &Context, name: &str) -> anyhow::Result<RemoveOutcome> {
    RemoveManager::new(ctx)
        .remove(name)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn update_all(ctx: &Context) -> anyhow::Result<Vec<PackageUpdate>> {
    UpdateManager::new(ctx)
        .update_all()
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn list_installed(ctx: &Context) -> anyhow::Result<Vec<InstalledPackage>> {
    ListManager::new(ctx)
        .installed()
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn list_available(ctx: &Context) -> anyhow::Result<Vec<AvailablePackage>> {
    ListManager::new(ctx)
        .available()
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn search(ctx: &Context, terms: &[String]) -> anyhow::Result<Vec<CatalogEntry>> {
    SearchManager::new(ctx)
        .search(terms)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn build_folder(ctx: &Context, folder: &Path) -> anyhow::Result<PathBuf> {
    BuildManager::new(ctx)
        .build_folder(folder)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn startup(ctx: &mut Context) -> anyhow::Result<BootstrapReport> {
    bootstrap(ctx).map_err(|e| anyhow::anyhow!(e))
}
