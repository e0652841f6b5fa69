use lpm_constants::SELF_PACKAGE;
use lpm_error::{LpmError, Result};
use lpm_local::LocalRegistry;
use lpm_registry::IndexFetcher;
use lpm_settings::Context;

use crate::install::{InstallManager, InstallOutcome};
use crate::sync::SyncManager;

#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Number of index entries, if the reload succeeded.
    pub synced: Option<usize>,
    pub self_install: Option<InstallOutcome>,
    pub first_run_cleared: bool,
}

/// Startup hook run by the host before any other command.
pub fn bootstrap(ctx: &mut Context) -> Result<BootstrapReport> {
    bootstrap_with(ctx, IndexFetcher::new())
}

pub fn bootstrap_with(ctx: &mut Context, fetcher: IndexFetcher) -> Result<BootstrapReport> {
    ctx.folders.create_all()?;
    let mut report = BootstrapReport::default();

    match SyncManager::with_fetcher(ctx, fetcher).reload() {
        Ok(count) => report.synced = Some(count),
        Err(e) => lpm_logger::warn(&format!("could not reload package index: {e}")),
    }

    let registry = LocalRegistry::load(&ctx.folders.installed_file())?;
    let self_present = registry.is_installed(SELF_PACKAGE);
    if !self_present {
        match InstallManager::new(ctx).install(SELF_PACKAGE) {
            Ok(outcome) => report.self_install = Some(outcome),
            Err(LpmError::NotFound(_)) => {
                lpm_logger::warn(&format!("{SELF_PACKAGE} is not in the package index"));
            }
            Err(e) => lpm_logger::warn(&format!("could not install {SELF_PACKAGE}: {e}")),
        }
    }

    // A run only counts as successful once lpm itself is installed.
    if ctx.config.first_run && (self_present || report.self_install.is_some()) {
        ctx.config.first_run = false;
        ctx.config.save(&ctx.folders.config_file())?;
        report.first_run_cleared = true;
    }

    Ok(report)
}
