use std::path::Path;

use anyhow::Result;

use lpm_core::InstallOutcome;
use lpm_settings::Context;

use super::{print_header, require_debug_mode};

pub struct InstallHandler;

impl InstallHandler {
    pub fn handle_install(ctx: &Context, package: &str) -> Result<()> {
        print_header("install", package);
        let outcome = lpm_core::install(ctx, package)?;
        Self::report(package, &outcome);
        Ok(())
    }

    pub fn handle_get_local(ctx: &Context, artifact: &Path) -> Result<()> {
        require_debug_mode(ctx, "get-local")?;
        print_header("get-local", &artifact.display().to_string());
        let outcome = lpm_core::install_local(ctx, artifact)?;
        Self::report(&artifact.display().to_string(), &outcome);
        Ok(())
    }

    pub(crate) fn report(package: &str, outcome: &InstallOutcome) {
        match outcome {
            InstallOutcome::Installed { version } => {
                lpm_logger::finish(&format!("Installed {package}@{version}"));
            }
            InstallOutcome::Upgraded { from, to } => {
                lpm_logger::finish(&format!("Upgraded {package} from {from} to {to}"));
            }
            InstallOutcome::UpToDate { version } => {
                lpm_logger::info(&format!("{package} {version} is already up to date"));
            }
        }
    }
}
