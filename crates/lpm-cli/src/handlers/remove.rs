use anyhow::Result;

use lpm_core::RemoveOutcome;
use lpm_settings::Context;

use super::print_header;

pub struct RemoveHandler;

impl RemoveHandler {
    pub fn handle_remove(ctx: &Context, package: &str) -> Result<()> {
        print_header("remove", package);
        match lpm_core::remove(ctx, package)? {
            RemoveOutcome::Removed { version } => {
                lpm_logger::success(&format!("Removed {package}@{version}"));
            }
            RemoveOutcome::NotInstalled => {
                lpm_logger::info(&format!("{package} is not installed"));
            }
        }
        Ok(())
    }
}
