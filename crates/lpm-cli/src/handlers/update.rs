use anyhow::Result;

use lpm_core::{InstallOutcome, UpdateStatus};
use lpm_settings::Context;

use super::print_header;

pub struct UpdateHandler;

impl UpdateHandler {
    pub fn handle_update(ctx: &Context) -> Result<()> {
        print_header("update", "");
        let results = lpm_core::update_all(ctx)?;

        let mut upgraded = 0;
        let mut failed = 0;
        for update in &results {
            match &update.status {
                UpdateStatus::Done(InstallOutcome::Upgraded { from, to }) => {
                    upgraded += 1;
                    lpm_logger::success(&format!("{}: {from} -> {to}", update.name));
                }
                UpdateStatus::Done(_) | UpdateStatus::NotInIndex => {}
                UpdateStatus::Failed(_) => failed += 1,
            }
        }

        if failed > 0 {
            anyhow::bail!("{failed} of {} packages failed to update", results.len());
        }
        if upgraded == 0 {
            lpm_logger::finish("All packages are up to date");
        } else {
            lpm_logger::finish(&format!("Upgraded {upgraded} packages"));
        }
        Ok(())
    }
}
