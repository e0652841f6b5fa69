use anyhow::Result;

use lpm_settings::Context;

pub struct InitHandler;

impl InitHandler {
    pub fn handle_init(ctx: &mut Context) -> Result<()> {
        let report = lpm_core::startup(ctx)?;

        lpm_logger::debug(
            &format!(
                "startup: synced={:?} self_install={:?} first_run_cleared={}",
                report.synced, report.self_install, report.first_run_cleared
            ),
            ctx.debug(),
        );
        Ok(())
    }
}
